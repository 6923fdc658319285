//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::stats_repository::PgReportingSource;
use crate::services::reporting_source::ReportingSource;
use crate::services::stats_service::StatsService;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    /// Fuente de los reportes; por defecto la misma base de datos
    pub reporting: Arc<dyn ReportingSource>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let reporting = Arc::new(PgReportingSource::new(pool.clone()));
        Self {
            pool,
            config,
            reporting,
        }
    }

    /// Reemplazar la fuente de reportes (tests, o una réplica de lectura)
    pub fn with_reporting(mut self, reporting: Arc<dyn ReportingSource>) -> Self {
        self.reporting = reporting;
        self
    }

    pub fn stats(&self) -> StatsService {
        StatsService::new(self.reporting.clone())
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::from(&self.config)
    }
}
