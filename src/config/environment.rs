//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Zona por defecto de la concesionaria
const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Argentina::Buenos_Aires;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub session_ttl_seconds: u64,
    pub cors_origins: Vec<String>,
    pub debug: bool,
    /// Zona horaria del negocio; define qué día (y mes) es "hoy"
    pub timezone: Tz,
}

impl EnvironmentConfig {
    /// Leer la configuración desde variables de entorno (ya cargadas con dotenvy)
    pub fn from_env() -> Result<Self> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid number")?;

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == "production" => {
                return Err(anyhow!("JWT_SECRET must be set in production"))
            }
            _ => "development-only-secret".to_string(),
        };

        let session_ttl_seconds = env::var("SESSION_TTL_SECONDS")
            .unwrap_or_else(|_| "28800".to_string())
            .parse::<u64>()
            .context("SESSION_TTL_SECONDS must be a valid number")?;

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let debug = env::var("APP_DEBUG")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let timezone = match env::var("BUSINESS_TIMEZONE") {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<Tz>()
                .map_err(|_| anyhow!("BUSINESS_TIMEZONE '{}' is not a valid IANA timezone", raw))?,
            _ => DEFAULT_TIMEZONE,
        };

        Ok(Self {
            environment,
            port,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret,
            session_ttl_seconds,
            cors_origins,
            debug,
            timezone,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Los errores 500 incluyen el detalle sólo en desarrollo o con APP_DEBUG
    pub fn expose_error_details(&self) -> bool {
        self.debug || self.is_development()
    }

    /// Fecha de hoy en la zona del negocio
    pub fn today(&self) -> NaiveDate {
        self.date_at(Utc::now())
    }

    pub fn date_at(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for EnvironmentConfig {
    /// Configuración de tests: nunca toca variables de entorno
    fn default() -> Self {
        Self {
            environment: "test".to_string(),
            port: 3000,
            host: "127.0.0.1".to_string(),
            jwt_secret: "test-secret".to_string(),
            session_ttl_seconds: 3600,
            cors_origins: Vec::new(),
            debug: false,
            timezone: DEFAULT_TIMEZONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_policy() {
        let mut config = EnvironmentConfig::default();
        assert!(!config.expose_error_details());

        config.environment = "development".to_string();
        assert!(config.expose_error_details());

        config.environment = "production".to_string();
        config.debug = true;
        assert!(config.is_production());
        assert!(config.expose_error_details());
    }

    #[test]
    fn test_business_day_follows_timezone() {
        let config = EnvironmentConfig::default();
        // 01:30 UTC del 1/8 todavía es 31/7 en Buenos Aires
        let instant = NaiveDate::from_ymd_opt(2024, 8, 1)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap()
            .and_utc();
        assert_eq!(config.date_at(instant), NaiveDate::from_ymd_opt(2024, 7, 31).unwrap());

        let utc = EnvironmentConfig {
            timezone: chrono_tz::UTC,
            ..EnvironmentConfig::default()
        };
        assert_eq!(utc.date_at(instant), NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
    }

    #[test]
    fn test_server_url() {
        assert_eq!(EnvironmentConfig::default().server_url(), "127.0.0.1:3000");
    }
}
