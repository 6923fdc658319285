//! Services module
//!
//! Lógica de negocio: cálculo de ganancias, series mensuales, tendencias,
//! el facade de reportes y las operaciones transaccionales de ventas.

pub mod auth_service;
pub mod monthly_bucketer;
pub mod profit_calculator;
pub mod reporting_source;
pub mod sale_service;
pub mod stats_service;
pub mod trend;

pub use reporting_source::ReportingSource;
pub use stats_service::StatsService;
