//! Acceso a datos
//!
//! Un repositorio por tabla. Todas las queries usan `query_as` en tiempo de
//! ejecución y devuelven `AppResult`.

pub mod client_repository;
pub mod expense_repository;
pub mod sale_repository;
pub mod stats_repository;
pub mod user_repository;
pub mod vehicle_repository;
