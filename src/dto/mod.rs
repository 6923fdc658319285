//! DTOs de request/response
//!
//! Los requests se validan con `validator` en el controller antes de tocar
//! la base de datos.

pub mod auth_dto;
pub mod client_dto;
pub mod common_dto;
pub mod expense_dto;
pub mod sale_dto;
pub mod stats_dto;
pub mod vehicle_dto;

pub use common_dto::ApiResponse;
