//! Controllers
//!
//! Validan el request, aplican las reglas de negocio y arman la respuesta.
//! Los handlers de `routes` sólo extraen parámetros y delegan acá.

pub mod auth_controller;
pub mod client_controller;
pub mod expense_controller;
pub mod sale_controller;
pub mod seller_controller;
pub mod stats_controller;
pub mod vehicle_controller;
