//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL.

pub mod client;
pub mod expense;
pub mod sale;
pub mod user;
pub mod vehicle;

pub use client::{Client, ClientClassification};
pub use expense::{CurrentExpense, VehicleExpense};
pub use sale::{Sale, SaleDetail};
pub use user::{User, UserResponse};
pub use vehicle::{Vehicle, VehicleStatus};
