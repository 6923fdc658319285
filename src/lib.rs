//! Back-office de la concesionaria
//!
//! Inventario de vehículos, clientes, ventas y gastos, con los reportes
//! financieros del dashboard.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
