//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y su estado de inventario.
//! Mapea exactamente a la tabla `vehicles` del schema PostgreSQL.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del vehículo - mapea al ENUM vehicle_status
///
/// Sólo cambia a través de una venta: `disponible → vendido` al crearla,
/// `vendido → disponible` al eliminarla.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_status")]
pub enum VehicleStatus {
    #[serde(rename = "disponible")]
    #[sqlx(rename = "disponible")]
    Available,
    #[serde(rename = "vendido")]
    #[sqlx(rename = "vendido")]
    Sold,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "disponible",
            VehicleStatus::Sold => "vendido",
        }
    }
}

/// Vehicle principal, con los gastos acumulados ya sumados por la query
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub acquisition_price_ars: Decimal,
    pub acquisition_price_usd: Decimal,
    pub suggested_price_ars: Decimal,
    pub suggested_price_usd: Decimal,
    pub status: VehicleStatus,
    pub acquisition_date: NaiveDate,
    /// Suma de `vehicle_expenses.amount_ars` (derivado)
    pub expenses_ars: Decimal,
    /// Suma de `vehicle_expenses.amount_usd` (derivado)
    pub expenses_usd: Decimal,
    pub created_at: DateTime<Utc>,
}
