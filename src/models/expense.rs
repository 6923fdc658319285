//! Modelos de gastos
//!
//! `CurrentExpense` es un gasto operativo de la concesionaria (sólo ARS).
//! `VehicleExpense` se imputa a un vehículo y reduce su ganancia.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CurrentExpense {
    pub id: Uuid,
    pub expense_date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    pub operator: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VehicleExpense {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub expense_date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount_ars: Decimal,
    pub amount_usd: Decimal,
    pub created_at: DateTime<Utc>,
}
