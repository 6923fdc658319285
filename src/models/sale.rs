//! Modelo de Sale
//!
//! Una venta finaliza exactamente un vehículo. La ganancia se calcula y se
//! congela al momento de crearla (ver `services::profit_calculator`).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sale {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub client_id: Uuid,
    pub seller_id: Uuid,
    pub sale_price_ars: Decimal,
    pub sale_price_usd: Decimal,
    pub gain_ars: Decimal,
    pub gain_usd: Decimal,
    pub sale_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Venta con los datos de sus referencias, para listados
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SaleDetail {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub license_plate: String,
    pub vehicle_description: String,
    pub client_id: Uuid,
    pub client_name: String,
    pub client_dni: String,
    pub seller_id: Uuid,
    pub seller_name: String,
    pub sale_price_ars: Decimal,
    pub sale_price_usd: Decimal,
    pub gain_ars: Decimal,
    pub gain_usd: Decimal,
    pub sale_date: NaiveDate,
    pub notes: Option<String>,
}
