use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::Sale;
use crate::services::profit_calculator::ProfitBreakdown;
use crate::utils::validation::{validate_non_negative, validate_not_future};

// Request para registrar una venta
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSaleRequest {
    #[serde(rename = "vehiculo_id")]
    pub vehicle_id: Uuid,
    #[serde(rename = "cliente_id")]
    pub client_id: Uuid,
    #[serde(rename = "vendedor_id")]
    pub seller_id: Uuid,
    #[validate(custom = "validate_non_negative")]
    pub sale_price_ars: Decimal,
    #[validate(custom = "validate_non_negative")]
    pub sale_price_usd: Decimal,
    #[validate(custom = "validate_not_future")]
    pub sale_date: NaiveDate,
    #[validate(length(max = 500, message = "Las notas no pueden superar 500 caracteres"))]
    pub notes: Option<String>,
}

/// Venta recién creada junto con los márgenes calculados
#[derive(Debug, Serialize)]
pub struct SaleCreatedResponse {
    #[serde(flatten)]
    pub sale: Sale,
    pub margin_pct_ars: Option<Decimal>,
    pub margin_pct_usd: Option<Decimal>,
}

impl SaleCreatedResponse {
    pub fn new(sale: Sale, profit: ProfitBreakdown) -> Self {
        Self {
            sale,
            margin_pct_ars: profit.margin_pct_ars,
            margin_pct_usd: profit.margin_pct_usd,
        }
    }
}
