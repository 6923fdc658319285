use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_non_negative, validate_not_blank};

// Gasto corriente de la concesionaria (sólo ARS)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CurrentExpenseRequest {
    pub expense_date: NaiveDate,
    #[validate(
        length(max = 200, message = "La descripción no puede superar 200 caracteres"),
        custom = "validate_not_blank"
    )]
    pub description: String,
    #[validate(length(min = 1, max = 60, message = "La categoría es requerida"))]
    pub category: String,
    #[validate(custom = "validate_non_negative")]
    pub amount: Decimal,
    #[validate(length(max = 80))]
    pub operator: Option<String>,
}

// Gasto imputado a un vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VehicleExpenseRequest {
    #[serde(rename = "vehiculo_id")]
    pub vehicle_id: Uuid,
    pub expense_date: NaiveDate,
    #[validate(
        length(max = 200, message = "La descripción no puede superar 200 caracteres"),
        custom = "validate_not_blank"
    )]
    pub description: String,
    #[validate(length(min = 1, max = 60, message = "La categoría es requerida"))]
    pub category: String,
    #[validate(custom = "validate_non_negative")]
    pub amount_ars: Decimal,
    #[validate(custom = "validate_non_negative")]
    pub amount_usd: Decimal,
}

// ?desde=&hasta= del listado de gastos corrientes (ambos inclusive)
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
}
