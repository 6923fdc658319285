use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::VehicleStatus;
use crate::utils::validation::{
    normalize_plate, validate_non_negative, validate_not_blank, validate_not_future, RE_PATENTE,
};

// Alta y modificación de un vehículo. El estado no se edita: lo maneja la venta.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VehicleRequest {
    #[validate(
        length(max = 60, message = "La marca no puede superar 60 caracteres"),
        custom = "validate_not_blank"
    )]
    pub brand: String,
    #[validate(
        length(max = 60, message = "El modelo no puede superar 60 caracteres"),
        custom = "validate_not_blank"
    )]
    pub model: String,
    #[validate(range(min = 1950, max = 2100, message = "Año inválido"))]
    pub year: i32,
    #[validate(regex(path = "RE_PATENTE", message = "Patente inválida (ABC123 o AB123CD)"))]
    pub license_plate: String,
    #[validate(custom = "validate_non_negative")]
    pub acquisition_price_ars: Decimal,
    #[validate(custom = "validate_non_negative")]
    pub acquisition_price_usd: Decimal,
    #[validate(custom = "validate_non_negative")]
    pub suggested_price_ars: Decimal,
    #[validate(custom = "validate_non_negative")]
    pub suggested_price_usd: Decimal,
    #[validate(custom = "validate_not_future")]
    pub acquisition_date: NaiveDate,
}

impl VehicleRequest {
    /// Dejar la patente en su forma canónica antes de validar
    pub fn normalized(mut self) -> Self {
        self.license_plate = normalize_plate(&self.license_plate);
        self.brand = self.brand.trim().to_string();
        self.model = self.model.trim().to_string();
        self
    }
}

// Filtro del listado: ?estado=disponible|vendido
#[derive(Debug, Default, Deserialize)]
pub struct VehicleFilter {
    pub estado: Option<VehicleStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request() -> VehicleRequest {
        VehicleRequest {
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2019,
            license_plate: "abc 123".to_string(),
            acquisition_price_ars: dec!(1000),
            acquisition_price_usd: dec!(100),
            suggested_price_ars: dec!(1500),
            suggested_price_usd: dec!(150),
            acquisition_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        }
    }

    #[test]
    fn test_plate_is_normalized_before_validation() {
        let req = request();
        assert!(req.validate().is_err());
        let req = req.normalized();
        assert_eq!(req.license_plate, "ABC123");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let mut req = request().normalized();
        req.acquisition_price_usd = dec!(-1);
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("acquisition_price_usd"));
    }
}
