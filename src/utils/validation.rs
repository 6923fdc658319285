//! Utilidades de validación
//!
//! Expresiones regulares compartidas por los DTOs (`#[validate(regex = ...)]`)
//! y helpers para validar parámetros de consulta que no pasan por `validator`.

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// DNI argentino: 7 u 8 dígitos, sin puntos
    pub static ref RE_DNI: Regex = Regex::new(r"^\d{7,8}$").expect("regex de DNI válida");

    /// Patente: formato viejo (ABC123) o Mercosur (AB123CD)
    pub static ref RE_PATENTE: Regex =
        Regex::new(r"^([A-Z]{3}\d{3}|[A-Z]{2}\d{3}[A-Z]{2})$").expect("regex de patente válida");
}

/// Validar que un monto no sea negativo
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("El monto no puede ser negativo".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("El campo no puede estar vacío".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que una fecha no sea posterior a hoy
pub fn validate_not_future(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value > chrono::Utc::now().date_naive() {
        let mut error = ValidationError::new("not_future");
        error.message = Some("La fecha no puede ser futura".into());
        return Err(error);
    }
    Ok(())
}

/// Validar el año de reporte recibido por query string
pub fn validate_report_year(year: i32) -> Result<(), ValidationError> {
    let max = chrono::Utc::now().date_naive().year() + 1;
    if !(2000..=max).contains(&year) {
        let mut error = ValidationError::new("range");
        error.message = Some("Año de reporte fuera de rango".into());
        return Err(error);
    }
    Ok(())
}

/// Normalizar una patente para guardar y comparar (mayúsculas, sin espacios ni guiones)
pub fn normalize_plate(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dni_regex() {
        assert!(RE_DNI.is_match("12345678"));
        assert!(RE_DNI.is_match("1234567"));
        assert!(!RE_DNI.is_match("12.345.678"));
        assert!(!RE_DNI.is_match("123456"));
    }

    #[test]
    fn test_plate_regex_and_normalization() {
        assert!(RE_PATENTE.is_match("ABC123"));
        assert!(RE_PATENTE.is_match("AB123CD"));
        assert!(!RE_PATENTE.is_match("abc123"));
        assert_eq!(normalize_plate("ab 123-cd"), "AB123CD");
    }

    #[test]
    fn test_non_negative() {
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::new(1500, 2)).is_ok());
        assert!(validate_non_negative(&Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_report_year_range() {
        assert!(validate_report_year(2024).is_ok());
        assert!(validate_report_year(1999).is_err());
    }
}
