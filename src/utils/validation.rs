//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! de entrada y conversión de tipos.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::utils::errors::{AppError, AppResult};

lazy_static! {
    /// `+` opcional seguido de 7 a 15 dígitos
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9]{7,15}$").unwrap();
}

/// Formato de fecha aceptado para `license_expiry`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Devuelve el valor si está presente y no es una cadena en blanco
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Exige todos los campos listados; falla con el mensaje dado si alguno falta
pub fn require_all<const N: usize>(
    values: [Option<String>; N],
    message: &str,
) -> AppResult<[String; N]> {
    let mut missing = false;
    let values = values.map(|v| match present(v) {
        Some(v) => v,
        None => {
            missing = true;
            String::new()
        }
    });

    if missing {
        return Err(AppError::BadRequest(message.to_string()));
    }
    Ok(values)
}

/// Validar formato de teléfono
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if !PHONE_REGEX.is_match(value) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Igual que [`validate_phone`] pero convertido al error de la API
pub fn ensure_phone(value: &str) -> AppResult<()> {
    validate_phone(value).map_err(|_| {
        AppError::BadRequest(format!(
            "Invalid phone number '{}'. Use digits only, optionally prefixed with '+'",
            value
        ))
    })
}

/// Validar sintaxis de email
pub fn ensure_email(value: &str) -> AppResult<()> {
    if validator::validate_email(value) {
        Ok(())
    } else {
        Err(AppError::BadRequest("Invalid email address".to_string()))
    }
}

/// Validar y convertir string a fecha (YYYY-MM-DD)
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Fecha de vencimiento de licencia; un valor mal formado es un error 400
pub fn parse_license_expiry(value: &str) -> AppResult<NaiveDate> {
    validate_date(value).map_err(|_| {
        AppError::BadRequest(
            "Invalid date format for license_expiry. Use YYYY-MM-DD".to_string(),
        )
    })
}

/// Variante tolerante usada en el registro: un valor ilegible se descarta
pub fn parse_license_expiry_lenient(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|v| validate_date(v).ok())
}

/// Validar que un entero no sea negativo
pub fn ensure_non_negative(field: &str, value: i32) -> AppResult<()> {
    if value < 0 {
        return Err(AppError::BadRequest(format!("{} must be greater than or equal to 0", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_format() {
        assert!(validate_phone("+15551234567").is_ok());
        assert!(validate_phone("9868995742").is_ok());
        assert!(validate_phone("+1 555 123").is_err());
        assert!(validate_phone("phone").is_err());
        assert!(validate_phone("+123").is_err());
    }

    #[test]
    fn test_require_all_rejects_blank_values() {
        let ok = require_all([Some("a".to_string()), Some("b".to_string())], "Missing");
        assert_eq!(ok.unwrap(), ["a".to_string(), "b".to_string()]);

        let blank = require_all([Some("a".to_string()), Some("  ".to_string())], "Missing");
        assert!(matches!(blank, Err(AppError::BadRequest(msg)) if msg == "Missing"));

        let absent = require_all([None, Some("b".to_string())], "Missing");
        assert!(absent.is_err());
    }

    #[test]
    fn test_license_expiry_strict_and_lenient() {
        assert_eq!(
            parse_license_expiry("2030-01-31").unwrap(),
            NaiveDate::from_ymd_opt(2030, 1, 31).unwrap()
        );
        assert!(parse_license_expiry("31/01/2030").is_err());
        assert!(parse_license_expiry("2030-02-30").is_err());

        assert_eq!(parse_license_expiry_lenient(Some("not a date")), None);
        assert_eq!(parse_license_expiry_lenient(None), None);
        assert!(parse_license_expiry_lenient(Some("2031-12-01")).is_some());
    }

    #[test]
    fn test_email_syntax() {
        assert!(ensure_email("a@b.com").is_ok());
        assert!(ensure_email("not-an-email").is_err());
    }

    #[test]
    fn test_non_negative() {
        assert!(ensure_non_negative("mileage", 0).is_ok());
        assert!(ensure_non_negative("mileage", -1).is_err());
    }
}
