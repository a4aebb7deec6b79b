//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! del dominio de la flota.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    // Matrículas tipo "AB-123-CD", "1234-ABC" o alfanuméricas simples
    static ref PLATE_REGEX: Regex = Regex::new(r"^[A-Z0-9]{1,4}(-[A-Z0-9]{1,4}){0,2}$").unwrap();
}

/// Tipos de combustible aceptados por la API
pub const FUEL_TYPES: [&str; 5] = ["diesel", "gasoline", "lpg", "electric", "hybrid"];

/// Validar formato de matrícula (se normaliza a mayúsculas antes de comparar)
pub fn validate_plate(value: &str) -> Result<(), ValidationError> {
    let normalized = value.trim().to_uppercase();
    if normalized.is_empty() || !PLATE_REGEX.is_match(&normalized) {
        let mut error = ValidationError::new("plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Normalizar matrícula para almacenamiento
pub fn normalize_plate(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Validar tipo de combustible
pub fn validate_fuel_type(value: &str) -> Result<(), ValidationError> {
    if FUEL_TYPES.contains(&value.to_lowercase().as_str()) {
        Ok(())
    } else {
        let mut error = ValidationError::new("fuel_type");
        error.add_param("value".into(), &value.to_string());
        error.add_param("allowed".into(), &FUEL_TYPES.join(","));
        Err(error)
    }
}

/// Validar que un número sea finito y no negativo
pub fn validate_non_negative(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}
