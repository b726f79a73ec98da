//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validar la entrada del
//! usuario y convertir los textos que llegan del backend.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{CoordinateError, GeoCoordinate};

lazy_static! {
    static ref UNSAFE_FILE_CHARS: Regex = Regex::new(r"[^A-Za-z0-9._-]+").unwrap();
}

/// Separador de los puntos guardados como texto
pub const COORDINATE_SEPARATOR: char = ',';

/// Convertir un componente de texto a número finito
pub fn parse_component(value: &str, component: &'static str) -> Result<f64, CoordinateError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoordinateError::Missing(component));
    }
    let parsed: f64 = trimmed.parse().map_err(|_| CoordinateError::NotNumeric {
        component,
        value: trimmed.to_string(),
    })?;
    if !parsed.is_finite() {
        return Err(CoordinateError::NotFinite { component });
    }
    Ok(parsed)
}

/// Interpretar `"lat,lon"`; exige exactamente dos componentes
pub fn parse_coordinate_pair(value: &str) -> Result<GeoCoordinate, CoordinateError> {
    let mut parts = value.split(COORDINATE_SEPARATOR);
    let lat = parts.next().ok_or(CoordinateError::Missing("lat"))?;
    let lon = parts.next().ok_or(CoordinateError::Missing("lon"))?;
    if let Some(extra) = parts.next() {
        return Err(CoordinateError::NotNumeric {
            component: "lon",
            value: format!("{},{}", lon.trim(), extra.trim()),
        });
    }
    coordinate_from_strings(lat, lon)
}

/// Interpretar lat/lon que llegan por separado como texto
pub fn coordinate_from_strings(lat: &str, lon: &str) -> Result<GeoCoordinate, CoordinateError> {
    let lat = parse_component(lat, "lat")?;
    let lon = parse_component(lon, "lon")?;
    GeoCoordinate::new(lat, lon)
}

/// El texto de búsqueda no puede quedar vacío tras quitar espacios
pub fn validate_search_text(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Validar y convertir string a fecha (YYYY-MM-DD)
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Nombre del objeto en storage: `<millis>_<nombre original saneado>`
pub fn storage_file_name(timestamp_ms: i64, original: &str) -> String {
    let base = original
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(original);
    let cleaned = UNSAFE_FILE_CHARS.replace_all(base.trim(), "_");
    let cleaned = cleaned.trim_matches('_');
    if cleaned.is_empty() {
        format!("{}_upload", timestamp_ms)
    } else {
        format!("{}_{}", timestamp_ms, cleaned)
    }
}
