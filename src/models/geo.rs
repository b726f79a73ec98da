//! Modelos geográficos
//!
//! Coordenadas validadas y colores RGB usados por el mapa.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errores al interpretar una coordenada recibida como texto
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("missing {0} component")]
    Missing(&'static str),

    #[error("{component} component '{value}' is not a number")]
    NotNumeric { component: &'static str, value: String },

    #[error("{component} component is not finite")]
    NotFinite { component: &'static str },
}

/// Punto lat/lon con ambos componentes finitos
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() {
            return Err(CoordinateError::NotFinite { component: "lat" });
        }
        if !lon.is_finite() {
            return Err(CoordinateError::NotFinite { component: "lon" });
        }
        Ok(Self { lat, lon })
    }

    /// Media aritmética por eje
    pub fn midpoint(&self, other: &GeoCoordinate) -> GeoCoordinate {
        GeoCoordinate {
            lat: (self.lat + other.lat) / 2.0,
            lon: (self.lon + other.lon) / 2.0,
        }
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Color RGB; se serializa como `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_finite() {
        assert!(GeoCoordinate::new(f64::NAN, 36.0).is_err());
        assert!(GeoCoordinate::new(33.0, f64::INFINITY).is_err());
        assert!(GeoCoordinate::new(33.0, 36.0).is_ok());
    }

    #[test]
    fn test_midpoint() {
        let a = GeoCoordinate { lat: 33.5, lon: 36.3 };
        let b = GeoCoordinate { lat: 33.6, lon: 36.4 };
        let mid = a.midpoint(&b);
        assert!((mid.lat - 33.55).abs() < 1e-9);
        assert!((mid.lon - 36.35).abs() < 1e-9);
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb::new(255, 0, 16).to_hex(), "#FF0010");
    }
}
