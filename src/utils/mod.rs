//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y la guardia single-flight.

pub mod errors;
pub mod single_flight;
pub mod validation;

pub use errors::{AppError, AppResult};
