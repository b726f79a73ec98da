//! Middleware del sistema
//!
//! Este módulo contiene la configuración de CORS del panel.

pub mod cors;

pub use cors::*;
