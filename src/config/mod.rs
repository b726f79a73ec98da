//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno y la configuración del
//! backend remoto, del geocodificador y del mapa.

pub mod environment;

pub use environment::*;
