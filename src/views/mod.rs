//! Contenedores de estado por vista
//!
//! Cada vista del panel es un valor inmutable que avanza con
//! `apply(self, event) -> Self`. Los controladores ejecutan la llamada
//! remota y despachan el evento resultante; así el estado se prueba sin
//! servidor ni red.

pub mod dashboard_view;
pub mod directory_view;
pub mod listings_view;
pub mod map_view;

pub use dashboard_view::{DashboardEvent, DashboardView};
pub use directory_view::{DirectoryEvent, DirectoryView};
pub use listings_view::{ListingsEvent, ListingsView};
pub use map_view::{MapEvent, MapView};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Mensaje para el usuario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}
