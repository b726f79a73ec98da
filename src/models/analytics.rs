//! Modelos de Analytics
//!
//! Resumen de conteos de pedidos y rangos de fechas para el dashboard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tres conteos independientes sobre el mismo rango `[start, end]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCountSummary {
    pub incomplete: u64,
    pub completed: u64,
    pub canceled: u64,
}

/// Intervalo en milisegundos epoch, inclusivo en ambos extremos.
/// No se valida que `start_ms <= end_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl DateRange {
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }
}

/// Rangos predefinidos del panel de filtros
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RangePreset {
    Today,
    LastWeek,
    LastMonth,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl RangePreset {
    pub fn name(&self) -> &'static str {
        match self {
            RangePreset::Today => "today",
            RangePreset::LastWeek => "last_week",
            RangePreset::LastMonth => "last_month",
            RangePreset::Custom { .. } => "custom",
        }
    }
}
