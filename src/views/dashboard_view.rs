use serde::Serialize;

use crate::models::{DateRange, OrderCountSummary, RangePreset};

/// Vista del resumen de pedidos
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub active_preset: RangePreset,
    pub range: Option<DateRange>,
    pub counts: OrderCountSummary,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    Requested { preset: RangePreset, range: DateRange },
    Loaded(OrderCountSummary),
    Failed(String),
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            active_preset: RangePreset::Today,
            range: None,
            counts: OrderCountSummary::default(),
            loading: false,
            error: None,
        }
    }
}

impl DashboardView {
    pub fn apply(mut self, event: DashboardEvent) -> Self {
        match event {
            DashboardEvent::Requested { preset, range } => {
                self.active_preset = preset;
                self.range = Some(range);
                self.loading = true;
                self.error = None;
            }
            DashboardEvent::Loaded(counts) => {
                self.counts = counts;
                self.loading = false;
            }
            DashboardEvent::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
        }
        self
    }
}
