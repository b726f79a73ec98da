use serde::{Deserialize, Serialize};

use crate::models::{DateRange, OrderCountSummary, RangePreset};
use crate::utils::errors::{invalid_input_error, AppResult};
use crate::utils::validation::parse_date;
use crate::views::DashboardView;

/// `?preset=today|last_week|last_month` o `?start_date=..&end_date=..`
#[derive(Debug, Default, Deserialize)]
pub struct CountsQuery {
    pub preset: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl CountsQuery {
    /// Sin parámetros equivale a "today"
    pub fn to_preset(&self) -> AppResult<RangePreset> {
        match (&self.preset, &self.start_date, &self.end_date) {
            (Some(preset), None, None) => match preset.trim() {
                "today" => Ok(RangePreset::Today),
                "last_week" => Ok(RangePreset::LastWeek),
                "last_month" => Ok(RangePreset::LastMonth),
                other => Err(invalid_input_error(&format!("Unknown range preset '{}'", other))),
            },
            (None, Some(start), Some(end)) => {
                let start = parse_date(start)
                    .ok_or_else(|| invalid_input_error("start_date must be formatted as YYYY-MM-DD"))?;
                let end = parse_date(end)
                    .ok_or_else(|| invalid_input_error("end_date must be formatted as YYYY-MM-DD"))?;
                Ok(RangePreset::Custom { start, end })
            }
            (None, None, None) => Ok(RangePreset::Today),
            _ => Err(invalid_input_error(
                "Use either a preset or both start_date and end_date",
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CountsResponse {
    pub preset: RangePreset,
    pub range: DateRange,
    pub counts: OrderCountSummary,
}

// Response con el estado del dashboard
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub active_preset: RangePreset,
    pub range: Option<DateRange>,
    pub counts: OrderCountSummary,
    pub loading: bool,
    pub error: Option<String>,
}

impl From<&DashboardView> for DashboardResponse {
    fn from(view: &DashboardView) -> Self {
        Self {
            active_preset: view.active_preset,
            range: view.range,
            counts: view.counts,
            loading: view.loading,
            error: view.error.clone(),
        }
    }
}
