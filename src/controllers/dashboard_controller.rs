use chrono::Local;

use crate::dto::dashboard_dto::{CountsResponse, DashboardResponse};
use crate::dto::ApiResponse;
use crate::models::RangePreset;
use crate::services::order_count_service::resolve_preset;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::views::DashboardEvent;

pub struct DashboardController {
    state: AppState,
}

impl DashboardController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    async fn dispatch(&self, event: DashboardEvent) {
        let mut view = self.state.dashboard_view.write().await;
        *view = view.clone().apply(event);
    }

    /// Conteos del rango; un fallo deja intacto el último resumen
    pub async fn counts(&self, preset: RangePreset) -> Result<ApiResponse<CountsResponse>, AppError> {
        let range = resolve_preset(preset, &Local::now())?;
        log::info!("📊 Order counts requested for preset '{}'", preset.name());
        self.dispatch(DashboardEvent::Requested { preset, range }).await;

        match self.state.count_service.get_counts(range).await {
            Ok(counts) => {
                self.dispatch(DashboardEvent::Loaded(counts)).await;
                Ok(ApiResponse::success(CountsResponse { preset, range, counts }))
            }
            Err(e) => {
                self.dispatch(DashboardEvent::Failed(e.user_notice())).await;
                Err(e)
            }
        }
    }

    /// Al activarse por primera vez carga "today"
    pub async fn dashboard(&self) -> Result<ApiResponse<DashboardResponse>, AppError> {
        let activated = self.state.dashboard_view.read().await.range.is_some();
        if !activated {
            self.counts(RangePreset::Today).await?;
        }
        let view = self.state.dashboard_view.read().await;
        Ok(ApiResponse::success(DashboardResponse::from(&*view)))
    }
}
