use crate::dto::map_dto::{MapStateResponse, SelectRequest};
use crate::dto::ApiResponse;
use crate::models::GeoCoordinate;
use crate::services::geocoding_service::select_candidate;
use crate::state::AppState;
use crate::utils::errors::{invalid_input_error, not_found_error, AppError};
use crate::utils::validation::coordinate_from_strings;
use crate::views::MapEvent;

pub struct GeocodingController {
    state: AppState,
}

impl GeocodingController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    async fn dispatch(&self, event: MapEvent) -> MapStateResponse {
        let mut view = self.state.map_view.write().await;
        *view = view.clone().apply(event);
        MapStateResponse::from(&*view)
    }

    /// Reemplaza la lista de candidatos; sin reintentos
    pub async fn search(&self, text: &str) -> Result<ApiResponse<MapStateResponse>, AppError> {
        log::info!("🔍 Place search: '{}'", text.trim());
        self.dispatch(MapEvent::SearchStarted).await;

        match self.state.geocoding_service.search(text).await {
            Ok(results) => {
                log::info!("✅ {} candidates found", results.len());
                let response = self.dispatch(MapEvent::SearchCompleted(results)).await;
                let message = response.notice.as_ref().map(|n| n.message.clone());
                Ok(ApiResponse {
                    success: true,
                    message,
                    data: Some(response),
                })
            }
            Err(e) if e.is_validation() => {
                self.dispatch(MapEvent::SearchRejected(e.user_notice())).await;
                Err(e)
            }
            Err(e) => {
                self.dispatch(MapEvent::SearchFailed(e.user_notice())).await;
                Err(e)
            }
        }
    }

    /// Mueve el centro al candidato elegido; una coordenada inválida no cambia la vista
    pub async fn select(&self, request: SelectRequest) -> Result<ApiResponse<MapStateResponse>, AppError> {
        match self.resolve_selection(request).await {
            Ok(center) => {
                log::info!("📍 Map centered on {}", center);
                let response = self.dispatch(MapEvent::CandidateSelected(center)).await;
                Ok(ApiResponse::success(response))
            }
            Err(e) => {
                self.dispatch(MapEvent::SelectionRejected(e.user_notice())).await;
                Err(e)
            }
        }
    }

    async fn resolve_selection(&self, request: SelectRequest) -> Result<GeoCoordinate, AppError> {
        match request {
            SelectRequest { index: Some(index), .. } => {
                let candidate = self
                    .state
                    .map_view
                    .read()
                    .await
                    .candidates
                    .get(index)
                    .cloned()
                    .ok_or_else(|| not_found_error("Search result", &index.to_string()))?;
                select_candidate(&candidate)
            }
            SelectRequest {
                index: None,
                lat: Some(lat),
                lon: Some(lon),
            } => Ok(coordinate_from_strings(&lat.into_text(), &lon.into_text())?),
            _ => Err(invalid_input_error("Select a search result by index or by lat/lon")),
        }
    }
}
