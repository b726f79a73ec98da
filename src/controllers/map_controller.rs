use crate::dto::map_dto::MapStateResponse;
use crate::dto::ApiResponse;
use crate::models::GeoCoordinate;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::views::MapEvent;

pub struct MapController {
    state: AppState,
}

impl MapController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    async fn dispatch(&self, event: MapEvent) -> MapStateResponse {
        let mut view = self.state.map_view.write().await;
        *view = view.clone().apply(event);
        MapStateResponse::from(&*view)
    }

    pub async fn scene(&self) -> MapStateResponse {
        let view = self.state.map_view.read().await;
        MapStateResponse::from(&*view)
    }

    /// Encendido: carga las rutas. Apagado: limpia sin llamar al backend
    pub async fn toggle_active_orders(&self, enabled: bool) -> Result<ApiResponse<MapStateResponse>, AppError> {
        log::info!("🗺️ Active orders overlay {}", if enabled { "on" } else { "off" });
        let response = self.dispatch(MapEvent::ActiveOrdersToggled(enabled)).await;
        if !enabled {
            return Ok(ApiResponse::success(response));
        }
        self.load_routes().await
    }

    /// Nueva pasada de render con los pedidos actuales
    pub async fn refresh(&self) -> Result<ApiResponse<MapStateResponse>, AppError> {
        let enabled = self.state.map_view.read().await.show_active_orders;
        if !enabled {
            return Ok(ApiResponse::success_with_message(
                self.scene().await,
                "Active orders overlay is off".to_string(),
            ));
        }
        self.load_routes().await
    }

    async fn load_routes(&self) -> Result<ApiResponse<MapStateResponse>, AppError> {
        self.dispatch(MapEvent::RoutesRequested).await;

        match self.state.route_service.load_routes().await {
            Ok(pass) => {
                let rejected = pass.rejected.len();
                let response = self.dispatch(MapEvent::RoutesLoaded(pass)).await;
                let message = response.notice.as_ref().map(|n| n.message.clone());
                if rejected > 0 {
                    log::warn!("⚠️ {} orders excluded from the map", rejected);
                }
                Ok(ApiResponse {
                    success: true,
                    message,
                    data: Some(response),
                })
            }
            Err(e) => {
                self.dispatch(MapEvent::RoutesFailed(e.user_notice())).await;
                Err(e)
            }
        }
    }

    /// Recentrar con el zoom fijo; repetir con el mismo punto no cambia nada
    pub async fn recenter(&self, lat: f64, lon: f64) -> Result<ApiResponse<MapStateResponse>, AppError> {
        let center = GeoCoordinate::new(lat, lon)?;
        let response = self.dispatch(MapEvent::Recentered(center)).await;
        Ok(ApiResponse::success(response))
    }
}
