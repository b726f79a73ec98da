use axum::{extract::State, routing::post, Json, Router};

use crate::controllers::GeocodingController;
use crate::dto::map_dto::{MapStateResponse, SearchRequest, SelectRequest};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_geocoding_router() -> Router<AppState> {
    Router::new()
        .route("/search", post(search_places))
        .route("/select", post(select_place))
}

/// Endpoint para buscar lugares por texto libre
async fn search_places(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<ApiResponse<MapStateResponse>>, AppError> {
    let controller = GeocodingController::new(state);
    let response = controller.search(&request.text).await?;
    Ok(Json(response))
}

/// Endpoint para elegir un candidato y centrar el mapa
async fn select_place(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<ApiResponse<MapStateResponse>>, AppError> {
    let controller = GeocodingController::new(state);
    let response = controller.select(request).await?;
    Ok(Json(response))
}
