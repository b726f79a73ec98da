use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::MapController;
use crate::dto::map_dto::{CenterRequest, MapStateResponse, ToggleRequest};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_map_router() -> Router<AppState> {
    Router::new()
        .route("/scene", get(get_scene))
        .route("/active-orders", post(toggle_active_orders))
        .route("/refresh", post(refresh_routes))
        .route("/center", post(recenter))
}

async fn get_scene(State(state): State<AppState>) -> Json<ApiResponse<MapStateResponse>> {
    let controller = MapController::new(state);
    Json(ApiResponse::success(controller.scene().await))
}

async fn toggle_active_orders(
    State(state): State<AppState>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<ApiResponse<MapStateResponse>>, AppError> {
    let controller = MapController::new(state);
    let response = controller.toggle_active_orders(request.enabled).await?;
    Ok(Json(response))
}

async fn refresh_routes(State(state): State<AppState>) -> Result<Json<ApiResponse<MapStateResponse>>, AppError> {
    let controller = MapController::new(state);
    let response = controller.refresh().await?;
    Ok(Json(response))
}

async fn recenter(
    State(state): State<AppState>,
    Json(request): Json<CenterRequest>,
) -> Result<Json<ApiResponse<MapStateResponse>>, AppError> {
    let controller = MapController::new(state);
    let response = controller.recenter(request.lat, request.lon).await?;
    Ok(Json(response))
}
