use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::DashboardController;
use crate::dto::dashboard_dto::{CountsQuery, CountsResponse, DashboardResponse};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_orders_router() -> Router<AppState> {
    Router::new().route("/counts", get(get_order_counts))
}

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}

async fn get_order_counts(
    State(state): State<AppState>,
    Query(query): Query<CountsQuery>,
) -> Result<Json<ApiResponse<CountsResponse>>, AppError> {
    let preset = query.to_preset()?;
    let controller = DashboardController::new(state);
    let response = controller.counts(preset).await?;
    Ok(Json(response))
}

async fn get_dashboard(State(state): State<AppState>) -> Result<Json<ApiResponse<DashboardResponse>>, AppError> {
    let controller = DashboardController::new(state);
    let response = controller.dashboard().await?;
    Ok(Json(response))
}
