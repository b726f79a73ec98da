use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::DirectoryController;
use crate::dto::captain_dto::{CaptainQuery, CaptainsResponse};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_captain_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_captains))
        .route("/filter", get(filter_captains))
}

async fn list_captains(
    State(state): State<AppState>,
    Query(query): Query<CaptainQuery>,
) -> Result<Json<ApiResponse<CaptainsResponse>>, AppError> {
    let controller = DirectoryController::new(state);
    let response = controller.activate(query.q).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn filter_captains(
    State(state): State<AppState>,
    Query(query): Query<CaptainQuery>,
) -> Json<ApiResponse<CaptainsResponse>> {
    let controller = DirectoryController::new(state);
    Json(ApiResponse::success(controller.filter(query.q).await))
}
