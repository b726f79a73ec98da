use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::ListingController;
use crate::dto::listing_dto::{DeleteQuery, ListingResponse};
use crate::dto::ApiResponse;
use crate::models::{ImageUpload, ListingDraft};
use crate::state::AppState;
use crate::utils::errors::{invalid_input_error, AppError};

/// Tamaño máximo del formulario con imagen
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn create_listing_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_listings).post(create_listing))
        .route("/:id", get(get_listing).put(update_listing).delete(delete_listing))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// Campos del formulario + imagen opcional
async fn read_form(mut multipart: Multipart) -> Result<(ListingDraft, Option<ImageUpload>), AppError> {
    let mut draft = ListingDraft::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| invalid_input_error(&format!("Malformed form data: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| invalid_input_error(&format!("Could not read image: {}", e)))?;
            image = Some(ImageUpload {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| invalid_input_error(&format!("Could not read field '{}': {}", name, e)))?;
        let optional = || Some(value.clone()).filter(|v| !v.trim().is_empty());
        match name.as_str() {
            "name" => draft.name = value.trim().to_string(),
            "type" => draft.listing_type = optional(),
            "notes" => draft.notes = optional(),
            "storeId" => draft.store_id = optional(),
            "note" => draft.note = optional(),
            other => log::warn!("⚠️ Ignoring unknown form field '{}'", other),
        }
    }

    Ok((draft, image))
}

async fn list_listings(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<ListingResponse>>>, AppError> {
    let controller = ListingController::new(state);
    let response = controller.list().await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ListingResponse>>, AppError> {
    let controller = ListingController::new(state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn create_listing(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ListingResponse>>, AppError> {
    let (draft, image) = read_form(multipart).await?;
    let controller = ListingController::new(state);
    let response = controller.create(draft, image).await?;
    Ok(Json(response))
}

async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ListingResponse>>, AppError> {
    let (draft, image) = read_form(multipart).await?;
    let controller = ListingController::new(state);
    let response = controller.update(id, draft, image).await?;
    Ok(Json(response))
}

async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ListingController::new(state);
    let response = controller.delete(id, query.confirm).await?;
    Ok(Json(response))
}
