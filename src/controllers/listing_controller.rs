use crate::dto::listing_dto::ListingResponse;
use crate::dto::ApiResponse;
use crate::models::{ImageUpload, ListingDraft, ServiceListing};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};
use crate::views::ListingsEvent;

pub struct ListingController {
    state: AppState,
}

impl ListingController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    async fn dispatch(&self, event: ListingsEvent) {
        let mut view = self.state.listings_view.write().await;
        *view = view.clone().apply(event);
    }

    fn to_response(&self, listing: ServiceListing) -> ListingResponse {
        let service = &self.state.listing_service;
        ListingResponse {
            image_url: service.image_url(&listing),
            busy: service.is_busy(listing.id),
            listing,
        }
    }

    async fn fail(&self, e: AppError) -> AppError {
        self.dispatch(ListingsEvent::OperationFailed(e.user_notice())).await;
        e
    }

    pub async fn list(&self) -> Result<Vec<ListingResponse>, AppError> {
        self.dispatch(ListingsEvent::LoadStarted).await;

        match self.state.listing_service.list().await {
            Ok(listings) => {
                self.dispatch(ListingsEvent::Loaded(listings.clone())).await;
                Ok(listings.into_iter().map(|l| self.to_response(l)).collect())
            }
            Err(e) => {
                self.dispatch(ListingsEvent::LoadFailed(e.user_notice())).await;
                Err(e)
            }
        }
    }

    /// Registro de la colección cargada; si no está, se recarga una vez
    async fn find(&self, id: i64) -> Result<ServiceListing, AppError> {
        if let Some(listing) = self.state.listings_view.read().await.find(id).cloned() {
            return Ok(listing);
        }
        self.list().await?;
        self.state
            .listings_view
            .read()
            .await
            .find(id)
            .cloned()
            .ok_or_else(|| not_found_error("Listing", &id.to_string()))
    }

    /// Abre la vista de detalle
    pub async fn get_by_id(&self, id: i64) -> Result<ListingResponse, AppError> {
        let listing = self.find(id).await?;
        self.dispatch(ListingsEvent::DetailOpened(id)).await;
        Ok(self.to_response(listing))
    }

    pub async fn create(
        &self,
        draft: ListingDraft,
        image: Option<ImageUpload>,
    ) -> Result<ApiResponse<ListingResponse>, AppError> {
        match self.state.listing_service.create(draft, image).await {
            Ok(listing) => {
                self.dispatch(ListingsEvent::Created(listing.clone())).await;
                Ok(ApiResponse::success_with_message(
                    self.to_response(listing),
                    "Listing created successfully".to_string(),
                ))
            }
            Err(e) => Err(self.fail(e).await),
        }
    }

    pub async fn update(
        &self,
        id: i64,
        draft: ListingDraft,
        image: Option<ImageUpload>,
    ) -> Result<ApiResponse<ListingResponse>, AppError> {
        let existing = self.find(id).await?;

        match self.state.listing_service.update(&existing, draft, image).await {
            Ok(listing) => {
                self.dispatch(ListingsEvent::Updated(listing.clone())).await;
                Ok(ApiResponse::success_with_message(
                    self.to_response(listing),
                    "Listing updated successfully".to_string(),
                ))
            }
            Err(e) => Err(self.fail(e).await),
        }
    }

    pub async fn delete(&self, id: i64, confirmed: bool) -> Result<ApiResponse<()>, AppError> {
        match self.state.listing_service.delete(id, confirmed).await {
            Ok(()) => {
                self.dispatch(ListingsEvent::Deleted(id)).await;
                Ok(ApiResponse::message("Listing deleted successfully".to_string()))
            }
            Err(e) => Err(self.fail(e).await),
        }
    }
}
