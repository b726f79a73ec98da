//! Servicio de anuncios
//!
//! CRUD de anuncios con una imagen por registro. La imagen se sube
//! primero y el registro la referencia después; si el segundo paso falla
//! se elimina el objeto subido. Cada registro admite una sola operación
//! destructiva en curso.

use chrono::Utc;
use validator::Validate;

use crate::models::{ImageUpload, ListingDraft, ListingRecord, ServiceListing};
use crate::repositories::listing_repository::ListingRepository;
use crate::utils::errors::{invalid_input_error, AppError, AppResult};
use crate::utils::single_flight::{FlightGuard, FlightKey, SingleFlight};
use crate::utils::validation::storage_file_name;

/// Mensaje cuando falta la imagen al crear
pub const IMAGE_REQUIRED_NOTICE: &str = "Please select an image for the listing";

#[derive(Clone)]
pub struct ListingService {
    repository: ListingRepository,
    flights: SingleFlight,
    category: String,
}

impl ListingService {
    pub fn new(repository: ListingRepository, category: &str) -> Self {
        Self {
            repository,
            flights: SingleFlight::new(),
            category: category.to_string(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_busy(&self, id: i64) -> bool {
        self.flights.is_busy(FlightKey::Record(id))
    }

    pub fn image_url(&self, listing: &ServiceListing) -> Option<String> {
        listing
            .stored_file_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| self.repository.image_url(name))
    }

    fn begin(&self, key: FlightKey) -> AppResult<FlightGuard> {
        self.flights
            .try_begin(key)
            .ok_or_else(|| AppError::Busy(format!("An operation on {} is already in progress", key)))
    }

    /// Anuncios de la categoría configurada; sin paginación
    pub async fn list(&self) -> AppResult<Vec<ServiceListing>> {
        let listings = self.repository.find_by_type(&self.category).await?;
        log::info!("📋 Loaded {} listings of type '{}'", listings.len(), self.category);
        Ok(listings)
    }

    pub async fn create(&self, draft: ListingDraft, image: Option<ImageUpload>) -> AppResult<ServiceListing> {
        let image = match image {
            Some(image) if !image.is_empty() => image,
            _ => return Err(invalid_input_error(IMAGE_REQUIRED_NOTICE)),
        };
        draft.validate()?;

        let _guard = self.flights.begin_draft();

        let stored_name = self.upload(&image).await?;
        let record = self.record_from(draft, Some(image.content_type), stored_name.clone());

        match self.repository.create(&record).await {
            Ok(listing) => {
                log::info!("✅ Listing {} created with image {}", listing.id, stored_name);
                Ok(listing)
            }
            Err(e) => {
                log::error!("❌ Error inserting listing after upload: {}", e);
                self.compensate(&stored_name).await;
                Err(e.into())
            }
        }
    }

    /// Reemplazo completo del registro; la imagen es opcional
    pub async fn update(
        &self,
        existing: &ServiceListing,
        draft: ListingDraft,
        image: Option<ImageUpload>,
    ) -> AppResult<ServiceListing> {
        draft.validate()?;
        let _guard = self.begin(FlightKey::Record(existing.id))?;

        let new_image = match image.filter(|image| !image.is_empty()) {
            Some(image) => {
                let stored_name = self.upload(&image).await?;
                Some((stored_name, image.content_type))
            }
            None => None,
        };

        let record = match &new_image {
            Some((stored_name, content_type)) => {
                self.record_from(draft, Some(content_type.clone()), Some(stored_name.clone()))
            }
            None => self.record_from(draft, existing.file_type.clone(), existing.stored_file_name.clone()),
        };

        if let Err(e) = self.repository.update(existing.id, &record).await {
            log::error!("❌ Error updating listing {}: {}", existing.id, e);
            if let Some((stored_name, _)) = &new_image {
                self.compensate(stored_name).await;
            }
            return Err(e.into());
        }

        log::info!("✅ Listing {} updated", existing.id);
        Ok(ServiceListing {
            id: existing.id,
            listing_type: record.listing_type,
            name: record.name,
            notes: record.notes,
            file_type: record.file_type,
            stored_file_name: record.stored_file_name,
            store_id: record.store_id,
            note: record.note,
        })
    }

    /// Sin confirmación explícita no se llama al backend
    pub async fn delete(&self, id: i64, confirmed: bool) -> AppResult<()> {
        if !confirmed {
            return Err(AppError::ConfirmationRequired(format!(
                "Deleting listing {} requires confirmation",
                id
            )));
        }
        let _guard = self.begin(FlightKey::Record(id))?;

        self.repository.delete(id).await.map_err(|e| {
            log::error!("❌ Error deleting listing {}: {}", id, e);
            AppError::from(e)
        })?;

        log::info!("🗑️ Listing {} deleted", id);
        Ok(())
    }

    async fn upload(&self, image: &ImageUpload) -> AppResult<String> {
        let stored_name = storage_file_name(Utc::now().timestamp_millis(), &image.file_name);
        self.repository
            .upload_image(&stored_name, image.bytes.clone(), &image.content_type)
            .await
            .map_err(|e| {
                log::error!("❌ Error uploading image {}: {}", stored_name, e);
                AppError::from(e)
            })?;
        Ok(stored_name)
    }

    async fn compensate(&self, stored_name: &str) {
        match self.repository.remove_image(stored_name).await {
            Ok(()) => log::info!("🧹 Removed orphaned image {}", stored_name),
            Err(e) => log::error!("❌ Could not remove orphaned image {}: {}", stored_name, e),
        }
    }

    fn record_from(
        &self,
        draft: ListingDraft,
        file_type: Option<String>,
        stored_file_name: impl Into<Option<String>>,
    ) -> ListingRecord {
        ListingRecord {
            listing_type: draft
                .listing_type
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| self.category.clone()),
            name: draft.name,
            notes: draft.notes,
            file_type,
            stored_file_name: stored_file_name.into(),
            store_id: draft.store_id,
            note: draft.note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{DataGateway, GatewayOp, InMemoryGateway};
    use serde_json::json;
    use std::sync::Arc;

    fn service(gateway: Arc<InMemoryGateway>) -> ListingService {
        let gateway: Arc<dyn DataGateway> = gateway;
        ListingService::new(ListingRepository::new(gateway, "services", "images"), "ads")
    }

    fn draft(name: &str) -> ListingDraft {
        ListingDraft {
            name: name.to_string(),
            notes: Some("weekend offer".to_string()),
            ..Default::default()
        }
    }

    fn image() -> ImageUpload {
        ImageUpload {
            file_name: "banner.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![137, 80, 78, 71],
        }
    }

    #[tokio::test]
    async fn test_create_without_image_makes_no_calls() {
        let gateway = Arc::new(InMemoryGateway::new());
        let err = service(gateway.clone()).create(draft("Promo"), None).await.unwrap_err();
        assert!(err.is_validation());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_uploads_then_inserts() {
        let gateway = Arc::new(InMemoryGateway::new());
        let listing = service(gateway.clone()).create(draft("Promo"), Some(image())).await.unwrap();

        assert_eq!(listing.id, 1);
        assert_eq!(listing.listing_type, "ads");
        assert_eq!(listing.file_type.as_deref(), Some("image/png"));
        let stored = listing.stored_file_name.clone().unwrap();
        assert!(stored.ends_with("_banner.png"));
        assert!(gateway.object("images", &stored).is_some());

        let ops: Vec<GatewayOp> = gateway.calls().iter().map(|c| c.op).collect();
        assert_eq!(ops, vec![GatewayOp::UploadObject, GatewayOp::Insert]);
    }

    #[tokio::test]
    async fn test_failed_upload_skips_insert() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.fail_on(GatewayOp::UploadObject);
        assert!(service(gateway.clone()).create(draft("Promo"), Some(image())).await.is_err());
        assert_eq!(gateway.calls_of(GatewayOp::Insert), 0);
    }

    #[tokio::test]
    async fn test_failed_insert_removes_uploaded_object() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.fail_on(GatewayOp::Insert);
        assert!(service(gateway.clone()).create(draft("Promo"), Some(image())).await.is_err());
        assert_eq!(gateway.calls_of(GatewayOp::RemoveObject), 1);
        assert_eq!(gateway.object_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_draft_is_rejected_locally() {
        let gateway = Arc::new(InMemoryGateway::new());
        let err = service(gateway.clone()).create(draft(""), Some(image())).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_image_reference() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.seed(
            "services",
            vec![json!({ "id": 7, "type": "ads", "name": "Old", "storedFileName": "1_old.png", "fileType": "image/png" })],
        );
        let service = service(gateway.clone());
        let existing = service.list().await.unwrap().remove(0);

        let updated = service.update(&existing, draft("New"), Some(image())).await.unwrap();
        assert_eq!(updated.id, 7);
        assert_eq!(updated.name, "New");
        assert_ne!(updated.stored_file_name, existing.stored_file_name);
        assert_eq!(gateway.rows("services")[0]["storedFileName"], json!(updated.stored_file_name));
    }

    #[tokio::test]
    async fn test_update_without_image_keeps_reference() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.seed(
            "services",
            vec![json!({ "id": 7, "type": "ads", "name": "Old", "storedFileName": "1_old.png" })],
        );
        let service = service(gateway.clone());
        let existing = service.list().await.unwrap().remove(0);

        let updated = service.update(&existing, draft("Renamed"), None).await.unwrap();
        assert_eq!(updated.stored_file_name.as_deref(), Some("1_old.png"));
        assert_eq!(gateway.calls_of(GatewayOp::UploadObject), 0);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.seed("services", vec![json!({ "id": 3, "type": "ads", "name": "Keep" })]);
        let err = service(gateway.clone()).delete(3, false).await.unwrap_err();
        assert!(matches!(err, AppError::ConfirmationRequired(_)));
        assert!(gateway.calls().is_empty());
        assert_eq!(gateway.rows("services").len(), 1);
    }

    #[tokio::test]
    async fn test_guard_released_after_failure() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.seed("services", vec![json!({ "id": 3, "type": "ads", "name": "Keep" })]);
        gateway.fail_on(GatewayOp::Delete);
        let service = service(gateway.clone());

        assert!(service.delete(3, true).await.is_err());
        assert!(!service.is_busy(3));

        gateway.recover(GatewayOp::Delete);
        service.delete(3, true).await.unwrap();
        assert!(gateway.rows("services").is_empty());
    }

    #[tokio::test]
    async fn test_pending_create_does_not_block_another() {
        let gateway = Arc::new(InMemoryGateway::new());
        let service = service(gateway.clone());
        let _pending = service.flights.begin_draft();

        let listing = service.create(draft("Second"), Some(image())).await.unwrap();
        assert_eq!(listing.name, "Second");
        assert_eq!(gateway.rows("services").len(), 1);
    }

    #[tokio::test]
    async fn test_busy_record_rejects_second_operation() {
        let gateway = Arc::new(InMemoryGateway::new());
        let service = service(gateway.clone());
        let _held = service.flights.try_begin(FlightKey::Record(3)).unwrap();

        let err = service.delete(3, true).await.unwrap_err();
        assert!(matches!(err, AppError::Busy(_)));
        assert!(gateway.calls().is_empty());
    }
}
