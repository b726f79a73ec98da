use std::sync::Arc;

use super::decode_rows;
use super::gateway::{DataGateway, Filter, GatewayError};
use crate::models::{ListingRecord, ServiceListing};

#[derive(Clone)]
pub struct ListingRepository {
    gateway: Arc<dyn DataGateway>,
    table: String,
    bucket: String,
}

impl ListingRepository {
    pub fn new(gateway: Arc<dyn DataGateway>, table: &str, bucket: &str) -> Self {
        Self {
            gateway,
            table: table.to_string(),
            bucket: bucket.to_string(),
        }
    }

    pub async fn find_by_type(&self, listing_type: &str) -> Result<Vec<ServiceListing>, GatewayError> {
        let rows = self
            .gateway
            .select(&self.table, "*", &[Filter::eq("type", listing_type)])
            .await?;
        Ok(decode_rows(&self.table, rows))
    }

    /// Inserta y devuelve el registro con el id asignado por el backend
    pub async fn create(&self, record: &ListingRecord) -> Result<ServiceListing, GatewayError> {
        let payload = serde_json::to_value(record).map_err(|e| GatewayError::Decode(e.to_string()))?;
        let row = self.gateway.insert(&self.table, payload).await?;
        serde_json::from_value(row).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    pub async fn update(&self, id: i64, record: &ListingRecord) -> Result<(), GatewayError> {
        let payload = serde_json::to_value(record).map_err(|e| GatewayError::Decode(e.to_string()))?;
        self.gateway.update(&self.table, id, payload).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), GatewayError> {
        self.gateway.delete(&self.table, id).await
    }

    pub async fn upload_image(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), GatewayError> {
        self.gateway.upload_object(&self.bucket, name, bytes, content_type).await
    }

    pub async fn remove_image(&self, name: &str) -> Result<(), GatewayError> {
        self.gateway.remove_object(&self.bucket, name).await
    }

    pub fn image_url(&self, name: &str) -> String {
        self.gateway.public_url(&self.bucket, name)
    }
}
