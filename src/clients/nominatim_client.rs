//! Cliente de geocodificación (Nominatim / OpenStreetMap)
//!
//! Búsqueda de lugares por texto libre, acotada a un país.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::models::SearchResult;

#[derive(Error, Debug)]
pub enum GeocodingError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("geocoding service returned {0}")]
    Status(u16),

    #[error("could not parse geocoding response: {0}")]
    Decode(String),
}

/// Servicio externo de búsqueda de lugares
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search(&self, text: &str) -> Result<Vec<SearchResult>, GeocodingError>;
}

pub struct NominatimClient {
    client: Client,
    base_url: String,
    country_code: String,
}

impl NominatimClient {
    pub fn new(base_url: &str, country_code: &str, timeout: Duration) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("DeliveryDashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            country_code: country_code.to_string(),
        })
    }

    pub fn search_url(&self, text: &str) -> String {
        format!(
            "{}/search?format=json&q={}&countrycodes={}",
            self.base_url,
            urlencoding::encode(text),
            self.country_code
        )
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn search(&self, text: &str) -> Result<Vec<SearchResult>, GeocodingError> {
        let url = self.search_url(text);
        log::info!("🗺️ Geocoding search: {}", text);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        log::info!("📡 Response status: {}", status);

        if !status.is_success() {
            log::error!("❌ Geocoding failed with status {}", status);
            return Err(GeocodingError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let results: Vec<SearchResult> =
            serde_json::from_str(&body).map_err(|e| GeocodingError::Decode(e.to_string()))?;

        log::info!("✅ Geocoding returned {} candidates", results.len());
        Ok(results)
    }
}
