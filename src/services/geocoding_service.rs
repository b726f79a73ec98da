use std::sync::Arc;

use crate::clients::Geocoder;
use crate::models::{GeoCoordinate, SearchResult};
use crate::utils::errors::{invalid_input_error, AppResult};
use crate::utils::validation::{coordinate_from_strings, validate_search_text};

/// Mensaje cuando el texto de búsqueda está vacío
pub const EMPTY_SEARCH_NOTICE: &str = "Please enter a place to search for";

/// Búsqueda de lugares y selección de candidatos
#[derive(Clone)]
pub struct GeocodingService {
    geocoder: Arc<dyn Geocoder>,
}

impl GeocodingService {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    /// Texto vacío se rechaza sin llamar al servicio; no hay reintentos
    pub async fn search(&self, text: &str) -> AppResult<Vec<SearchResult>> {
        let query = validate_search_text(text).ok_or_else(|| invalid_input_error(EMPTY_SEARCH_NOTICE))?;

        match self.geocoder.search(query).await {
            Ok(results) => Ok(results),
            Err(e) => {
                log::error!("❌ Geocoding search for '{}' failed: {}", query, e);
                Err(e.into())
            }
        }
    }
}

/// Interpretar lat/lon de un candidato
pub fn select_candidate(candidate: &SearchResult) -> AppResult<GeoCoordinate> {
    coordinate_from_strings(&candidate.lat, &candidate.lon).map_err(|e| {
        log::error!(
            "❌ Invalid coordinates selected: {{ lat: {}, lon: {} }} ({})",
            candidate.lat,
            candidate.lon,
            e
        );
        e.into()
    })
}
