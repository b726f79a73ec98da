//! Clients - HTTP Clients for External APIs
//!
//! This module contains HTTP clients for the backend-as-a-service and
//! the geocoding service.

pub mod nominatim_client;
pub mod supabase_client;

// Re-export main types for convenience
pub use nominatim_client::{Geocoder, GeocodingError, NominatimClient};
pub use supabase_client::SupabaseGateway;
