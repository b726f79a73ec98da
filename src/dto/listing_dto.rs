use serde::{Deserialize, Serialize};

use crate::models::ServiceListing;

#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

// Response de anuncio con la URL pública de su imagen
#[derive(Debug, Serialize)]
pub struct ListingResponse {
    #[serde(flatten)]
    pub listing: ServiceListing,
    pub image_url: Option<String>,
    pub busy: bool,
}
