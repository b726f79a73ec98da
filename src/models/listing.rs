//! Modelo de anuncios / servicios
//!
//! Registros con una imagen asociada guardada en el storage remoto.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registro tal como vive en la tabla de servicios.
/// `id` lo asigna el backend al insertar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceListing {
    pub id: i64,
    #[serde(rename = "type")]
    pub listing_type: String,
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "fileType", default)]
    pub file_type: Option<String>,
    #[serde(rename = "storedFileName", default)]
    pub stored_file_name: Option<String>,
    #[serde(rename = "storeId", default)]
    pub store_id: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Campos editables de un anuncio, antes de tener id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ListingDraft {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[serde(rename = "type", default)]
    pub listing_type: Option<String>,

    #[validate(length(max = 2000))]
    #[serde(default)]
    pub notes: Option<String>,

    #[serde(rename = "storeId", default)]
    pub store_id: Option<String>,

    #[validate(length(max = 2000))]
    #[serde(default)]
    pub note: Option<String>,
}

/// Imagen elegida por el usuario
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Registro que se envía en insert/update
#[derive(Debug, Clone, Serialize)]
pub struct ListingRecord {
    #[serde(rename = "type")]
    pub listing_type: String,
    pub name: String,
    pub notes: Option<String>,
    #[serde(rename = "fileType")]
    pub file_type: Option<String>,
    #[serde(rename = "storedFileName")]
    pub stored_file_name: Option<String>,
    #[serde(rename = "storeId")]
    pub store_id: Option<String>,
    pub note: Option<String>,
}
