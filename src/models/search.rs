use serde::{Deserialize, Serialize};

/// Candidato devuelto por el servicio de geocodificación.
/// lat/lon llegan como texto y se validan al seleccionarlos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}
