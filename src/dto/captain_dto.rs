use serde::{Deserialize, Serialize};

use crate::models::Captain;

#[derive(Debug, Default, Deserialize)]
pub struct CaptainQuery {
    #[serde(default)]
    pub q: String,
}

// Response del directorio filtrado
#[derive(Debug, Serialize)]
pub struct CaptainsResponse {
    pub query: String,
    pub total: usize,
    pub captains: Vec<Captain>,
}
