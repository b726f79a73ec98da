use serde::{Deserialize, Serialize};

/// Conductor ("capitán"), solo lectura desde el panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Captain {
    pub id: i64,
    #[serde(alias = "user_name")]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

/// Columnas de la tabla de usuarios
pub const CAPTAIN_COLUMNS: &str = "id,user_name,phone";
