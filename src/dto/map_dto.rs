use serde::{Deserialize, Serialize};

use crate::models::{MapScene, RouteRejection, SearchResult};
use crate::views::{MapView, Notice};

// Request para el interruptor de pedidos activos
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub enabled: bool,
}

// Request para recentrar el mapa
#[derive(Debug, Deserialize)]
pub struct CenterRequest {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub text: String,
}

/// Texto o número tal como llega del cliente
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CoordinateText {
    Text(String),
    Number(f64),
}

impl CoordinateText {
    pub fn into_text(self) -> String {
        match self {
            CoordinateText::Text(text) => text,
            CoordinateText::Number(value) => value.to_string(),
        }
    }
}

/// Selección por índice en la lista de candidatos o por coordenadas explícitas
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub index: Option<usize>,
    pub lat: Option<CoordinateText>,
    pub lon: Option<CoordinateText>,
}

// Response con el estado del mapa
#[derive(Debug, Serialize)]
pub struct MapStateResponse {
    pub scene: MapScene,
    pub show_active_orders: bool,
    pub loading: bool,
    pub searching: bool,
    pub candidates: Vec<SearchResult>,
    pub rejected: Vec<RouteRejection>,
    pub notice: Option<Notice>,
}

impl From<&MapView> for MapStateResponse {
    fn from(view: &MapView) -> Self {
        Self {
            scene: view.scene(),
            show_active_orders: view.show_active_orders,
            loading: view.loading,
            searching: view.searching,
            candidates: view.candidates.clone(),
            rejected: view.rejected.clone(),
            notice: view.notice.clone(),
        }
    }
}
