//! Modelo de Route
//!
//! Rutas derivadas de los pedidos activos y la escena que consume
//! la superficie del mapa.

use serde::Serialize;

use super::geo::{CoordinateError, GeoCoordinate, Rgb};

/// Ruta dibujable: línea inicio-fin con marcador en el punto medio
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Posición 1-based dentro de las rutas que sobrevivieron al filtrado
    pub label: usize,
    pub start: GeoCoordinate,
    pub end: GeoCoordinate,
    pub color: Rgb,
    pub label_midpoint: GeoCoordinate,
}

/// Qué extremo de la fila falló
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteEndpoint {
    Start,
    End,
    /// La fila entera no decodifica
    Row,
}

/// Fila excluida del render con su índice original
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRejection {
    pub index: usize,
    pub endpoint: RouteEndpoint,
    pub reason: String,
}

impl RouteRejection {
    pub fn new(index: usize, endpoint: RouteEndpoint, error: &CoordinateError) -> Self {
        Self {
            index,
            endpoint,
            reason: error.to_string(),
        }
    }
}

/// Resultado de una pasada de render
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderPass {
    pub routes: Vec<Route>,
    pub rejected: Vec<RouteRejection>,
}

/// Segmento coloreado
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSegment {
    pub from: GeoCoordinate,
    pub to: GeoCoordinate,
    pub color: Rgb,
}

/// Marcador con etiqueta
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub position: GeoCoordinate,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
}

/// Todo lo que la superficie del mapa necesita para redibujar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub center: GeoCoordinate,
    pub zoom: u8,
    pub segments: Vec<MapSegment>,
    pub markers: Vec<MapMarker>,
    pub current_location: MapMarker,
}
