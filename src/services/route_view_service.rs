//! Servicio de rutas del mapa
//!
//! Convierte las filas crudas de pedidos en rutas dibujables: valida
//! ambos extremos, asigna color, calcula el punto medio y numera las
//! rutas que sobreviven. Las filas inválidas se descartan y se reportan
//! con su índice original; nunca abortan la pasada.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{
    GeoCoordinate, MapMarker, MapScene, MapSegment, RawOrder, RenderPass, Rgb, Route, RouteEndpoint,
    RouteRejection,
};
use crate::repositories::order_repository::{OrderRepository, OrderRow};
use crate::utils::errors::AppResult;
use crate::utils::validation::parse_coordinate_pair;

/// Zoom fijo al recentrar
pub const DEFAULT_ZOOM: u8 = 13;

/// Etiqueta del marcador de posición actual
pub const CURRENT_LOCATION_LABEL: &str = "Current location";

/// Cómo se elige el color de cada ruta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorStrategy {
    /// Derivado de inicio+fin: estable entre refrescos
    #[default]
    Stable,
    /// Sorteo nuevo en cada pasada
    Random,
}

impl std::str::FromStr for ColorStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stable" => Ok(ColorStrategy::Stable),
            "random" => Ok(ColorStrategy::Random),
            other => Err(format!("unknown route color strategy '{}'", other)),
        }
    }
}

/// Color estable: primeros tres bytes del MD5 de los extremos
pub fn stable_color(start: &GeoCoordinate, end: &GeoCoordinate) -> Rgb {
    let digest = md5::compute(format!("{}->{}", start, end));
    Rgb::new(digest[0], digest[1], digest[2])
}

pub fn random_color<R: Rng>(rng: &mut R) -> Rgb {
    Rgb::new(rng.gen(), rng.gen(), rng.gen())
}

fn parse_endpoint(
    index: usize,
    endpoint: RouteEndpoint,
    value: Option<&str>,
) -> Result<GeoCoordinate, RouteRejection> {
    let component = match endpoint {
        RouteEndpoint::Start => "start_point",
        RouteEndpoint::End => "end_point",
        RouteEndpoint::Row => "row",
    };
    let value = value.ok_or_else(|| RouteRejection {
        index,
        endpoint,
        reason: format!("missing {}", component),
    })?;
    parse_coordinate_pair(value).map_err(|e| RouteRejection::new(index, endpoint, &e))
}

fn parse_order(index: usize, order: &RawOrder) -> Result<(GeoCoordinate, GeoCoordinate), RouteRejection> {
    let start = parse_endpoint(index, RouteEndpoint::Start, order.start_point.as_deref())?;
    let end = parse_endpoint(index, RouteEndpoint::End, order.end_point.as_deref())?;
    Ok((start, end))
}

/// Una pasada de render con el generador dado
pub fn build_routes_with<R: Rng>(orders: &[OrderRow], strategy: ColorStrategy, rng: &mut R) -> RenderPass {
    let mut pass = RenderPass::default();

    for (index, row) in orders.iter().enumerate() {
        let endpoints = match row {
            Ok(order) => parse_order(index, order),
            Err(reason) => Err(RouteRejection {
                index,
                endpoint: RouteEndpoint::Row,
                reason: format!("malformed row: {}", reason),
            }),
        };

        let (start, end) = match endpoints {
            Ok(pair) => pair,
            Err(rejection) => {
                log::warn!(
                    "⚠️ Invalid route coordinates at index {}: {:?} ({})",
                    rejection.index,
                    row,
                    rejection.reason
                );
                pass.rejected.push(rejection);
                continue;
            }
        };

        let color = match strategy {
            ColorStrategy::Stable => stable_color(&start, &end),
            ColorStrategy::Random => random_color(rng),
        };

        pass.routes.push(Route {
            label: pass.routes.len() + 1,
            start,
            end,
            color,
            label_midpoint: start.midpoint(&end),
        });
    }

    if !pass.rejected.is_empty() {
        log::info!(
            "🗺️ Built {} routes, skipped {} invalid rows",
            pass.routes.len(),
            pass.rejected.len()
        );
    }
    pass
}

pub fn build_routes(orders: &[OrderRow], strategy: ColorStrategy) -> RenderPass {
    build_routes_with(orders, strategy, &mut rand::thread_rng())
}

/// Carga de pedidos activos + pasada de render
#[derive(Clone)]
pub struct RouteViewService {
    orders: OrderRepository,
    strategy: ColorStrategy,
}

impl RouteViewService {
    pub fn new(orders: OrderRepository, strategy: ColorStrategy) -> Self {
        Self { orders, strategy }
    }

    pub async fn load_routes(&self) -> AppResult<RenderPass> {
        let orders = self.orders.find_active().await.map_err(|e| {
            log::error!("❌ Error fetching active orders: {}", e);
            e
        })?;
        log::info!("🚚 Fetched {} active orders", orders.len());
        Ok(build_routes(&orders, self.strategy))
    }
}

/// Escena para la superficie del mapa
pub fn build_scene(center: GeoCoordinate, zoom: u8, routes: &[Route]) -> MapScene {
    let segments = routes
        .iter()
        .map(|route| MapSegment {
            from: route.start,
            to: route.end,
            color: route.color,
        })
        .collect();

    let markers = routes
        .iter()
        .map(|route| MapMarker {
            position: route.label_midpoint,
            label: route.label.to_string(),
            color: Some(route.color),
        })
        .collect();

    MapScene {
        center,
        zoom,
        segments,
        markers,
        current_location: MapMarker {
            position: center,
            label: CURRENT_LOCATION_LABEL.to_string(),
            color: None,
        },
    }
}
