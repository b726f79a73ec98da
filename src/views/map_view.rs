//! Vista del mapa
//!
//! Centro actual, rutas de los pedidos activos y candidatos de búsqueda.

use serde::Serialize;

use super::Notice;
use crate::models::{GeoCoordinate, MapScene, RenderPass, Route, RouteRejection, SearchResult};
use crate::services::route_view_service::build_scene;

pub const NO_ROUTES_NOTICE: &str = "No active routes available";
pub const NO_RESULTS_NOTICE: &str = "No results found";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: GeoCoordinate,
    pub zoom: u8,
    pub show_active_orders: bool,
    pub routes: Vec<Route>,
    pub rejected: Vec<RouteRejection>,
    pub candidates: Vec<SearchResult>,
    pub loading: bool,
    pub searching: bool,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    ActiveOrdersToggled(bool),
    RoutesRequested,
    RoutesLoaded(RenderPass),
    RoutesFailed(String),
    SearchStarted,
    SearchRejected(String),
    SearchCompleted(Vec<SearchResult>),
    SearchFailed(String),
    CandidateSelected(GeoCoordinate),
    SelectionRejected(String),
    Recentered(GeoCoordinate),
}

impl MapView {
    pub fn new(center: GeoCoordinate, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            show_active_orders: false,
            routes: Vec::new(),
            rejected: Vec::new(),
            candidates: Vec::new(),
            loading: false,
            searching: false,
            notice: None,
        }
    }

    pub fn apply(mut self, event: MapEvent) -> Self {
        match event {
            MapEvent::ActiveOrdersToggled(enabled) => {
                self.show_active_orders = enabled;
                self.notice = None;
                if !enabled {
                    self.routes.clear();
                    self.rejected.clear();
                    self.loading = false;
                }
            }
            MapEvent::RoutesRequested => {
                self.loading = true;
                self.notice = None;
            }
            MapEvent::RoutesLoaded(pass) => {
                self.loading = false;
                // el overlay se apagó mientras la carga estaba en curso
                if !self.show_active_orders {
                    return self;
                }
                self.notice = if pass.routes.is_empty() {
                    Some(Notice::info(NO_ROUTES_NOTICE))
                } else if !pass.rejected.is_empty() {
                    Some(Notice::warning(format!(
                        "{} orders were skipped because of invalid coordinates",
                        pass.rejected.len()
                    )))
                } else {
                    None
                };
                self.routes = pass.routes;
                self.rejected = pass.rejected;
            }
            MapEvent::RoutesFailed(message) => {
                self.loading = false;
                self.notice = Some(Notice::error(message));
            }
            MapEvent::SearchStarted => {
                self.searching = true;
                self.notice = None;
            }
            MapEvent::SearchRejected(message) | MapEvent::SelectionRejected(message) => {
                self.searching = false;
                self.notice = Some(Notice::warning(message));
            }
            MapEvent::SearchCompleted(results) => {
                self.searching = false;
                self.notice = if results.is_empty() {
                    Some(Notice::info(NO_RESULTS_NOTICE))
                } else {
                    None
                };
                self.candidates = results;
            }
            MapEvent::SearchFailed(message) => {
                self.searching = false;
                self.notice = Some(Notice::error(message));
            }
            MapEvent::CandidateSelected(center) => {
                self.center = center;
                self.candidates.clear();
                self.notice = None;
            }
            MapEvent::Recentered(center) => {
                self.center = center;
            }
        }
        self
    }

    pub fn scene(&self) -> MapScene {
        build_scene(self.center, self.zoom, &self.routes)
    }
}
