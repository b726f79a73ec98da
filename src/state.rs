//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: servicios construidos una sola vez sobre
//! el gateway de datos y el estado de cada vista del panel.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::nominatim_client::Geocoder;
use crate::config::environment::EnvironmentConfig;
use crate::repositories::captain_repository::CaptainRepository;
use crate::repositories::gateway::DataGateway;
use crate::repositories::listing_repository::ListingRepository;
use crate::repositories::order_repository::OrderRepository;
use crate::services::{DirectoryService, GeocodingService, ListingService, OrderCountService, RouteViewService};
use crate::views::{DashboardView, DirectoryView, ListingsView, MapView};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub route_service: Arc<RouteViewService>,
    pub geocoding_service: Arc<GeocodingService>,
    pub count_service: Arc<OrderCountService>,
    pub listing_service: Arc<ListingService>,
    pub directory_service: Arc<DirectoryService>,
    pub map_view: Arc<RwLock<MapView>>,
    pub dashboard_view: Arc<RwLock<DashboardView>>,
    pub listings_view: Arc<RwLock<ListingsView>>,
    pub directory_view: Arc<RwLock<DirectoryView>>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, gateway: Arc<dyn DataGateway>, geocoder: Arc<dyn Geocoder>) -> Self {
        let orders = OrderRepository::new(gateway.clone(), &config.orders_table);
        let listings = ListingRepository::new(gateway.clone(), &config.listings_table, &config.storage_bucket);
        let captains = CaptainRepository::new(gateway, &config.captains_table);

        log::info!(
            "🗺️ Map centered at {} (zoom {}), route colors {:?}",
            config.map_center,
            config.map_zoom,
            config.route_colors
        );

        Self {
            route_service: Arc::new(RouteViewService::new(orders.clone(), config.route_colors)),
            geocoding_service: Arc::new(GeocodingService::new(geocoder)),
            count_service: Arc::new(OrderCountService::new(orders)),
            listing_service: Arc::new(ListingService::new(listings, &config.listing_category)),
            directory_service: Arc::new(DirectoryService::new(captains)),
            map_view: Arc::new(RwLock::new(MapView::new(config.map_center, config.map_zoom))),
            dashboard_view: Arc::new(RwLock::new(DashboardView::default())),
            listings_view: Arc::new(RwLock::new(ListingsView::new(&config.listing_category))),
            directory_view: Arc::new(RwLock::new(DirectoryView::default())),
            config,
        }
    }
}
