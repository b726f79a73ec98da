//! Services module
//!
//! Este módulo contiene la lógica de negocio de cada vista del panel.
//! Los servicios hablan con el backend solo a través de los repositorios.

pub mod directory_service;
pub mod geocoding_service;
pub mod listing_service;
pub mod order_count_service;
pub mod route_view_service;

pub use directory_service::{filter_captains, DirectoryService};
pub use geocoding_service::{select_candidate, GeocodingService};
pub use listing_service::ListingService;
pub use order_count_service::{resolve_preset, OrderCountService};
pub use route_view_service::{build_routes, build_scene, ColorStrategy, RouteViewService};
