//! Controladores
//!
//! Cada controlador ejecuta la operación remota a través de su servicio
//! y despacha el evento resultante a la vista correspondiente.

pub mod dashboard_controller;
pub mod directory_controller;
pub mod geocoding_controller;
pub mod listing_controller;
pub mod map_controller;

pub use dashboard_controller::DashboardController;
pub use directory_controller::DirectoryController;
pub use geocoding_controller::GeocodingController;
pub use listing_controller::ListingController;
pub use map_controller::MapController;
