//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean las filas
//! remotas y las entidades derivadas para el panel.

pub mod analytics;
pub mod captain;
pub mod geo;
pub mod listing;
pub mod order;
pub mod route;
pub mod search;

pub use analytics::{DateRange, OrderCountSummary, RangePreset};
pub use captain::Captain;
pub use geo::{CoordinateError, GeoCoordinate, Rgb};
pub use listing::{ImageUpload, ListingDraft, ListingRecord, ServiceListing};
pub use order::{OrderStatus, RawOrder};
pub use route::{MapMarker, MapScene, MapSegment, RenderPass, Route, RouteEndpoint, RouteRejection};
pub use search::SearchResult;
