//! DTOs de la API
//!
//! Estructuras de request/response que viajan por HTTP.

pub mod api_response;
pub mod captain_dto;
pub mod dashboard_dto;
pub mod listing_dto;
pub mod map_dto;

pub use api_response::ApiResponse;
