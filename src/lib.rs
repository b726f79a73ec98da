//! Delivery Dashboard
//!
//! Backend del panel de administración: mapa de pedidos activos,
//! búsqueda de lugares, conteo de pedidos por rango de fechas,
//! anuncios con imagen y directorio de capitanes.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;

pub use routes::create_app;
pub use state::AppState;
