//! Repositorios
//!
//! Acceso tipado a las tablas remotas a través del `DataGateway`.

pub mod captain_repository;
pub mod gateway;
pub mod listing_repository;
pub mod memory_gateway;
pub mod order_repository;

pub use gateway::{DataGateway, Filter, FilterOp, GatewayError, GatewayOp};
pub use memory_gateway::InMemoryGateway;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Tipar cada fila por separado; el resultado conserva la posición original
pub(crate) fn decode_each<T: DeserializeOwned>(rows: Vec<Value>) -> Vec<Result<T, String>> {
    rows.into_iter()
        .map(|row| serde_json::from_value::<T>(row).map_err(|e| e.to_string()))
        .collect()
}

/// Tipar filas; las que no decodifican se descartan y se registran
pub(crate) fn decode_rows<T: DeserializeOwned>(table: &str, rows: Vec<Value>) -> Vec<T> {
    decode_each(rows)
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match row {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("⚠️ Skipping malformed {} row at index {}: {}", table, index, e);
                None
            }
        })
        .collect()
}
