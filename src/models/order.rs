//! Modelo de pedidos de entrega
//!
//! Proyección de solo lectura de la tabla de pedidos que consumen
//! el mapa y el contador de pedidos.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Estados terminales de un pedido
pub const TERMINAL_STATUSES: [&str; 3] = ["cancel", "end", "finish"];

/// Estados que cuentan como pedido completado
pub const COMPLETED_STATUSES: [&str; 2] = ["finish", "end"];

/// Estado que cuenta como pedido cancelado
pub const CANCELED_STATUS: &str = "cancel";

/// Estado del pedido; cualquier valor no terminal es una variante activa
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Cancel,
    End,
    Finish,
    Active(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Cancel => "cancel",
            OrderStatus::End => "end",
            OrderStatus::Finish => "finish",
            OrderStatus::Active(status) => status,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "cancel" => OrderStatus::Cancel,
            "end" => OrderStatus::End,
            "finish" => OrderStatus::Finish,
            _ => OrderStatus::Active(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fila cruda tal como llega del backend: puntos como texto `"lat,lon"`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOrder {
    #[serde(default)]
    pub start_point: Option<String>,
    #[serde(default)]
    pub end_point: Option<String>,
    pub status: OrderStatus,
}

/// Columnas que pide el mapa
pub const ORDER_MAP_COLUMNS: &str = "start_point,end_point,status";
