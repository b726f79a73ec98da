//! Gateway de datos remoto
//!
//! Única puerta hacia el backend-as-a-service: consultas filtradas,
//! conteos, insert/update/delete y storage de objetos. Las filas viajan
//! como `serde_json::Value`; los repositorios las tipan.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Errores del gateway remoto
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode backend response: {0}")]
    Decode(String),

    #[error("backend response carried no row count")]
    MissingCount,

    #[error("{0} not found")]
    NotFound(String),

    #[error("simulated failure in {0}")]
    Injected(GatewayOp),
}

/// Operaciones del gateway, usadas en el journal del fake y en logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOp {
    Select,
    Count,
    Insert,
    Update,
    Delete,
    UploadObject,
    RemoveObject,
}

impl fmt::Display for GatewayOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GatewayOp::Select => "select",
            GatewayOp::Count => "count",
            GatewayOp::Insert => "insert",
            GatewayOp::Update => "update",
            GatewayOp::Delete => "delete",
            GatewayOp::UploadObject => "upload_object",
            GatewayOp::RemoveObject => "remove_object",
        };
        f.write_str(name)
    }
}

/// Predicado sobre una columna
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    Eq(String),
    In(Vec<String>),
    NotIn(Vec<String>),
    Gte(String),
    Lte(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
}

impl Filter {
    pub fn eq(column: &str, value: impl ToString) -> Self {
        Self { column: column.to_string(), op: FilterOp::Eq(value.to_string()) }
    }

    pub fn is_in<S: ToString>(column: &str, values: &[S]) -> Self {
        Self {
            column: column.to_string(),
            op: FilterOp::In(values.iter().map(|v| v.to_string()).collect()),
        }
    }

    pub fn not_in<S: ToString>(column: &str, values: &[S]) -> Self {
        Self {
            column: column.to_string(),
            op: FilterOp::NotIn(values.iter().map(|v| v.to_string()).collect()),
        }
    }

    pub fn gte(column: &str, value: impl ToString) -> Self {
        Self { column: column.to_string(), op: FilterOp::Gte(value.to_string()) }
    }

    pub fn lte(column: &str, value: impl ToString) -> Self {
        Self { column: column.to_string(), op: FilterOp::Lte(value.to_string()) }
    }
}

/// Capacidades que el panel consume del backend
#[async_trait]
pub trait DataGateway: Send + Sync {
    async fn select(&self, table: &str, columns: &str, filters: &[Filter]) -> Result<Vec<Value>, GatewayError>;

    async fn count(&self, table: &str, filters: &[Filter]) -> Result<u64, GatewayError>;

    /// Devuelve el registro con el id asignado por el backend
    async fn insert(&self, table: &str, record: Value) -> Result<Value, GatewayError>;

    async fn update(&self, table: &str, id: i64, patch: Value) -> Result<(), GatewayError>;

    async fn delete(&self, table: &str, id: i64) -> Result<(), GatewayError>;

    async fn upload_object(
        &self,
        bucket: &str,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), GatewayError>;

    async fn remove_object(&self, bucket: &str, name: &str) -> Result<(), GatewayError>;

    fn public_url(&self, bucket: &str, name: &str) -> String;
}
