//! Gateway en memoria
//!
//! Backend falso para tests y para desarrollo sin conexión
//! (`DATA_BACKEND=memory`). Evalúa los mismos filtros que PostgREST,
//! guarda un journal de llamadas y permite inyectar fallos por operación.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use super::gateway::{DataGateway, Filter, FilterOp, GatewayError, GatewayOp};

/// Llamada registrada en el journal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCall {
    pub op: GatewayOp,
    pub target: String,
}

#[derive(Debug, Default)]
struct Inner {
    tables: HashMap<String, Vec<Value>>,
    objects: HashMap<String, (Vec<u8>, String)>,
    next_id: i64,
    calls: Vec<GatewayCall>,
    failing: HashSet<GatewayOp>,
}

#[derive(Debug, Default)]
pub struct InMemoryGateway {
    inner: Mutex<Inner>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                ..Default::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cargar filas en una tabla (sin pasar por el journal)
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        let mut inner = self.lock();
        for row in &rows {
            if let Some(id) = row.get("id").and_then(Value::as_i64) {
                inner.next_id = inner.next_id.max(id + 1);
            }
        }
        inner.tables.entry(table.to_string()).or_default().extend(rows);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock().tables.get(table).cloned().unwrap_or_default()
    }

    pub fn object(&self, bucket: &str, name: &str) -> Option<Vec<u8>> {
        self.lock()
            .objects
            .get(&object_key(bucket, name))
            .map(|(bytes, _)| bytes.clone())
    }

    pub fn object_count(&self) -> usize {
        self.lock().objects.len()
    }

    /// Hacer fallar todas las llamadas de esa operación
    pub fn fail_on(&self, op: GatewayOp) {
        self.lock().failing.insert(op);
    }

    pub fn recover(&self, op: GatewayOp) {
        self.lock().failing.remove(&op);
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.lock().calls.clone()
    }

    pub fn calls_of(&self, op: GatewayOp) -> usize {
        self.lock().calls.iter().filter(|call| call.op == op).count()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn record(&self, op: GatewayOp, target: &str) -> Result<MutexGuard<'_, Inner>, GatewayError> {
        let mut inner = self.lock();
        inner.calls.push(GatewayCall {
            op,
            target: target.to_string(),
        });
        if inner.failing.contains(&op) {
            return Err(GatewayError::Injected(op));
        }
        Ok(inner)
    }
}

fn object_key(bucket: &str, name: &str) -> String {
    format!("{}/{}", bucket, name)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn compare_text(left: &str, right: &str) -> Ordering {
    match (left.parse::<f64>(), right.parse::<f64>()) {
        (Ok(l), Ok(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
        _ => left.cmp(right),
    }
}

/// NULL o columna ausente nunca cumplen un predicado, como en SQL
pub fn row_matches(row: &Value, filter: &Filter) -> bool {
    let value = match row.get(&filter.column) {
        Some(v) if !v.is_null() => value_text(v),
        _ => return false,
    };
    match &filter.op {
        FilterOp::Eq(expected) => compare_text(&value, expected) == Ordering::Equal,
        FilterOp::In(set) => set.contains(&value),
        FilterOp::NotIn(set) => !set.contains(&value),
        FilterOp::Gte(bound) => compare_text(&value, bound) != Ordering::Less,
        FilterOp::Lte(bound) => compare_text(&value, bound) != Ordering::Greater,
    }
}

fn project(row: &Value, columns: &str) -> Value {
    let columns = columns.trim();
    if columns.is_empty() || columns == "*" {
        return row.clone();
    }
    let mut out = Map::new();
    for column in columns.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        if let Some(value) = row.get(column) {
            out.insert(column.to_string(), value.clone());
        }
    }
    Value::Object(out)
}

fn row_id(row: &Value) -> Option<i64> {
    row.get("id").and_then(Value::as_i64)
}

#[async_trait]
impl DataGateway for InMemoryGateway {
    async fn select(&self, table: &str, columns: &str, filters: &[Filter]) -> Result<Vec<Value>, GatewayError> {
        let inner = self.record(GatewayOp::Select, table)?;
        let rows = inner
            .tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| filters.iter().all(|f| row_matches(row, f)))
                    .map(|row| project(row, columns))
                    .collect()
            })
            .unwrap_or_default();
        Ok(rows)
    }

    async fn count(&self, table: &str, filters: &[Filter]) -> Result<u64, GatewayError> {
        let inner = self.record(GatewayOp::Count, table)?;
        let count = inner
            .tables
            .get(table)
            .map(|rows| rows.iter().filter(|row| filters.iter().all(|f| row_matches(row, f))).count())
            .unwrap_or(0);
        Ok(count as u64)
    }

    async fn insert(&self, table: &str, record: Value) -> Result<Value, GatewayError> {
        let mut inner = self.record(GatewayOp::Insert, table)?;
        let mut object = match record {
            Value::Object(map) => map,
            other => return Err(GatewayError::Decode(format!("insert expects an object, got {}", other))),
        };
        let id = inner.next_id;
        inner.next_id += 1;
        object.insert("id".to_string(), Value::from(id));
        let row = Value::Object(object);
        inner.tables.entry(table.to_string()).or_default().push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: &str, id: i64, patch: Value) -> Result<(), GatewayError> {
        let mut inner = self.record(GatewayOp::Update, table)?;
        let patch = match patch {
            Value::Object(map) => map,
            other => return Err(GatewayError::Decode(format!("update expects an object, got {}", other))),
        };
        let row = inner
            .tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|row| row_id(row) == Some(id)))
            .ok_or_else(|| GatewayError::NotFound(format!("{} row {}", table, id)))?;
        if let Value::Object(existing) = row {
            for (key, value) in patch {
                if key != "id" {
                    existing.insert(key, value);
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, table: &str, id: i64) -> Result<(), GatewayError> {
        let mut inner = self.record(GatewayOp::Delete, table)?;
        let rows = inner
            .tables
            .get_mut(table)
            .ok_or_else(|| GatewayError::NotFound(format!("{} row {}", table, id)))?;
        let before = rows.len();
        rows.retain(|row| row_id(row) != Some(id));
        if rows.len() == before {
            return Err(GatewayError::NotFound(format!("{} row {}", table, id)));
        }
        Ok(())
    }

    async fn upload_object(
        &self,
        bucket: &str,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), GatewayError> {
        let key = object_key(bucket, name);
        let mut inner = self.record(GatewayOp::UploadObject, &key)?;
        inner.objects.insert(key, (bytes, content_type.to_string()));
        Ok(())
    }

    async fn remove_object(&self, bucket: &str, name: &str) -> Result<(), GatewayError> {
        let key = object_key(bucket, name);
        let mut inner = self.record(GatewayOp::RemoveObject, &key)?;
        inner
            .objects
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| GatewayError::NotFound(format!("object {}", key)))
    }

    fn public_url(&self, bucket: &str, name: &str) -> String {
        format!("memory://{}/{}", bucket, name)
    }
}
