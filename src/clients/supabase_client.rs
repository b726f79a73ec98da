//! Cliente HTTP para Supabase (PostgREST + Storage)
//!
//! Implementación real del `DataGateway`. Todas las llamadas llevan la
//! anon key en `apikey` y `Authorization`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

use crate::repositories::gateway::{DataGateway, Filter, FilterOp, GatewayError};

/// Cliente HTTP para el backend-as-a-service
pub struct SupabaseGateway {
    pub client: Client,
    pub base_url: String,
    api_key: String,
}

impl SupabaseGateway {
    /// Crear nuevo cliente con URL base y anon key
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn object_url(&self, bucket: &str, name: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            bucket,
            urlencoding::encode(name)
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn check(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// Par `columna=operador.valor` en sintaxis PostgREST
pub fn filter_query_pair(filter: &Filter) -> (String, String) {
    let value = match &filter.op {
        FilterOp::Eq(v) => format!("eq.{}", v),
        FilterOp::In(values) => format!("in.({})", values.join(",")),
        FilterOp::NotIn(values) => format!("not.in.({})", values.join(",")),
        FilterOp::Gte(v) => format!("gte.{}", v),
        FilterOp::Lte(v) => format!("lte.{}", v),
    };
    (filter.column.clone(), value)
}

fn query_pairs(filters: &[Filter]) -> Vec<(String, String)> {
    filters.iter().map(filter_query_pair).collect()
}

/// Total de `Content-Range: 0-9/42` o `*/0`
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    header.rsplit('/').next()?.trim().parse().ok()
}

#[async_trait]
impl DataGateway for SupabaseGateway {
    async fn select(&self, table: &str, columns: &str, filters: &[Filter]) -> Result<Vec<Value>, GatewayError> {
        log::debug!("📡 select {} ({} filters)", table, filters.len());
        let response = self
            .authorized(self.client.get(self.rest_url(table)))
            .query(&[("select", columns)])
            .query(&query_pairs(filters))
            .send()
            .await?;
        let response = Self::check(response).await?;
        let rows: Vec<Value> = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(rows)
    }

    async fn count(&self, table: &str, filters: &[Filter]) -> Result<u64, GatewayError> {
        log::debug!("📡 count {} ({} filters)", table, filters.len());
        let response = self
            .authorized(self.client.head(self.rest_url(table)))
            .header("Prefer", "count=exact")
            .query(&[("select", "*")])
            .query(&query_pairs(filters))
            .send()
            .await?;
        let response = Self::check(response).await?;
        response
            .headers()
            .get("content-range")
            .and_then(|h| h.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or(GatewayError::MissingCount)
    }

    async fn insert(&self, table: &str, record: Value) -> Result<Value, GatewayError> {
        let response = self
            .authorized(self.client.post(self.rest_url(table)))
            .header("Prefer", "return=representation")
            .json(&record)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let mut rows: Vec<Value> = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        if rows.is_empty() {
            return Err(GatewayError::Decode("insert returned no rows".to_string()));
        }
        Ok(rows.swap_remove(0))
    }

    async fn update(&self, table: &str, id: i64, patch: Value) -> Result<(), GatewayError> {
        let response = self
            .authorized(self.client.patch(self.rest_url(table)))
            .query(&[filter_query_pair(&Filter::eq("id", id))])
            .json(&patch)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, table: &str, id: i64) -> Result<(), GatewayError> {
        let response = self
            .authorized(self.client.delete(self.rest_url(table)))
            .query(&[filter_query_pair(&Filter::eq("id", id))])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn upload_object(
        &self,
        bucket: &str,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), GatewayError> {
        log::info!("📤 Uploading {} bytes to {}/{}", bytes.len(), bucket, name);
        let response = self
            .authorized(self.client.post(self.object_url(bucket, name)))
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn remove_object(&self, bucket: &str, name: &str) -> Result<(), GatewayError> {
        let response = self
            .authorized(self.client.delete(self.object_url(bucket, name)))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    fn public_url(&self, bucket: &str, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            bucket,
            urlencoding::encode(name)
        )
    }
}
