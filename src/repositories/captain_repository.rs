use std::sync::Arc;

use super::decode_rows;
use super::gateway::{DataGateway, GatewayError};
use crate::models::captain::CAPTAIN_COLUMNS;
use crate::models::Captain;

#[derive(Clone)]
pub struct CaptainRepository {
    gateway: Arc<dyn DataGateway>,
    table: String,
}

impl CaptainRepository {
    pub fn new(gateway: Arc<dyn DataGateway>, table: &str) -> Self {
        Self {
            gateway,
            table: table.to_string(),
        }
    }

    pub async fn find_all(&self) -> Result<Vec<Captain>, GatewayError> {
        let rows = self.gateway.select(&self.table, CAPTAIN_COLUMNS, &[]).await?;
        Ok(decode_rows(&self.table, rows))
    }
}
