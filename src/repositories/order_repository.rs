use std::sync::Arc;

use super::decode_each;
use super::gateway::{DataGateway, Filter, GatewayError};
use crate::models::order::{CANCELED_STATUS, COMPLETED_STATUSES, ORDER_MAP_COLUMNS, TERMINAL_STATUSES};
use crate::models::{DateRange, RawOrder};

/// Columna de marca temporal usada por los conteos
pub const START_TIME_COLUMN: &str = "start_time";

/// Fila de pedido en su posición original; `Err` si no decodifica
pub type OrderRow = Result<RawOrder, String>;

#[derive(Clone)]
pub struct OrderRepository {
    gateway: Arc<dyn DataGateway>,
    table: String,
}

impl OrderRepository {
    pub fn new(gateway: Arc<dyn DataGateway>, table: &str) -> Self {
        Self {
            gateway,
            table: table.to_string(),
        }
    }

    /// Pedidos cuyo estado no es terminal, fila por fila
    pub async fn find_active(&self) -> Result<Vec<OrderRow>, GatewayError> {
        let rows = self
            .gateway
            .select(
                &self.table,
                ORDER_MAP_COLUMNS,
                &[Filter::not_in("status", &TERMINAL_STATUSES)],
            )
            .await?;
        Ok(decode_each(rows))
    }

    pub async fn count_incomplete(&self, range: DateRange) -> Result<u64, GatewayError> {
        let mut filters = vec![Filter::not_in("status", &TERMINAL_STATUSES)];
        filters.extend(range_filters(range));
        self.gateway.count(&self.table, &filters).await
    }

    pub async fn count_completed(&self, range: DateRange) -> Result<u64, GatewayError> {
        let mut filters = vec![Filter::is_in("status", &COMPLETED_STATUSES)];
        filters.extend(range_filters(range));
        self.gateway.count(&self.table, &filters).await
    }

    pub async fn count_canceled(&self, range: DateRange) -> Result<u64, GatewayError> {
        let mut filters = vec![Filter::eq("status", CANCELED_STATUS)];
        filters.extend(range_filters(range));
        self.gateway.count(&self.table, &filters).await
    }
}

fn range_filters(range: DateRange) -> [Filter; 2] {
    [
        Filter::gte(START_TIME_COLUMN, range.start_ms),
        Filter::lte(START_TIME_COLUMN, range.end_ms),
    ]
}
