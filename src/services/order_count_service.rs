//! Servicio de conteo de pedidos
//!
//! Tres conteos independientes (incompletos, completados, cancelados)
//! sobre el mismo rango de `start_time`. Si cualquiera falla, falla todo.

use chrono::{Datelike, DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone};

use crate::models::{DateRange, OrderCountSummary, RangePreset};
use crate::repositories::order_repository::OrderRepository;
use crate::utils::errors::{invalid_input_error, AppResult};

#[derive(Clone)]
pub struct OrderCountService {
    repository: OrderRepository,
}

impl OrderCountService {
    pub fn new(repository: OrderRepository) -> Self {
        Self { repository }
    }

    /// No valida que `start_ms <= end_ms`
    pub async fn get_counts(&self, range: DateRange) -> AppResult<OrderCountSummary> {
        log::info!("📊 Counting orders between {} and {}", range.start_ms, range.end_ms);

        let result = futures::try_join!(
            self.repository.count_incomplete(range),
            self.repository.count_completed(range),
            self.repository.count_canceled(range),
        );

        match result {
            Ok((incomplete, completed, canceled)) => Ok(OrderCountSummary {
                incomplete,
                completed,
                canceled,
            }),
            Err(e) => {
                log::error!(
                    "❌ Error fetching order counts for [{}, {}]: {}",
                    range.start_ms,
                    range.end_ms,
                    e
                );
                Err(e.into())
            }
        }
    }
}

/// Milisegundos epoch de una hora local; en un hueco de DST se toma como UTC
fn local_millis<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> i64 {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| tz.from_utc_datetime(&naive).timestamp_millis())
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    local_millis(tz, date.and_time(chrono::NaiveTime::MIN))
}

/// 23:59:59.999 local: un milisegundo antes de la medianoche siguiente
fn end_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> AppResult<i64> {
    let next = date
        .succ_opt()
        .ok_or_else(|| invalid_input_error(&format!("Date {} is out of range", date)))?;
    Ok(start_of_day(tz, next) - 1)
}

/// Rango de un preset respecto a `now` en su zona horaria
pub fn resolve_preset<Tz: TimeZone>(preset: RangePreset, now: &DateTime<Tz>) -> AppResult<DateRange> {
    let tz = now.timezone();
    let today = now.date_naive();

    let range = match preset {
        RangePreset::Today => DateRange::new(start_of_day(&tz, today), end_of_day(&tz, today)?),
        RangePreset::LastWeek => {
            let week_ago = today
                .checked_sub_signed(Duration::days(7))
                .ok_or_else(|| invalid_input_error(&format!("Date {} is out of range", today)))?;
            DateRange::new(start_of_day(&tz, week_ago), now.timestamp_millis())
        }
        RangePreset::LastMonth => {
            let first = today.with_day0(0).unwrap_or(today);
            DateRange::new(start_of_day(&tz, first), end_of_day(&tz, today)?)
        }
        RangePreset::Custom { start, end } => DateRange::new(start_of_day(&tz, start), end_of_day(&tz, end)?),
    };
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{DataGateway, GatewayOp, InMemoryGateway};
    use chrono::{FixedOffset, Utc};
    use serde_json::json;
    use std::sync::Arc;

    fn ms(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32, milli: u32) -> i64 {
        Utc.with_ymd_and_hms(year, month, day, h, m, s).unwrap().timestamp_millis() + milli as i64
    }

    #[test]
    fn test_today_preset_in_utc() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
        let range = resolve_preset(RangePreset::Today, &now).unwrap();
        assert_eq!(range.start_ms, ms(2024, 3, 15, 0, 0, 0, 0));
        assert_eq!(range.end_ms, ms(2024, 3, 15, 23, 59, 59, 999));
    }

    #[test]
    fn test_presets_follow_local_offset() {
        let damascus = FixedOffset::east_opt(3 * 3600).unwrap();
        let now = damascus.with_ymd_and_hms(2024, 3, 15, 1, 0, 0).unwrap();
        let range = resolve_preset(RangePreset::Today, &now).unwrap();
        // medianoche local = 21:00 UTC del día anterior
        assert_eq!(range.start_ms, ms(2024, 3, 14, 21, 0, 0, 0));
    }

    #[test]
    fn test_last_week_runs_until_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
        let range = resolve_preset(RangePreset::LastWeek, &now).unwrap();
        assert_eq!(range.start_ms, ms(2024, 3, 8, 0, 0, 0, 0));
        assert_eq!(range.end_ms, now.timestamp_millis());
    }

    #[test]
    fn test_last_month_starts_on_first_day() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
        let range = resolve_preset(RangePreset::LastMonth, &now).unwrap();
        assert_eq!(range.start_ms, ms(2024, 3, 1, 0, 0, 0, 0));
        assert_eq!(range.end_ms, ms(2024, 3, 15, 23, 59, 59, 999));
    }

    #[test]
    fn test_custom_range_uses_whole_days() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
        let preset = RangePreset::Custom {
            start: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        };
        let range = resolve_preset(preset, &now).unwrap();
        assert_eq!(range.start_ms, ms(2024, 2, 1, 0, 0, 0, 0));
        assert_eq!(range.end_ms, ms(2024, 2, 29, 23, 59, 59, 999));
    }

    #[test]
    fn test_last_representable_date_is_rejected() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
        let preset = RangePreset::Custom {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::MAX,
        };
        let err = resolve_preset(preset, &now).unwrap_err();
        assert!(err.is_validation());
    }

    fn service(gateway: Arc<InMemoryGateway>) -> OrderCountService {
        let gateway: Arc<dyn DataGateway> = gateway;
        OrderCountService::new(OrderRepository::new(gateway, "delv_orders"))
    }

    fn seeded() -> Arc<InMemoryGateway> {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.seed(
            "delv_orders",
            vec![
                json!({ "id": 1, "status": "new", "start_time": 100 }),
                json!({ "id": 2, "status": "accepted", "start_time": 150 }),
                json!({ "id": 3, "status": "finish", "start_time": 200 }),
                json!({ "id": 4, "status": "end", "start_time": 250 }),
                json!({ "id": 5, "status": "cancel", "start_time": 300 }),
                json!({ "id": 6, "status": "new", "start_time": 5000 }),
            ],
        );
        gateway
    }

    #[tokio::test]
    async fn test_counts_are_bounded_by_range() {
        let gateway = seeded();
        let summary = service(gateway.clone()).get_counts(DateRange::new(100, 300)).await.unwrap();
        assert_eq!(
            summary,
            OrderCountSummary {
                incomplete: 2,
                completed: 2,
                canceled: 1
            }
        );
        assert_eq!(gateway.calls_of(GatewayOp::Count), 3);
    }

    #[tokio::test]
    async fn test_inverted_range_still_issues_three_queries() {
        let gateway = seeded();
        let summary = service(gateway.clone()).get_counts(DateRange::new(300, 100)).await.unwrap();
        assert_eq!(summary, OrderCountSummary::default());
        assert_eq!(gateway.calls_of(GatewayOp::Count), 3);
    }

    #[tokio::test]
    async fn test_any_failure_fails_the_whole_summary() {
        let gateway = seeded();
        gateway.fail_on(GatewayOp::Count);
        let result = service(gateway).get_counts(DateRange::new(100, 300)).await;
        assert!(result.is_err());
    }
}
