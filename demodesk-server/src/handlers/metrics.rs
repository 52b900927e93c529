//! Insight metrics: fixed baseline plus a live demo request count

use super::{best_effort, DEMO_REQUEST_COLLECTION};
use crate::models::{Metric, MetricValue, MetricsOut};
use crate::store::{Document, StoreHandle};

/// Illustrative figures reported regardless of store state, in display order.
pub fn baseline_metrics() -> Vec<Metric> {
    vec![
        Metric::new("EHR Feeds", MetricValue::Numeric(142), "+12 this week"),
        Metric::new("Claims/day", "1.8M", "EDI 837/835"),
        Metric::new("Avg. Latency", "320ms", "stream pipelines"),
        Metric::new("AI Models", MetricValue::Numeric(28), "risk & quality"),
    ]
}

/// Baseline metrics, with the live demo request count appended last when the
/// store can answer. A failed count drops the live entry, never the response.
pub async fn metrics(store: &StoreHandle) -> MetricsOut {
    let mut metrics = baseline_metrics();

    if let StoreHandle::Connected(store) = store {
        let count = store
            .count_documents(DEMO_REQUEST_COLLECTION, &Document::new())
            .await;

        if let Some(count) = best_effort("demo_request_count", count) {
            metrics.push(Metric::new("Demo Requests", count, "total received"));
        }
    }

    MetricsOut { metrics }
}
