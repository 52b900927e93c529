//! Insight metrics

use serde::Serialize;

/// Metric value: a literal count or a pre-formatted magnitude like "1.8M".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Numeric(u64),
    Formatted(String),
}

impl From<u64> for MetricValue {
    fn from(n: u64) -> Self {
        Self::Numeric(n)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        Self::Formatted(s.to_owned())
    }
}

/// A single labelled metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: MetricValue,
    pub hint: String,
}

impl Metric {
    pub fn new(label: &str, value: impl Into<MetricValue>, hint: &str) -> Self {
        Self {
            label: label.to_owned(),
            value: value.into(),
            hint: hint.to_owned(),
        }
    }
}

/// GET /api/metrics response
#[derive(Debug, Clone, Serialize)]
pub struct MetricsOut {
    pub metrics: Vec<Metric>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn values_serialize_untagged() {
        let count = Metric::new("AI Models", MetricValue::Numeric(28), "risk & quality");
        let formatted = Metric::new("Claims/day", "1.8M", "EDI 837/835");

        assert_eq!(
            serde_json::to_value(&count).unwrap(),
            json!({"label": "AI Models", "value": 28, "hint": "risk & quality"})
        );
        assert_eq!(serde_json::to_value(&formatted).unwrap()["value"], "1.8M");
    }
}
