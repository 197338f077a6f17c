//! Derives one display-ready value from a raw insight record.
//!
//! The shape of an insight's `result` payload varies by insight type and is
//! not guaranteed to stay stable as the upstream API evolves. Extraction
//! therefore degrades gracefully: any record whose shape is not recognized
//! yields the `N/A` sentinel rather than an error, so one odd insight never
//! aborts the whole digest.

use crate::posthog::Insight;
use clap::ValueEnum;
use serde_json::Value;

/// Sentinel shown for insights whose results cannot be interpreted.
pub const NOT_AVAILABLE: &str = "N/A";

/// Shape discriminator value marking a funnel insight.
const FUNNELS: &str = "FUNNELS";

/// Which value to report for funnel insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FunnelMetric {
    /// Conversion rate of the final step over the first step.
    Conversion,
    /// Raw count of the final step.
    FinalCount,
}

/// Extract the display value for one insight record.
///
/// Trend-like insights report the latest point of their numeric series,
/// formatted with thousands separators. Funnel insights report either the
/// first-to-last conversion rate with one decimal place or the final step's
/// raw count, per `funnel_metric`. Unrecognized shapes yield [`NOT_AVAILABLE`].
#[must_use]
pub fn extract_value(insight: &Insight, funnel_metric: FunnelMetric) -> String {
    let value = if insight.filters.insight.as_deref() == Some(FUNNELS) {
        funnel_value(&insight.result, funnel_metric)
    } else {
        trend_value(&insight.result)
    };

    value.unwrap_or_else(|| NOT_AVAILABLE.to_owned())
}

/// Latest value of a trends series: `result[0].data` holds the numeric points.
fn trend_value(result: &Value) -> Option<String> {
    let data = result.get(0)?.get("data")?.as_array()?;
    let latest = data.last()?.as_f64()?;
    Some(format_count(latest))
}

/// Funnel value from step-level counts.
///
/// Funnel results nest the steps either as `result[0]` (breakdown form) or
/// directly as `result`; each step carries a `count`.
fn funnel_value(result: &Value, funnel_metric: FunnelMetric) -> Option<String> {
    let steps = match result.get(0) {
        Some(Value::Array(inner)) => inner.as_slice(),
        _ => result.as_array()?.as_slice(),
    };

    if steps.len() < 2 {
        return None;
    }

    let first = steps.first()?.get("count")?.as_f64()?;
    let last = steps.last()?.get("count")?.as_f64()?;

    match funnel_metric {
        FunnelMetric::FinalCount => Some(format_count(last)),
        FunnelMetric::Conversion => {
            if first <= 0.0 {
                return None;
            }
            Some(format_percentage(last / first * 100.0))
        }
    }
}

/// Format a count with `,` thousands separators, rounding half-away-from-zero
/// to an integer (1560 → "1,560").
fn format_count(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 { format!("-{grouped}") } else { grouped }
}

/// Format a percentage with one decimal place, rounding half-away-from-zero
/// (23.4 → "23.4%").
fn format_percentage(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    format!("{rounded:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posthog::Filters;
    use serde_json::json;

    fn insight(insight_type: Option<&str>, result: Value) -> Insight {
        Insight {
            filters: Filters {
                insight: insight_type.map(str::to_owned),
            },
            result,
        }
    }

    #[test]
    fn trend_reports_latest_value_with_thousands_separators() {
        let record = insight(Some("TRENDS"), json!([{ "data": [12.0, 980.0, 1560.0] }]));
        assert_eq!(extract_value(&record, FunnelMetric::Conversion), "1,560");
    }

    #[test]
    fn counts_below_one_thousand_have_no_separator() {
        let record = insight(Some("TRENDS"), json!([{ "data": [999.0] }]));
        assert_eq!(extract_value(&record, FunnelMetric::Conversion), "999");
    }

    #[test]
    fn missing_insight_type_is_treated_as_trend() {
        let record = insight(None, json!([{ "data": [0.0] }]));
        assert_eq!(extract_value(&record, FunnelMetric::Conversion), "0");
    }

    #[test]
    fn counts_round_half_away_from_zero() {
        let record = insight(Some("TRENDS"), json!([{ "data": [1234.5] }]));
        assert_eq!(extract_value(&record, FunnelMetric::Conversion), "1,235");
    }

    #[test]
    fn funnel_reports_conversion_rate_with_one_decimal() {
        let record = insight(Some("FUNNELS"), json!([{ "count": 1000 }, { "count": 234 }]));
        assert_eq!(extract_value(&record, FunnelMetric::Conversion), "23.4%");
    }

    #[test]
    fn funnel_steps_may_be_nested_one_level() {
        let record = insight(Some("FUNNELS"), json!([[{ "count": 1000 }, { "count": 500 }, { "count": 234 }]]));
        assert_eq!(extract_value(&record, FunnelMetric::Conversion), "23.4%");
    }

    #[test]
    fn funnel_final_count_reports_last_step() {
        let record = insight(Some("FUNNELS"), json!([{ "count": 1000 }, { "count": 234 }]));
        assert_eq!(extract_value(&record, FunnelMetric::FinalCount), "234");
    }

    #[test]
    fn funnel_with_zero_first_step_is_not_available() {
        let record = insight(Some("FUNNELS"), json!([{ "count": 0 }, { "count": 5 }]));
        assert_eq!(extract_value(&record, FunnelMetric::Conversion), NOT_AVAILABLE);
    }

    #[test]
    fn funnel_with_single_step_is_not_available() {
        let record = insight(Some("FUNNELS"), json!([{ "count": 1000 }]));
        assert_eq!(extract_value(&record, FunnelMetric::Conversion), NOT_AVAILABLE);
    }

    #[test]
    fn funnel_steps_without_counts_are_not_available() {
        let record = insight(Some("FUNNELS"), json!([{ "label": "a" }, { "label": "b" }]));
        assert_eq!(extract_value(&record, FunnelMetric::Conversion), NOT_AVAILABLE);
    }

    #[test]
    fn unrecognized_shapes_never_error() {
        for result in [
            json!(null),
            json!({}),
            json!([]),
            json!([{ "data": [] }]),
            json!([{ "data": ["oops"] }]),
            json!([{ "other": 7 }]),
            json!("scalar"),
        ] {
            let record = insight(Some("TRENDS"), result);
            assert_eq!(extract_value(&record, FunnelMetric::Conversion), NOT_AVAILABLE);
        }
    }

    #[test]
    fn conversion_rate_rounds_half_away_from_zero() {
        // 45/1000 = 4.5%, then 4.45 would need the half-away rule at one decimal
        let record = insight(Some("FUNNELS"), json!([{ "count": 2000 }, { "count": 89 }]));
        assert_eq!(extract_value(&record, FunnelMetric::Conversion), "4.5%");
    }

    #[test]
    fn thousands_grouping_handles_long_counts() {
        let record = insight(Some("TRENDS"), json!([{ "data": [1234567.0] }]));
        assert_eq!(extract_value(&record, FunnelMetric::Conversion), "1,234,567");
    }
}
