//! Immutable run configuration, built once at startup.
//!
//! All settings come from the environment (or CLI flags); validation happens
//! here, before any network call is made.

use crate::Result;
use crate::extract::FunnelMetric;
use ohno::bail;
use url::Url;

/// Default public PostHog endpoint, used when `POSTHOG_HOST` is absent.
pub const DEFAULT_HOST: &str = "https://app.posthog.com";

/// The dashboard ids provided through the environment. Each one is optional;
/// presence controls whether the corresponding section appears in the digest.
#[derive(Debug, Clone, Default)]
pub struct DashboardIds {
    pub error_monitoring: Option<String>,
    pub buy_flow: Option<String>,
    pub ui_ux_health: Option<String>,
}

/// One configured digest section and the dashboard backing it.
#[derive(Debug, Clone)]
pub struct SectionConfig {
    pub emoji: &'static str,
    pub label: &'static str,
    pub dashboard_id: String,
}

/// Validated configuration for a single run.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub project_id: String,
    pub host: Url,
    pub webhook_url: Url,
    pub funnel_metric: FunnelMetric,

    /// Sections in their fixed reporting order.
    pub sections: Vec<SectionConfig>,
}

impl Config {
    /// Build a validated configuration.
    ///
    /// The section order is fixed here (Error Monitoring, Buy Flow
    /// Performance, UI & UX Health) regardless of how the ids were supplied.
    /// Fails when no dashboard id is configured at all, since the digest
    /// would be empty.
    pub fn new(
        api_key: String,
        project_id: String,
        host: Url,
        webhook_url: Url,
        dashboards: DashboardIds,
        funnel_metric: FunnelMetric,
    ) -> Result<Self> {
        let mut sections = Vec::new();

        if let Some(id) = dashboards.error_monitoring {
            sections.push(SectionConfig {
                emoji: "🚨",
                label: "Error Monitoring",
                dashboard_id: id,
            });
        }

        if let Some(id) = dashboards.buy_flow {
            sections.push(SectionConfig {
                emoji: "💰",
                label: "Buy Flow Performance",
                dashboard_id: id,
            });
        }

        if let Some(id) = dashboards.ui_ux_health {
            sections.push(SectionConfig {
                emoji: "🖥️",
                label: "UI & UX Health",
                dashboard_id: id,
            });
        }

        if sections.is_empty() {
            bail!(
                "no dashboards configured: set at least one of DASHBOARD_ERROR_MONITORING, DASHBOARD_BUY_FLOW, or DASHBOARD_UI_UX_HEALTH"
            );
        }

        Ok(Self {
            api_key,
            project_id,
            host,
            webhook_url,
            funnel_metric,
            sections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> (Url, Url) {
        (
            Url::parse(DEFAULT_HOST).expect("valid host"),
            Url::parse("https://hooks.slack.com/services/T0/B0/x").expect("valid webhook"),
        )
    }

    #[test]
    fn sections_follow_the_fixed_order() {
        let (host, webhook) = urls();
        let config = Config::new(
            "key".to_owned(),
            "42".to_owned(),
            host,
            webhook,
            DashboardIds {
                error_monitoring: Some("101".to_owned()),
                buy_flow: Some("202".to_owned()),
                ui_ux_health: Some("303".to_owned()),
            },
            FunnelMetric::Conversion,
        )
        .expect("valid config");

        let labels: Vec<&str> = config.sections.iter().map(|s| s.label).collect();
        assert_eq!(labels, ["Error Monitoring", "Buy Flow Performance", "UI & UX Health"]);
    }

    #[test]
    fn absent_dashboard_ids_are_skipped() {
        let (host, webhook) = urls();
        let config = Config::new(
            "key".to_owned(),
            "42".to_owned(),
            host,
            webhook,
            DashboardIds {
                buy_flow: Some("202".to_owned()),
                ..DashboardIds::default()
            },
            FunnelMetric::Conversion,
        )
        .expect("valid config");

        assert_eq!(config.sections.len(), 1);
        assert_eq!(config.sections[0].dashboard_id, "202");
    }

    #[test]
    fn at_least_one_dashboard_is_required() {
        let (host, webhook) = urls();
        let result = Config::new(
            "key".to_owned(),
            "42".to_owned(),
            host,
            webhook,
            DashboardIds::default(),
            FunnelMetric::Conversion,
        );

        assert!(result.is_err());
    }
}
