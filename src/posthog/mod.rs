//! Thin client for the PostHog dashboards and insights API.

use crate::Result;
use ohno::EnrichableExt;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

const LOG_TARGET: &str = "   posthog";
const USER_AGENT: &str = "posthog-digest";

/// Only the first few insights of a dashboard contribute to the digest.
const MAX_INSIGHTS_PER_DASHBOARD: usize = 5;

/// Label used when a dashboard tile carries an insight without a name.
const UNNAMED_INSIGHT: &str = "Unnamed";

/// One insight record as returned by the insights endpoint.
///
/// PostHog guarantees no fixed schema for `result` across insight types, so
/// the payload is held as raw JSON and interpreted by the extraction logic.
#[derive(Debug, Clone, Deserialize)]
pub struct Insight {
    #[serde(default)]
    pub filters: Filters,

    #[serde(default)]
    pub result: Value,
}

/// The filters block of an insight, carrying the shape discriminator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Filters {
    /// Insight type, e.g. `TRENDS` or `FUNNELS`. Absent means trends-like.
    #[serde(default)]
    pub insight: Option<String>,
}

/// One insight belonging to a dashboard, paired with its display name.
///
/// `insight` is `None` when the per-insight fetch failed; the digest shows
/// that metric as `N/A` instead of aborting the section.
#[derive(Debug)]
pub struct DashboardInsight {
    pub name: String,
    pub insight: Option<Insight>,
}

#[derive(Debug, Deserialize)]
struct Dashboard {
    #[serde(default)]
    tiles: Vec<Tile>,
}

#[derive(Debug, Deserialize)]
struct Tile {
    #[serde(default)]
    insight: Option<TileInsight>,
}

#[derive(Debug, Deserialize)]
struct TileInsight {
    id: u64,

    #[serde(default)]
    name: Option<String>,
}

/// Client for the PostHog API, authenticated with a bearer API key.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    host: Url,
    project_id: String,
}

impl Client {
    pub fn new(host: Url, project_id: &str, api_key: &str) -> Result<Self> {
        let mut auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {api_key}"))?;
        auth.set_sensitive(true);

        let mut headers = reqwest::header::HeaderMap::new();
        let _ = headers.insert(reqwest::header::AUTHORIZATION, auth);

        let http = reqwest::Client::builder().user_agent(USER_AGENT).default_headers(headers).build()?;

        Ok(Self {
            http,
            host,
            project_id: project_id.to_owned(),
        })
    }

    /// Fetch the insights of one dashboard, in tile order.
    ///
    /// Returns an error when the dashboard itself cannot be fetched (invalid
    /// id, network failure, auth failure). A failure to fetch an individual
    /// insight's results is recovered locally: the insight is returned with
    /// no record attached.
    pub async fn dashboard_insights(&self, dashboard_id: &str) -> Result<Vec<DashboardInsight>> {
        log::debug!(target: LOG_TARGET, "Fetching dashboard '{dashboard_id}'");

        let dashboard: Dashboard = self
            .get_json(&format!("dashboards/{dashboard_id}"))
            .await
            .map_err(|e| e.enrich_with(|| format!("could not fetch dashboard '{dashboard_id}'")))?;

        let tile_insights: Vec<&TileInsight> = dashboard
            .tiles
            .iter()
            .filter_map(|tile| tile.insight.as_ref())
            .take(MAX_INSIGHTS_PER_DASHBOARD)
            .collect();

        log::debug!(target: LOG_TARGET,
            "Dashboard '{dashboard_id}' has {} tile(s), reporting on {} insight(s)",
            dashboard.tiles.len(), tile_insights.len());

        let mut insights = Vec::with_capacity(tile_insights.len());
        for tile_insight in tile_insights {
            let name = tile_insight.name.clone().unwrap_or_else(|| UNNAMED_INSIGHT.to_owned());

            let insight = match self.get_json::<Insight>(&format!("insights/{}", tile_insight.id)).await {
                Ok(insight) => Some(insight),
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Could not fetch results for insight '{name}' (id {}): {e:#}", tile_insight.id);
                    None
                }
            };

            insights.push(DashboardInsight { name, insight });
        }

        Ok(insights)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.host.join(&format!("api/projects/{}/{path}", self.project_id))?;
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}
