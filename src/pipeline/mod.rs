//! The run driver: fetch each configured dashboard, extract values,
//! render the digest, and send it.

use crate::Result;
use crate::config::Config;
use crate::digest::{Digest, Metric, Section};
use crate::extract::{self, NOT_AVAILABLE};
use crate::posthog;
use crate::slack;
use chrono::Local;

const LOG_TARGET: &str = "  pipeline";

/// Execute one full run.
///
/// Dashboard-level fetch failures drop only their section; the run
/// continues with the rest. A webhook failure is fatal and propagates as
/// the process exit status. With `dry_run`, the rendered digest is printed
/// to stdout and the webhook is never touched.
pub async fn run(config: &Config, dry_run: bool) -> Result<()> {
    let client = posthog::Client::new(config.host.clone(), &config.project_id, &config.api_key)?;

    log::info!(target: LOG_TARGET, "Fetching PostHog data for {} dashboard(s)", config.sections.len());

    let digest = build_digest(&client, config).await;
    let text = digest.render(Local::now().date_naive());

    if dry_run {
        println!("{text}");
        return Ok(());
    }

    slack::post_digest(&config.webhook_url, &text).await
}

/// Assemble the digest for the configured sections, in their fixed order.
pub async fn build_digest(client: &posthog::Client, config: &Config) -> Digest {
    let mut sections = Vec::with_capacity(config.sections.len());

    for section in &config.sections {
        match client.dashboard_insights(&section.dashboard_id).await {
            Ok(insights) => {
                let metrics = insights
                    .into_iter()
                    .map(|fetched| Metric {
                        label: fetched.name,
                        value: fetched
                            .insight
                            .map_or_else(|| NOT_AVAILABLE.to_owned(), |i| extract::extract_value(&i, config.funnel_metric)),
                    })
                    .collect();

                sections.push(Section {
                    emoji: section.emoji,
                    label: section.label,
                    metrics,
                });
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Skipping section '{}': {e:#}", section.label);
            }
        }
    }

    Digest { sections }
}
