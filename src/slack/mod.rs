//! Delivery of the rendered digest to a Slack incoming webhook.

use crate::Result;
use ohno::bail;
use serde::Serialize;
use url::Url;

const LOG_TARGET: &str = "     slack";
const USER_AGENT: &str = "posthog-digest";

#[derive(Debug, Serialize)]
struct Payload<'a> {
    text: &'a str,
}

/// Post the rendered digest to the webhook.
///
/// One outbound request, no retries. Success is HTTP 2xx; anything else is
/// an error, which the caller surfaces as a failed run.
pub async fn post_digest(webhook_url: &Url, digest: &str) -> Result<()> {
    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

    let response = client
        .post(webhook_url.clone())
        .json(&Payload { text: digest })
        .send()
        .await
        .map_err(|e| ohno::app_err!("could not reach webhook: {e}"))?;

    if !response.status().is_success() {
        bail!("webhook delivery failed with HTTP status {}", response.status());
    }

    log::info!(target: LOG_TARGET, "Digest posted to webhook");
    Ok(())
}
