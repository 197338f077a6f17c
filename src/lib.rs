//! A scheduled integration that posts a daily digest of PostHog dashboard
//! metrics to a Slack incoming webhook.
//!
//! # Overview
//!
//! `posthog-digest` runs once per invocation (typically from a CI cron
//! trigger), fetches the insights of a small set of configured PostHog
//! dashboards, extracts one display-ready value per insight, renders a
//! plain-text digest, and posts it to a pre-shared Slack webhook URL.
//!
//! The pipeline is strictly linear: fetch → extract → format → send. Nothing
//! persists between runs, and there are no retries; a failed run is surfaced
//! to the external scheduler through a non-zero exit code.
//!
//! # Configuration
//!
//! All settings come from the environment (or equivalent command-line flags):
//!
//! ```bash
//! export POSTHOG_API_KEY=phx_xxxxxxxx        # required
//! export POSTHOG_PROJECT_ID=12345            # required
//! export SLACK_WEBHOOK_URL=https://hooks.slack.com/services/...  # required
//! export POSTHOG_HOST=https://app.posthog.com  # optional
//! export DASHBOARD_ERROR_MONITORING=101      # optional, enables the section
//! export DASHBOARD_BUY_FLOW=202
//! export DASHBOARD_UI_UX_HEALTH=303
//! posthog-digest
//! ```
//!
//! Use `--dry-run` to print the rendered digest instead of posting it.

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod config;

pub mod digest;

pub mod extract;

pub mod pipeline;

pub mod posthog;

pub mod slack;
