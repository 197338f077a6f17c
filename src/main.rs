//! Command-line entry point for `posthog-digest`.
//!
//! Every setting is available both as a flag and as an environment variable,
//! so the tool drops into a CI cron job without any wrapper scripting.
//! Missing required settings abort before any network call, with clap naming
//! the flag and its environment variable.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, ValueEnum};
use posthog_digest::Result;
use posthog_digest::config::{Config, DEFAULT_HOST, DashboardIds};
use posthog_digest::extract::FunnelMetric;
use posthog_digest::pipeline;
use url::Url;

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

#[derive(Parser, Debug)]
#[command(name = "posthog-digest", version, about)]
#[command(styles = CLAP_STYLES)]
struct Args {
    /// PostHog personal API key
    #[arg(long, value_name = "KEY", env = "POSTHOG_API_KEY", hide_env_values = true)]
    api_key: String,

    /// PostHog project id
    #[arg(long, value_name = "ID", env = "POSTHOG_PROJECT_ID")]
    project_id: String,

    /// Slack incoming-webhook URL the digest is posted to
    #[arg(long, value_name = "URL", env = "SLACK_WEBHOOK_URL", hide_env_values = true)]
    webhook_url: Url,

    /// Base URL of the PostHog API
    #[arg(long, value_name = "URL", env = "POSTHOG_HOST", default_value = DEFAULT_HOST)]
    host: Url,

    /// Dashboard id for the Error Monitoring section
    #[arg(long, value_name = "ID", env = "DASHBOARD_ERROR_MONITORING", help_heading = "Sections")]
    error_monitoring: Option<String>,

    /// Dashboard id for the Buy Flow Performance section
    #[arg(long, value_name = "ID", env = "DASHBOARD_BUY_FLOW", help_heading = "Sections")]
    buy_flow: Option<String>,

    /// Dashboard id for the UI & UX Health section
    #[arg(long, value_name = "ID", env = "DASHBOARD_UI_UX_HEALTH", help_heading = "Sections")]
    ui_ux_health: Option<String>,

    /// Which value to report for funnel insights
    #[arg(long, value_name = "METRIC", default_value = "conversion")]
    funnel_metric: FunnelMetric,

    /// Print the rendered digest to stdout instead of posting it
    #[arg(long)]
    dry_run: bool,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    log_level: LogLevel,
}

/// Initialize logger based on log level
fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug) || matches!(log_level, LogLevel::Trace))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_level);

    let config = Config::new(
        args.api_key,
        args.project_id,
        args.host,
        args.webhook_url,
        DashboardIds {
            error_monitoring: args.error_monitoring,
            buy_flow: args.buy_flow,
            ui_ux_health: args.ui_ux_health,
        },
        args.funnel_metric,
    )?;

    pipeline::run(&config, args.dry_run).await
}
