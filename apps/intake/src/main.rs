use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use intake::config::Config;
use intake::replay::{replay, ReplayScript};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries only the JSON report.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting intake replay v{}", env!("CARGO_PKG_VERSION"));

    let script = ReplayScript::load(config.script_path.as_deref())
        .await
        .context("Could not load replay script")?;
    info!("Loaded replay script with {} events", script.events.len());

    let report = replay(&script).context("Replay failed")?;
    info!(
        notifications = report.notifications.len(),
        submitted = report.submission.is_some(),
        "Replay finished"
    );

    let rendered = if config.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{rendered}");

    Ok(())
}
