use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Harness configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Replay script to load. Read from stdin when unset.
    pub script_path: Option<PathBuf>,
    pub pretty: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let pretty = match optional_env("INTAKE_PRETTY") {
            Some(raw) => parse_bool(&raw).context("INTAKE_PRETTY must be a boolean")?,
            None => true,
        };

        Ok(Config {
            script_path: optional_env("INTAKE_SCRIPT").map(PathBuf::from),
            pretty,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognised boolean '{other}'"),
    }
}
