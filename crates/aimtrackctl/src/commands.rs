//! Command handlers
//!
//! Each handler returns the text to print so tests can check it without
//! spawning the binary.

use aimtrack_common::config::TrackerConfig;
use aimtrack_common::history::SessionLog;
use aimtrack_common::llm_client::HttpLlmClient;
use aimtrack_common::reporter::generate_report;
use aimtrack_common::steam::SteamStatsClient;
use anyhow::{Context, Result};
use chrono::Utc;
use std::fmt::Write as _;
use std::path::Path;

/// Load config from `--config` or the discovered location
pub fn load_config(path: Option<&Path>) -> Result<TrackerConfig> {
    match path {
        Some(path) => TrackerConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => TrackerConfig::load().context("Failed to load config"),
    }
}

/// Generate a performance report from stored sessions
pub fn report(config: &TrackerConfig, sessions: &Path, username: &str) -> Result<String> {
    let log = SessionLog::load(sessions)?;
    let input = log.report_input()?;

    let client = HttpLlmClient::new(config.llm.client_config())
        .context("Failed to create LLM client")?;

    let outcome = generate_report(
        &client,
        username,
        input.last_session.kd_ratio(),
        input.last_session.headshot_percentage(),
        &input.history,
    );
    tracing::info!(
        fallback = outcome.is_fallback(),
        history = input.history.len(),
        "Report ready"
    );

    Ok(outcome.into_text())
}

/// K/D timeline of every stored session plus the latest counters
pub fn history(sessions: &Path) -> Result<String> {
    let log = SessionLog::load(sessions)?;

    let mut out = String::new();
    writeln!(out, "K/D HISTORY ({} sessions)", log.sessions().len())?;
    for point in log.timeline() {
        writeln!(out, "  {}  {:.2}", point.label, point.kd_ratio)?;
    }

    match log.latest() {
        Some(latest) => writeln!(out, "LATEST: {}", latest.describe())?,
        None => writeln!(out, "LATEST: (none)")?,
    }
    Ok(out)
}

/// Fetch current counters from Steam and render them as a session JSON object
pub fn fetch(config: &TrackerConfig, steam_id: &str) -> Result<String> {
    let client = SteamStatsClient::new(config.steam.client_config())
        .context("Failed to create Steam client")?;
    let counters = client
        .fetch_counters(steam_id)
        .with_context(|| format!("Failed to fetch stats for {}", steam_id))?;

    let session = counters.into_session(Utc::now());
    serde_json::to_string_pretty(&session).context("Failed to serialize session")
}

/// Effective configuration as TOML; keys stay in the environment
pub fn show_config(config: &TrackerConfig) -> Result<String> {
    config.to_toml().context("Failed to serialize config")
}
