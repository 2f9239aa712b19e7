//! Steam stats source
//!
//! Fetches raw Counter-Strike 2 counters from `ISteamUserStats/GetUserStatsForGame`
//! and maps them onto session counters. The profile must be public.

use crate::stats::StatSession;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Counter-Strike app id on Steam
pub const CS2_APP_ID: u32 = 730;

/// Steam stats source configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SteamConfig {
    pub endpoint: String,
    pub app_id: u32,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://api.steampowered.com/ISteamUserStats/GetUserStatsForGame/v0002/"
                .to_string(),
            app_id: CS2_APP_ID,
            api_key: None,
            timeout_secs: 10,
        }
    }
}

/// Stats source errors
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("STEAM_API_KEY is not configured")]
    MissingApiKey,

    #[error("invalid Steam ID 64 '{0}': expected 17 digits")]
    InvalidSteamId(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("HTTP {0} from Steam; check the API key and that the profile is public")]
    Status(u16),

    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),

    #[error("no CS2 stats for Steam ID {0}; the profile may be private")]
    StatsUnavailable(String),
}

/// A single named counter as returned by Steam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStat {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    playerstats: Option<PlayerStats>,
}

#[derive(Debug, Deserialize)]
struct PlayerStats {
    stats: Option<Vec<RawStat>>,
}

/// Counters the tracker keeps from the raw stat list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCounters {
    pub total_kills: u64,
    pub total_deaths: u64,
    pub total_time_played: u64,
    pub total_headshots: u64,
}

impl StatCounters {
    pub fn into_session(self, date_fetched: DateTime<Utc>) -> StatSession {
        StatSession::new(
            self.total_kills,
            self.total_deaths,
            self.total_headshots,
            self.total_time_played,
            date_fetched,
        )
    }
}

/// Validate a 17-digit Steam ID 64
pub fn validate_steam_id(steam_id: &str) -> Result<(), StatsError> {
    if steam_id.len() == 17 && steam_id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(StatsError::InvalidSteamId(steam_id.to_string()))
    }
}

/// Parse a `GetUserStatsForGame` body into its stat list
pub fn parse_stats_body(body: &str, steam_id: &str) -> Result<Vec<RawStat>, StatsError> {
    let response: StatsResponse =
        serde_json::from_str(body).map_err(|e| StatsError::InvalidJson(e.to_string()))?;

    response
        .playerstats
        .and_then(|p| p.stats)
        .ok_or_else(|| StatsError::StatsUnavailable(steam_id.to_string()))
}

/// Map raw stats by name; absent counters become 0
///
/// Headshots are read from `total_kills_headshot`, falling back to
/// `total_headshots`.
pub fn map_raw_stats(raw_stats: &[RawStat]) -> StatCounters {
    let by_name: HashMap<&str, u64> = raw_stats
        .iter()
        .map(|stat| (stat.name.as_str(), stat.value))
        .collect();
    let get = |name: &str| by_name.get(name).copied().unwrap_or(0);

    StatCounters {
        total_kills: get("total_kills"),
        total_deaths: get("total_deaths"),
        total_time_played: get("total_time_played"),
        total_headshots: by_name
            .get("total_kills_headshot")
            .or_else(|| by_name.get("total_headshots"))
            .copied()
            .unwrap_or(0),
    }
}

/// Blocking Steam stats client
pub struct SteamStatsClient {
    config: SteamConfig,
    client: reqwest::blocking::Client,
}

impl SteamStatsClient {
    pub fn new(config: SteamConfig) -> Result<Self, StatsError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StatsError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Fetch the raw stat list for a player
    pub fn fetch_raw_stats(&self, steam_id: &str) -> Result<Vec<RawStat>, StatsError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(StatsError::MissingApiKey)?;
        validate_steam_id(steam_id)?;

        let app_id = self.config.app_id.to_string();
        tracing::debug!(steam_id, app_id = %app_id, "Fetching Steam stats");

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("appid", app_id.as_str()),
                ("key", api_key),
                ("steamid", steam_id),
                ("format", "json"),
            ])
            .send()
            .map_err(|e| StatsError::Http(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| StatsError::Http(format!("Failed to read body: {}", e)))?;
        parse_stats_body(&body, steam_id)
    }

    /// Fetch and map into counters
    pub fn fetch_counters(&self, steam_id: &str) -> Result<StatCounters, StatsError> {
        let raw = self.fetch_raw_stats(steam_id)?;
        tracing::info!(steam_id, stats = raw.len(), "Steam stats fetched");
        Ok(map_raw_stats(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const STEAM_ID: &str = "76561198000000000";

    fn stat(name: &str, value: u64) -> RawStat {
        RawStat {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_validate_steam_id() {
        assert!(validate_steam_id(STEAM_ID).is_ok());
        assert!(validate_steam_id("7656119800000000").is_err());
        assert!(validate_steam_id("7656119800000000a").is_err());
        assert!(validate_steam_id("").is_err());
    }

    #[test]
    fn test_map_raw_stats() {
        let raw = vec![
            stat("total_kills", 100),
            stat("total_deaths", 50),
            stat("total_time_played", 86_400),
            stat("total_kills_headshot", 40),
            stat("total_wins", 12),
        ];
        assert_eq!(
            map_raw_stats(&raw),
            StatCounters {
                total_kills: 100,
                total_deaths: 50,
                total_time_played: 86_400,
                total_headshots: 40,
            }
        );
    }

    #[test]
    fn test_map_raw_stats_headshot_alias() {
        let counters = map_raw_stats(&[stat("total_headshots", 7)]);
        assert_eq!(counters.total_headshots, 7);

        let counters = map_raw_stats(&[stat("total_headshots", 7), stat("total_kills_headshot", 9)]);
        assert_eq!(counters.total_headshots, 9);
    }

    #[test]
    fn test_map_raw_stats_missing_fields_are_zero() {
        let counters = map_raw_stats(&[stat("total_kills", 9)]);
        assert_eq!(counters.total_kills, 9);
        assert_eq!(counters.total_deaths, 0);
        assert_eq!(counters.total_headshots, 0);
        assert_eq!(map_raw_stats(&[]), StatCounters::default());
    }

    #[test]
    fn test_parse_stats_body() {
        let body = r#"{"playerstats":{"steamID":"76561198000000000","gameName":"ValveTestApp260",
            "stats":[{"name":"total_kills","value":250},{"name":"total_deaths","value":200}]}}"#;
        let raw = parse_stats_body(body, STEAM_ID).unwrap();
        assert_eq!(raw, vec![stat("total_kills", 250), stat("total_deaths", 200)]);
    }

    #[test]
    fn test_parse_stats_body_private_profile() {
        for body in [r#"{}"#, r#"{"playerstats":{"steamID":"1"}}"#] {
            match parse_stats_body(body, STEAM_ID) {
                Err(StatsError::StatsUnavailable(id)) => assert_eq!(id, STEAM_ID),
                other => panic!("expected StatsUnavailable, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_stats_body_invalid_json() {
        assert!(matches!(
            parse_stats_body("<html>", STEAM_ID),
            Err(StatsError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_counters_into_session() {
        let at = Utc.with_ymd_and_hms(2025, 2, 2, 12, 0, 0).unwrap();
        let counters = StatCounters {
            total_kills: 100,
            total_deaths: 50,
            total_time_played: 10,
            total_headshots: 40,
        };
        let session = counters.into_session(at);
        assert_eq!(session.kd_ratio(), 2.0);
        assert_eq!(session.headshot_percentage(), 40.0);
        assert_eq!(session.date_fetched(), at);
    }

    #[test]
    fn test_fetch_without_key() {
        let client = SteamStatsClient::new(SteamConfig::default()).unwrap();
        assert!(matches!(
            client.fetch_raw_stats(STEAM_ID),
            Err(StatsError::MissingApiKey)
        ));
    }
}
