//! Stat Sessions - aggregate counters captured on each stats fetch
//!
//! A session is a value object: built once from the stats source and never
//! changed afterwards. The derived ratios are pure functions over the counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Round to two decimal places.
///
/// Goes through the exact decimal expansion of `value`, so `0.995` stored as
/// `0.99499..` stays `0.99` and exact binary ties round to even.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Kills per death, rounded to two decimals.
///
/// With zero deaths the raw kill count is returned instead of a ratio.
/// Reports and stored histories depend on this, so it is kept as-is.
pub fn kd_ratio(kills: u64, deaths: u64) -> f64 {
    if deaths > 0 {
        round2(kills as f64 / deaths as f64)
    } else {
        kills as f64
    }
}

/// Headshots as a percentage of kills, rounded to two decimals. `0.0` without kills.
pub fn headshot_percentage(headshots: u64, kills: u64) -> f64 {
    if kills > 0 {
        round2(headshots as f64 / kills as f64 * 100.0)
    } else {
        0.0
    }
}

/// Counters from one stats fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSession {
    total_kills: u64,
    total_deaths: u64,
    total_headshots: u64,

    /// Seconds played, as reported by the stats source
    #[serde(default)]
    total_time_played: u64,

    date_fetched: DateTime<Utc>,
}

impl StatSession {
    pub fn new(
        total_kills: u64,
        total_deaths: u64,
        total_headshots: u64,
        total_time_played: u64,
        date_fetched: DateTime<Utc>,
    ) -> Self {
        Self {
            total_kills,
            total_deaths,
            total_headshots,
            total_time_played,
            date_fetched,
        }
    }

    pub fn total_kills(&self) -> u64 {
        self.total_kills
    }

    pub fn total_deaths(&self) -> u64 {
        self.total_deaths
    }

    pub fn total_headshots(&self) -> u64 {
        self.total_headshots
    }

    pub fn total_time_played(&self) -> u64 {
        self.total_time_played
    }

    pub fn date_fetched(&self) -> DateTime<Utc> {
        self.date_fetched
    }

    pub fn kd_ratio(&self) -> f64 {
        kd_ratio(self.total_kills, self.total_deaths)
    }

    pub fn headshot_percentage(&self) -> f64 {
        headshot_percentage(self.total_headshots, self.total_kills)
    }

    /// One-line description used in CLI output
    pub fn describe(&self) -> String {
        format!(
            "{}: {} kills, {} deaths, {} headshots (K/D {:.2}, HS {:.1}%)",
            self.date_fetched.format("%Y-%m-%d"),
            self.total_kills,
            self.total_deaths,
            self.total_headshots,
            self.kd_ratio(),
            self.headshot_percentage()
        )
    }
}
