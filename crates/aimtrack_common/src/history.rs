//! Session history
//!
//! Builds the transient inputs of a report from stored sessions: the latest
//! session and the K/D history over the most recent `HISTORY_WINDOW` sessions,
//! oldest first. Sessions are read from a JSON array written by the caller.

use crate::stats::StatSession;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Sessions considered for trend analysis
pub const HISTORY_WINDOW: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("not enough data to analyse: at least one session is required")]
    NoSessions,

    #[error("failed to read sessions from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sessions in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// All sessions of one player, ordered oldest to newest
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    sessions: Vec<StatSession>,
}

impl SessionLog {
    pub fn new(mut sessions: Vec<StatSession>) -> Self {
        sessions.sort_by_key(|s| s.date_fetched());
        Self { sessions }
    }

    /// Load a JSON array of sessions
    pub fn load(path: &Path) -> Result<Self, HistoryError> {
        let content = fs::read_to_string(path).map_err(|source| HistoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let sessions: Vec<StatSession> =
            serde_json::from_str(&content).map_err(|source| HistoryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(sessions))
    }

    pub fn sessions(&self) -> &[StatSession] {
        &self.sessions
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn latest(&self) -> Option<&StatSession> {
        self.sessions.last()
    }

    /// Up to `HISTORY_WINDOW` most recent sessions, oldest first
    pub fn recent(&self) -> &[StatSession] {
        let start = self.sessions.len().saturating_sub(HISTORY_WINDOW);
        &self.sessions[start..]
    }

    pub fn report_input(&self) -> Result<ReportInput, HistoryError> {
        ReportInput::from_sessions(self.recent())
    }

    pub fn timeline(&self) -> Vec<TimelinePoint> {
        kd_timeline(&self.sessions)
    }
}

/// Inputs for one report request
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInput {
    pub last_session: StatSession,
    /// K/D values, oldest first, at most `HISTORY_WINDOW` long
    pub history: Vec<f64>,
}

impl ReportInput {
    /// Build from sessions in any order
    pub fn from_sessions(sessions: &[StatSession]) -> Result<Self, HistoryError> {
        let mut recent: Vec<&StatSession> = sessions.iter().collect();
        recent.sort_by_key(|s| std::cmp::Reverse(s.date_fetched()));
        recent.truncate(HISTORY_WINDOW);

        let last_session = recent.first().map(|s| (*s).clone()).ok_or(HistoryError::NoSessions)?;
        let history = recent.iter().rev().map(|s| s.kd_ratio()).collect();

        Ok(Self {
            last_session,
            history,
        })
    }
}

/// One point of the K/D chart series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub label: String,
    pub kd_ratio: f64,
}

/// K/D over every session, oldest first, labelled `%Y-%m-%d %H:%M`
pub fn kd_timeline(sessions: &[StatSession]) -> Vec<TimelinePoint> {
    let mut ordered: Vec<&StatSession> = sessions.iter().collect();
    ordered.sort_by_key(|s| s.date_fetched());

    ordered
        .into_iter()
        .map(|s| TimelinePoint {
            label: s.date_fetched().format("%Y-%m-%d %H:%M").to_string(),
            kd_ratio: s.kd_ratio(),
        })
        .collect()
}
