//! Aimtrack Common - player stat tracking and performance reports
//!
//! Session counters, K/D trend classification, threshold-based coaching and
//! report generation through a remote LLM with a deterministic local fallback.

pub mod config;
pub mod history;
pub mod llm_client;
pub mod prompts;
pub mod recommend;
pub mod report;
pub mod reporter;
pub mod stats;
pub mod steam;
pub mod trend;

pub use config::TrackerConfig;
pub use history::{ReportInput, SessionLog, HISTORY_WINDOW};
pub use llm_client::{FakeLlmClient, HttpLlmClient, LlmClient, LlmConfig, LlmError};
pub use recommend::{recommend, Recommendation};
pub use report::{format_report, FALLBACK_MARKER};
pub use reporter::{
    generate_performance_report, generate_report, ReportOutcome, MISSING_CREDENTIAL_MESSAGE,
};
pub use stats::StatSession;
pub use trend::{classify, TrendLabel};
