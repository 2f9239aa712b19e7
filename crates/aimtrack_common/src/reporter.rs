//! Performance report generation with local fallback
//!
//! One remote attempt per report. Any transport or response failure is
//! recovered by the local analysis; only a missing credential is reported
//! back to the user, and it skips the local analysis entirely.

use crate::llm_client::{LlmClient, LlmError};
use crate::prompts::report_request;
use crate::report::local_report;
use crate::stats::StatSession;
use tracing::{info, warn};

/// Fixed message returned when no LLM credential is configured
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "Error: missing LLM API key. Cannot generate the report.";

/// How a report was produced
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// Text from the remote service, trimmed
    Remote(String),
    /// Local analysis, already tagged with the fallback marker
    Fallback {
        report: String,
        cause: LlmError,
    },
    /// No credential; nothing was attempted
    MissingCredential,
}

impl ReportOutcome {
    pub fn text(&self) -> &str {
        match self {
            ReportOutcome::Remote(text) => text,
            ReportOutcome::Fallback { report, .. } => report,
            ReportOutcome::MissingCredential => MISSING_CREDENTIAL_MESSAGE,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ReportOutcome::Remote(text) => text,
            ReportOutcome::Fallback { report, .. } => report,
            ReportOutcome::MissingCredential => MISSING_CREDENTIAL_MESSAGE.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ReportOutcome::Fallback { .. })
    }
}

/// Produce a report for `username` from ratios and K/D history (oldest first)
pub fn generate_report<C>(
    client: &C,
    username: &str,
    kd: f64,
    hs_pct: f64,
    history: &[f64],
) -> ReportOutcome
where
    C: LlmClient + ?Sized,
{
    let request = report_request(username, kd, hs_pct, history);

    match client.generate(&request) {
        Ok(text) => {
            info!(username, "Remote report generated");
            ReportOutcome::Remote(text)
        }
        Err(LlmError::MissingCredential) => {
            warn!("No LLM credential configured, report not generated");
            ReportOutcome::MissingCredential
        }
        Err(cause) if cause.is_transport() => {
            warn!(error = %cause, "Remote generation unreachable, using local analysis");
            fallback(username, kd, hs_pct, history, cause)
        }
        Err(cause) => {
            warn!(error = %cause, "Remote generation returned unusable body, using local analysis");
            fallback(username, kd, hs_pct, history, cause)
        }
    }
}

fn fallback(
    username: &str,
    kd: f64,
    hs_pct: f64,
    history: &[f64],
    cause: LlmError,
) -> ReportOutcome {
    ReportOutcome::Fallback {
        report: local_report(username, kd, hs_pct, history),
        cause,
    }
}

/// Caller-facing entry point: remote text, tagged local text, or the
/// missing-credential message.
pub fn generate_performance_report<C>(
    client: &C,
    username: &str,
    last_session: &StatSession,
    history: &[f64],
) -> String
where
    C: LlmClient + ?Sized,
{
    generate_report(
        client,
        username,
        last_session.kd_ratio(),
        last_session.headshot_percentage(),
        history,
    )
    .into_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::FakeLlmClient;
    use crate::report::FALLBACK_MARKER;
    use chrono::{TimeZone, Utc};

    fn ivan_session() -> StatSession {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 20, 0, 0).unwrap();
        StatSession::new(100, 50, 40, 7200, at)
    }

    #[test]
    fn test_remote_text_is_returned_verbatim() {
        let client = FakeLlmClient::always_text("Ivan is in great shape.");
        let report = generate_performance_report(&client, "Ivan", &ivan_session(), &[1.5, 1.8, 2.0]);
        assert_eq!(report, "Ivan is in great shape.");
        assert_eq!(client.call_count(), 1);

        let request = client.last_request().unwrap();
        assert!(request.user_prompt.contains("Ivan"));
        assert!(request.user_prompt.contains("[1.5, 1.8, 2.0]"));
    }

    #[test]
    fn test_transport_failure_falls_back() {
        let client = FakeLlmClient::always_error(LlmError::Status(429));
        let outcome = generate_report(&client, "Ivan", 2.0, 40.0, &[1.5, 1.8, 2.0]);

        assert!(outcome.is_fallback());
        let text = outcome.text();
        assert!(text.starts_with(FALLBACK_MARKER));
        assert!(text.contains("2.00"));
        assert!(text.contains("40.0"));
        assert!(text.contains("clear upward form"));
    }

    #[test]
    fn test_every_remote_failure_falls_back() {
        let failures = [
            LlmError::HttpError("connection refused".to_string()),
            LlmError::Timeout(15),
            LlmError::Status(500),
            LlmError::InvalidJson("eof".to_string()),
            LlmError::EmptyResponse,
        ];
        for failure in failures {
            let client = FakeLlmClient::always_error(failure.clone());
            match generate_report(&client, "p", 0.8, 30.0, &[]) {
                ReportOutcome::Fallback { report, cause } => {
                    assert_eq!(cause, failure);
                    assert!(report.starts_with(FALLBACK_MARKER));
                }
                other => panic!("expected fallback for {failure}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_credential_skips_fallback() {
        let client = FakeLlmClient::always_error(LlmError::MissingCredential);
        let outcome = generate_report(&client, "Ivan", 2.0, 40.0, &[1.5, 1.8, 2.0]);
        assert_eq!(outcome, ReportOutcome::MissingCredential);
        assert_eq!(outcome.into_text(), MISSING_CREDENTIAL_MESSAGE);
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let client = FakeLlmClient::always_error(LlmError::Timeout(15));
        let a = generate_performance_report(&client, "Ivan", &ivan_session(), &[1.0, 1.0]);
        let b = generate_performance_report(&client, "Ivan", &ivan_session(), &[1.0, 1.0]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_dyn_client_is_accepted() {
        let client: Box<dyn LlmClient> = Box::new(FakeLlmClient::always_text("ok"));
        let outcome = generate_report(client.as_ref(), "p", 1.0, 50.0, &[]);
        assert_eq!(outcome, ReportOutcome::Remote("ok".to_string()));
    }
}
