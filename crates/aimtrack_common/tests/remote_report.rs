//! Remote report generation against a local HTTP endpoint
//!
//! Each test serves exactly one canned response from a throwaway listener and
//! checks which path the reporter took.

use aimtrack_common::{
    generate_performance_report, generate_report, HttpLlmClient, LlmClient, LlmConfig, LlmError,
    ReportOutcome, StatSession, FALLBACK_MARKER, MISSING_CREDENTIAL_MESSAGE,
};
use chrono::{TimeZone, Utc};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const IVAN_HISTORY: [f64; 3] = [1.5, 1.8, 2.0];

fn ivan_session() -> StatSession {
    let at = Utc.with_ymd_and_hms(2025, 5, 20, 19, 0, 0).unwrap();
    StatSession::new(100, 50, 40, 3600, at)
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Read one full HTTP request (headers + Content-Length body)
fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = find_header_end(&buf) {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Serve one response; the handle yields the raw request
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request
    });
    (format!("http://{}", addr), handle)
}

fn client_for(endpoint: &str, timeout_secs: u64) -> HttpLlmClient {
    HttpLlmClient::new(LlmConfig {
        endpoint: endpoint.to_string(),
        api_key: Some("sk-test-key".to_string()),
        timeout_secs,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn remote_success_returns_trimmed_text() {
    let (endpoint, server) = serve_once(
        "200 OK",
        r#"{"id":"cmpl-1","choices":[{"index":0,"message":{"role":"assistant","content":"\n  Ivan keeps climbing.  \n"}}]}"#,
    );
    let client = client_for(&endpoint, 5);

    let report = generate_performance_report(&client, "Ivan", &ivan_session(), &IVAN_HISTORY);
    assert_eq!(report, "Ivan keeps climbing.");

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /v1/chat/completions"));
    assert!(request.to_lowercase().contains("authorization: bearer sk-test-key"));
    assert!(request.contains("\"model\":\"gpt-3.5-turbo\""));
    assert!(request.contains("\"max_tokens\":150"));
    assert!(request.contains("\"temperature\":0.7"));
    assert!(request.contains("Player: Ivan"));
    assert!(request.contains("[1.5, 1.8, 2.0]"));
}

#[test]
fn rate_limited_response_falls_back_locally() {
    let (endpoint, server) = serve_once(
        "429 Too Many Requests",
        r#"{"error":{"message":"Rate limit reached"}}"#,
    );
    let client = client_for(&endpoint, 5);

    let outcome = generate_report(&client, "Ivan", 2.0, 40.0, &IVAN_HISTORY);
    server.join().unwrap();

    match outcome {
        ReportOutcome::Fallback { report, cause } => {
            assert_eq!(cause, LlmError::Status(429));
            assert!(report.starts_with(FALLBACK_MARKER));
            assert!(report.contains("Ivan"));
            assert!(report.contains("2.00"));
            assert!(report.contains("40.0"));
            assert!(report.contains("clear upward form"));
        }
        other => panic!("expected fallback, got {other:?}"),
    }
}

#[test]
fn malformed_body_falls_back_locally() {
    let (endpoint, server) = serve_once("200 OK", r#"{"unexpected":true}"#);
    let client = client_for(&endpoint, 5);

    let outcome = generate_report(&client, "Ivan", 0.8, 30.0, &[1.2, 1.0, 0.8]);
    server.join().unwrap();

    match outcome {
        ReportOutcome::Fallback { report, cause } => {
            assert!(matches!(cause, LlmError::InvalidJson(_)));
            assert!(report.contains("worrying drop in form"));
            assert!(report.contains("survivability is low"));
            assert!(report.contains("low HS%"));
        }
        other => panic!("expected fallback, got {other:?}"),
    }
}

#[test]
fn connection_refused_falls_back_locally() {
    // Grab a free port, then close it so nothing is listening
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = client_for(&format!("http://127.0.0.1:{}", port), 5);

    let report = generate_performance_report(&client, "Ivan", &ivan_session(), &IVAN_HISTORY);
    assert!(report.starts_with(FALLBACK_MARKER));
    assert!(report.contains("2.00"));
    assert!(report.contains("40.0"));
}

#[test]
fn silent_server_times_out_and_falls_back() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let _ = read_request(&mut stream);
        // Hold the connection open past the client timeout
        thread::sleep(Duration::from_secs(3));
    });

    let client = client_for(&format!("http://{}", addr), 1);
    let request = aimtrack_common::prompts::report_request("Ivan", 2.0, 40.0, &IVAN_HISTORY);
    let err = client.generate(&request).unwrap_err();
    assert!(
        matches!(err, LlmError::Timeout(1) | LlmError::HttpError(_)),
        "unexpected error: {err:?}"
    );
    assert!(err.is_transport());

    server.join().unwrap();
}

#[test]
fn missing_credential_never_touches_the_network() {
    let client = HttpLlmClient::new(LlmConfig {
        endpoint: "http://127.0.0.1:1".to_string(),
        api_key: None,
        ..Default::default()
    })
    .unwrap();

    let report = generate_performance_report(&client, "Ivan", &ivan_session(), &IVAN_HISTORY);
    assert_eq!(report, MISSING_CREDENTIAL_MESSAGE);
    assert!(!report.contains(FALLBACK_MARKER));
}
