//! End-to-end lifecycle tests: page controllers wired to the real API
//! client and worker dispatcher, talking to a fake loopback backend.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use worddr::api::client::ApiClient;
use worddr::api::types::CefrLevel;
use worddr::api::worker::{ApiDispatcher, ApiResponse};
use worddr::event::AppEvent;
use worddr::page::dashboard::DashboardPage;
use worddr::page::practice::{LOAD_WORD_ERROR, PracticePage, SUBMIT_ERROR};

const WORD_JSON: &str = r#"{
    "id": 42,
    "word": "serendipity",
    "pronunciation": "/ˌsɛrənˈdɪpɪti/",
    "definition": "finding something good without looking for it",
    "example_sentence": "Meeting her was pure serendipity.",
    "difficulty_level": "C1"
}"#;

const RESULT_JSON: &str = r#"{
    "session_id": 7,
    "word_id": 42,
    "user_sentence": "I eat apples.",
    "score": 8,
    "cefr_level": "B1",
    "feedback": "Solid sentence, natural phrasing.",
    "corrected_sentence": null,
    "practiced_at": "2025-06-01T12:30:00.000000"
}"#;

const STATS_JSON: &str = r#"{
    "total_sessions": 3,
    "average_score": 7.5,
    "most_common_level": "B1",
    "recent_sessions": [
        {
            "session_id": 7,
            "score": 8,
            "user_sentence": "I eat apples.",
            "practiced_at": "2025-06-01T12:30:00.000000"
        }
    ]
}"#;

/// Minimal fake backend: routes the three endpoints, one connection at a
/// time, `Connection: close` per response. `failing` makes every route 500.
fn spawn_backend(failing: bool) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };

            let mut data = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        data.extend_from_slice(&buf[..n]);
                        if request_complete(&data) {
                            break;
                        }
                    }
                }
            }

            let request = String::from_utf8_lossy(&data);
            let (status, body) = if failing {
                ("500 Internal Server Error", r#"{"detail": "boom"}"#)
            } else if request.starts_with("GET /api/practice/word") {
                ("200 OK", WORD_JSON)
            } else if request.starts_with("POST /api/practice/submit") {
                ("200 OK", RESULT_JSON)
            } else if request.starts_with("GET /api/dashboard/stats") {
                ("200 OK", STATS_JSON)
            } else {
                ("404 Not Found", r#"{"detail": "no such route"}"#)
            };

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    format!("http://{addr}")
}

fn request_complete(data: &[u8]) -> bool {
    let text = String::from_utf8_lossy(data);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text
        .lines()
        .take_while(|line| !line.is_empty())
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);
    data.len() >= header_end + 4 + content_length
}

fn dispatcher_for(base_url: &str) -> (ApiDispatcher, mpsc::Receiver<AppEvent>) {
    let client = ApiClient::new(base_url, Duration::from_secs(5)).unwrap();
    let (tx, rx) = mpsc::channel();
    (ApiDispatcher::new(client, tx), rx)
}

fn recv_api(rx: &mpsc::Receiver<AppEvent>) -> ApiResponse {
    match rx.recv_timeout(Duration::from_secs(10)).unwrap() {
        AppEvent::Api(response) => response,
        _ => panic!("expected an API completion event"),
    }
}

#[test]
fn full_practice_round_load_submit_next() {
    let base_url = spawn_backend(false);
    let (dispatcher, rx) = dispatcher_for(&base_url);
    let mut page = PracticePage::new();

    // Load the first word.
    dispatcher.dispatch(page.request_word(Some(CefrLevel::C1)));
    assert!(page.loading);
    match recv_api(&rx) {
        ApiResponse::Word {
            generation,
            outcome,
        } => page.on_word(generation, outcome),
        other => panic!("unexpected response {other:?}"),
    }
    assert!(!page.loading);
    let word = page.word.as_ref().expect("word should be loaded");
    assert_eq!(word.id, 42);
    assert_eq!(word.word, "serendipity");

    // Submit a sentence for it.
    let request = page
        .request_submit("I eat apples.")
        .expect("a word is loaded");
    dispatcher.dispatch(request);
    match recv_api(&rx) {
        ApiResponse::Submission {
            generation,
            outcome,
        } => page.on_submission(generation, outcome),
        other => panic!("unexpected response {other:?}"),
    }
    let result = page.result.as_ref().expect("result should be stored");
    assert_eq!(result.score.value(), 8);
    assert!((0..=10).contains(&result.score.value()));
    assert_eq!(result.cefr_level, CefrLevel::B1);

    // Advancing to the next word discards the result.
    dispatcher.dispatch(page.request_word(None));
    assert!(page.result.is_none());
    match recv_api(&rx) {
        ApiResponse::Word {
            generation,
            outcome,
        } => page.on_word(generation, outcome),
        other => panic!("unexpected response {other:?}"),
    }
    assert!(page.word.is_some());
    assert!(!page.loading);
}

#[test]
fn failed_word_load_surfaces_fixed_message() {
    let base_url = spawn_backend(true);
    let (dispatcher, rx) = dispatcher_for(&base_url);
    let mut page = PracticePage::new();

    dispatcher.dispatch(page.request_word(None));
    match recv_api(&rx) {
        ApiResponse::Word {
            generation,
            outcome,
        } => {
            assert!(outcome.is_err());
            page.on_word(generation, outcome);
        }
        other => panic!("unexpected response {other:?}"),
    }
    assert_eq!(page.error, LOAD_WORD_ERROR);
    assert!(page.word.is_none());
    assert!(!page.loading);
}

#[test]
fn failed_submission_surfaces_fixed_message() {
    let ok_url = spawn_backend(false);
    let (ok_dispatcher, ok_rx) = dispatcher_for(&ok_url);
    let mut page = PracticePage::new();

    ok_dispatcher.dispatch(page.request_word(None));
    match recv_api(&ok_rx) {
        ApiResponse::Word {
            generation,
            outcome,
        } => page.on_word(generation, outcome),
        other => panic!("unexpected response {other:?}"),
    }

    // Same page, but the backend starts failing.
    let failing_url = spawn_backend(true);
    let (failing_dispatcher, failing_rx) = dispatcher_for(&failing_url);
    let request = page
        .request_submit("I eat apples.")
        .expect("a word is loaded");
    failing_dispatcher.dispatch(request);
    match recv_api(&failing_rx) {
        ApiResponse::Submission {
            generation,
            outcome,
        } => page.on_submission(generation, outcome),
        other => panic!("unexpected response {other:?}"),
    }
    assert_eq!(page.error, SUBMIT_ERROR);
    assert!(page.word.is_some(), "word survives a failed submission");
    assert!(page.result.is_none());
}

#[test]
fn dashboard_load_stores_snapshot() {
    let base_url = spawn_backend(false);
    let (dispatcher, rx) = dispatcher_for(&base_url);
    let mut page = DashboardPage::new();
    assert!(page.loading);

    dispatcher.dispatch(page.request_stats());
    match recv_api(&rx) {
        ApiResponse::Stats {
            generation,
            outcome,
        } => page.on_stats(generation, outcome),
        other => panic!("unexpected response {other:?}"),
    }

    let stats = page.stats.as_ref().expect("stats should be stored");
    assert_eq!(stats.total_sessions, 3);
    assert_eq!(stats.average_score, 7.5);
    assert_eq!(stats.most_common_level, Some(CefrLevel::B1));
    assert_eq!(stats.recent_sessions.len(), 1);
    assert_eq!(stats.recent_sessions[0].user_sentence, "I eat apples.");
    assert!(!page.loading);
}

#[test]
fn dashboard_failure_is_swallowed() {
    let base_url = spawn_backend(true);
    let (dispatcher, rx) = dispatcher_for(&base_url);
    let mut page = DashboardPage::new();

    dispatcher.dispatch(page.request_stats());
    match recv_api(&rx) {
        ApiResponse::Stats {
            generation,
            outcome,
        } => {
            assert!(outcome.is_err());
            page.on_stats(generation, outcome);
        }
        other => panic!("unexpected response {other:?}"),
    }

    // Best-effort page: no error state, loading simply ends.
    assert!(page.stats.is_none());
    assert!(!page.loading);
}

#[test]
fn slow_stale_response_does_not_clobber_newer_word() {
    let base_url = spawn_backend(false);
    let (dispatcher, rx) = dispatcher_for(&base_url);
    let mut page = PracticePage::new();

    // Two loads back to back; the second supersedes the first.
    let first = page.request_word(None);
    let second = page.request_word(None);
    dispatcher.dispatch(first);
    dispatcher.dispatch(second);

    // Apply both completions in whatever order they land; only the second
    // generation may take effect.
    for _ in 0..2 {
        match recv_api(&rx) {
            ApiResponse::Word {
                generation,
                outcome,
            } => page.on_word(generation, outcome),
            other => panic!("unexpected response {other:?}"),
        }
    }
    assert!(page.word.is_some());
    assert!(!page.loading, "latest completion clears loading");
}
