//! Fetch engine tests against a canned localhost works API.
//!
//! The stub answers each connection with a fixed response chosen by
//! substring match on the request target, so pagination, termination,
//! and partial-failure behavior can be observed request by request.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use scholia_core::{PermitPool, ProgressContext};
use scholia_openalex::{ApiClient, Config, fetch_author_works, fetch_many};

struct StubApi {
    base_url: String,
    hits: Arc<AtomicUsize>,
}

/// Serve canned responses: first route whose needle appears in the
/// request target wins; unmatched targets get a 404.
fn spawn_stub(routes: Vec<(String, u16, String)>) -> StubApi {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_in = hits.clone();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            hits_in.fetch_add(1, Ordering::SeqCst);

            let mut reader = BufReader::new(match stream.try_clone() {
                Ok(s) => s,
                Err(_) => continue,
            });
            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                continue;
            }
            // Drain headers
            loop {
                let mut line = String::new();
                match reader.read_line(&mut line) {
                    Ok(0) => break,
                    Ok(_) if line == "\r\n" || line == "\n" => break,
                    Ok(_) => {}
                    Err(_) => break,
                }
            }

            let target = request_line.split_whitespace().nth(1).unwrap_or("");
            let (status, body) = routes
                .iter()
                .find(|(needle, _, _)| target.contains(needle.as_str()))
                .map(|(_, s, b)| (*s, b.clone()))
                .unwrap_or((404, String::new()));

            let reason = if status == 200 { "OK" } else { "Error" };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    StubApi { base_url, hits }
}

fn page_json(work_ids: &[&str], next_cursor: Option<&str>) -> String {
    let results: Vec<String> = work_ids
        .iter()
        .map(|id| format!(r#"{{"id": "https://openalex.org/{id}", "cited_by_count": 1}}"#))
        .collect();
    let cursor = match next_cursor {
        Some(c) => format!(r#""{c}""#),
        None => "null".to_string(),
    };
    format!(
        r#"{{"results": [{}], "meta": {{"next_cursor": {}}}}}"#,
        results.join(","),
        cursor
    )
}

fn stub_config(base_url: &str, per_page: usize) -> Config {
    Config {
        base_url: base_url.to_string(),
        mailto: None,
        per_page,
        concurrency: 2,
        rate_limit: 2,
        max_retries: 0,
    }
}

#[test]
fn null_cursor_after_full_page_issues_one_request() {
    let stub = spawn_stub(vec![(
        "cursor=*".to_string(),
        200,
        page_json(&["W1"], None),
    )]);
    let config = stub_config(&stub.base_url, 1);
    let api = ApiClient::new(&config);
    let permits = PermitPool::new(2);

    let outcome = fetch_author_works(&api, "A1", &permits);

    assert!(!outcome.partial);
    assert_eq!(outcome.works.len(), 1);
    assert_eq!(outcome.requests, 1);
    assert_eq!(stub.hits.load(Ordering::SeqCst), 1);
}

#[test]
fn short_page_terminates_pagination() {
    let stub = spawn_stub(vec![
        (
            "cursor=*".to_string(),
            200,
            page_json(&["W1", "W2"], Some("C2")),
        ),
        (
            "cursor=C2".to_string(),
            200,
            // Short page with a dangling cursor: must stop anyway
            page_json(&["W3"], Some("C3")),
        ),
    ]);
    let config = stub_config(&stub.base_url, 2);
    let api = ApiClient::new(&config);
    let permits = PermitPool::new(2);

    let outcome = fetch_author_works(&api, "A1", &permits);

    assert!(!outcome.partial);
    assert_eq!(outcome.requests, 2);
    let ids: Vec<&str> = outcome.works.iter().map(|w| w.short_id()).collect();
    assert_eq!(ids, vec!["W1", "W2", "W3"]);
    assert_eq!(stub.hits.load(Ordering::SeqCst), 2);
}

#[test]
fn failed_page_keeps_accumulated_works() {
    let stub = spawn_stub(vec![
        (
            "cursor=*".to_string(),
            200,
            page_json(&["W1"], Some("C2")),
        ),
        ("cursor=C2".to_string(), 500, String::new()),
    ]);
    let config = stub_config(&stub.base_url, 1);
    let api = ApiClient::new(&config);
    let permits = PermitPool::new(2);

    let outcome = fetch_author_works(&api, "A1", &permits);

    assert!(outcome.partial);
    assert_eq!(outcome.works.len(), 1);
    assert_eq!(outcome.works[0].short_id(), "W1");
    assert_eq!(outcome.requests, 2);
}

#[test]
fn fetch_many_isolates_partial_failures() {
    let stub = spawn_stub(vec![
        (
            "author.id:A1&per-page=1&cursor=*".to_string(),
            200,
            page_json(&["WA1"], Some("AC2")),
        ),
        ("cursor=AC2".to_string(), 500, String::new()),
        (
            "author.id:B1&per-page=1&cursor=*".to_string(),
            200,
            page_json(&["WB1"], None),
        ),
    ]);
    let config = stub_config(&stub.base_url, 1);
    let progress = Arc::new(ProgressContext::new());
    let ids = vec!["A1".to_string(), "B1".to_string()];

    let (results, summary) = fetch_many(&config, &ids, &progress);

    // B completed fully; A degraded to its one successful page
    assert_eq!(results.len(), 2);
    assert_eq!(results["A1"].len(), 1);
    assert_eq!(results["A1"][0].short_id(), "WA1");
    assert_eq!(results["B1"].len(), 1);
    assert_eq!(results["B1"][0].short_id(), "WB1");

    assert_eq!(summary.total_authors, 2);
    assert_eq!(summary.partial, 1);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.empty, 0);
    assert_eq!(summary.total_works, 2);
}

#[test]
fn fetch_many_omits_empty_authors() {
    let stub = spawn_stub(vec![(
        "cursor=*".to_string(),
        200,
        page_json(&[], None),
    )]);
    let config = stub_config(&stub.base_url, 1);
    let progress = Arc::new(ProgressContext::new());
    let ids = vec!["A1".to_string()];

    let (results, summary) = fetch_many(&config, &ids, &progress);

    assert!(results.is_empty());
    assert_eq!(summary.empty, 1);
    assert!(summary.is_all_empty());
}
