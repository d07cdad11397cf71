//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use flight_query::config::ServiceConfig;
use flight_query::http::HttpServer;
use quick_xml::events::Event;
use quick_xml::Reader;
use tower::ServiceExt;

pub const SCENARIO_DATASET: &str = concat!(
    r#"{"AIR_TIME":100,"DISTANCE":200,"FL_DATE":"2020-01-01"}"#,
    "\n",
    r#"{"AIR_TIME":50,"DISTANCE":90,"FL_DATE":"2020-01-02"}"#,
    "\n",
);

/// Write `contents` to a per-test file in the temp directory.
pub fn write_dataset(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "flight_query_it_{}_{}.jsonl",
        name,
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

/// `n` records with AIR_TIME = DISTANCE = line index.
pub fn numbered_dataset(n: usize) -> String {
    (0..n)
        .map(|i| format!("{{\"AIR_TIME\":{},\"DISTANCE\":{}}}\n", i, i))
        .collect()
}

pub fn config_for(path: PathBuf) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.dataset.path = Some(path);
    config
}

pub fn router_for(path: PathBuf) -> Router {
    HttpServer::new(config_for(path)).unwrap().router()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn counts(&self) -> (usize, usize) {
        (
            self.header("x-total-records").unwrap().parse().unwrap(),
            self.header("x-returned-records").unwrap().parse().unwrap(),
        )
    }
}

/// Drive one request through the router without a socket.
pub async fn send(router: Router, method: Method, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

/// Parse a flights document into `(element, text)` pairs per record.
pub fn parse_rows(xml: &str) -> Vec<Vec<(String, String)>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut rows = Vec::new();
    let mut current: Option<Vec<(String, String)>> = None;
    let mut field: Option<String> = None;

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) => {
                let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                match name.as_str() {
                    "flight" => current = Some(Vec::new()),
                    "flights" => {}
                    _ => field = Some(name),
                }
            }
            Event::Text(t) => {
                if let (Some(row), Some(name)) = (current.as_mut(), field.take()) {
                    row.push((name, t.unescape().unwrap().into_owned()));
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"flight" {
                    rows.extend(current.take());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    rows
}

pub fn row(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
