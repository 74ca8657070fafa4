#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use soccer_stats::{ApiResult, FootballApi, RawResponse, Transport};

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub api_key: String,
}

/// Serves canned bodies and records every request. A route registered as
/// `"/players?team"` wins over `"/players"` when the first query key is `team`.
#[derive(Default)]
pub struct StubTransport {
    routes: HashMap<String, RawResponse>,
    pub calls: RefCell<Vec<Call>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, path: &str, fixture: &str) -> Self {
        self.routes.insert(
            path.to_string(),
            RawResponse {
                status: 200,
                body: read_fixture(fixture),
            },
        );
        self
    }

    pub fn route_raw(mut self, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            path.to_string(),
            RawResponse {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Transport for StubTransport {
    fn get(&self, path: &str, query: &[(&str, String)], api_key: &str) -> ApiResult<RawResponse> {
        self.calls.borrow_mut().push(Call {
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            api_key: api_key.to_string(),
        });
        let keyed = query.first().map(|(k, _)| format!("{path}?{k}"));
        let hit = keyed
            .and_then(|k| self.routes.get(&k))
            .or_else(|| self.routes.get(path));
        Ok(hit.cloned().unwrap_or(RawResponse {
            status: 404,
            body: String::new(),
        }))
    }
}

pub fn api(transport: StubTransport) -> FootballApi<StubTransport> {
    FootballApi::with_transport(transport)
}
