#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use feedctl::auth::{MemorySessionStore, SessionEvent};
use feedctl::client::ApiClient;
use wiremock::{MockServer, Request};

/// Base path the service mounts its API under.
pub const API_PREFIX: &str = "/api";

pub fn api_path(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

/// Collects session events emitted by a client.
#[derive(Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().expect("recorder lock poisoned").clone()
    }
}

pub fn client_for(server: &MockServer, store: Arc<MemorySessionStore>) -> ApiClient {
    ApiClient::new(format!("{}{API_PREFIX}", server.uri()), store).expect("build client")
}

pub fn recording_client(
    server: &MockServer,
    store: Arc<MemorySessionStore>,
) -> (ApiClient, EventRecorder) {
    let recorder = EventRecorder::new();
    let sink_events = recorder.events.clone();
    let client = client_for(server, store).with_event_sink(Arc::new(
        move |event: SessionEvent| {
            sink_events
                .lock()
                .expect("recorder lock poisoned")
                .push(event);
        },
    ));
    (client, recorder)
}

pub fn authorization(request: &Request) -> Option<String> {
    request
        .headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

pub async fn requests_to(server: &MockServer, path: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .into_iter()
        .filter(|request| request.url.path() == api_path(path))
        .collect()
}
