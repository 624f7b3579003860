use std::sync::Arc;
use std::time::Duration;

use lexvis_core::GrammarArtifact;
use lexvis_engine::{
    ClientSettings, EngineEvent, EngineEvents, EngineHandle, FailureKind, ReqwestTokenizeClient,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn spawn_engine(server: &MockServer) -> (EngineHandle, EngineEvents) {
    let client = ReqwestTokenizeClient::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    })
    .expect("client");
    EngineHandle::spawn(Arc::new(client)).expect("engine")
}

async fn next_event(events: EngineEvents) -> (EngineEvents, Option<EngineEvent>) {
    tokio::task::spawn_blocking(move || {
        let event = events.recv_timeout(Duration::from_secs(5));
        (events, event)
    })
    .await
    .expect("join")
}

#[tokio::test(flavor = "multi_thread")]
async fn tokenize_completion_carries_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tokenize"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"tokens":[{"text":"a","type":"WORD","line":1,"column":0,"channel":0,"token_index":0,"start":0,"stop":0}]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let (engine, events) = spawn_engine(&server);
    engine.tokenize(
        42,
        GrammarArtifact::new("g.g4", "text/plain", b"grammar".to_vec()),
        "a".to_string(),
    );

    let (_events, event) = next_event(events).await;
    match event {
        Some(EngineEvent::TokenizeCompleted { request_id, result }) => {
            assert_eq!(request_id, 42);
            let output = result.expect("ok");
            assert_eq!(output.tokens.len(), 1);
            assert_eq!(output.echoed_input, None);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn probe_failure_is_reported_as_event() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (engine, events) = spawn_engine(&server);
    engine.probe();

    let (_events, event) = next_event(events).await;
    match event {
        Some(EngineEvent::ProbeCompleted { result }) => {
            assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(404));
        }
        other => panic!("unexpected event {other:?}"),
    }
}
