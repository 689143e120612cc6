mod common;

use axum::http::StatusCode;
use mrscribe::providers::{LlmGateway, ProviderKind};
use mrscribe_schema::ChatMessage;
use serde_json::json;
use std::sync::atomic::Ordering;

fn messages() -> Vec<ChatMessage> {
    vec![ChatMessage::system("sys"), ChatMessage::user("hi")]
}

#[tokio::test]
async fn returns_first_choice_content() {
    let llm = common::spawn_llm(vec![(StatusCode::OK, common::chat_reply("hello"))]).await;
    let cfg = common::stub_config("sqlite::memory:", llm.addr, llm.addr);
    let gateway = LlmGateway::from_config(&cfg).expect("gateway");

    let out = gateway
        .complete(ProviderKind::OpenRouter, "gpt-x", &messages())
        .await;
    assert_eq!(out.as_deref(), Some("hello"));

    let requests = llm.requests.lock().expect("lock").clone();
    assert_eq!(requests[0].1["messages"][0]["content"], "sys");
}

#[tokio::test]
async fn failures_collapse_to_none() {
    for reply in [
        (StatusCode::UNAUTHORIZED, json!({ "error": "bad key" })),
        (StatusCode::OK, json!({ "choices": [{ "index": 0, "message": { "role": "assistant" } }] })),
        (StatusCode::OK, json!("not an object")),
    ] {
        let llm = common::spawn_llm(vec![reply.clone()]).await;
        let cfg = common::stub_config("sqlite::memory:", llm.addr, llm.addr);
        let gateway = LlmGateway::from_config(&cfg).expect("gateway");

        let out = gateway
            .complete(ProviderKind::Cerebras, "llama-3", &messages())
            .await;
        assert_eq!(out, None, "{reply:?}");
        assert_eq!(llm.hits.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test]
async fn unreachable_backend_is_none() {
    // Grab a free port, then close it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let cfg = common::stub_config("sqlite::memory:", addr, addr);
    let gateway = LlmGateway::from_config(&cfg).expect("gateway");
    let out = gateway
        .complete(ProviderKind::OpenRouter, "gpt-x", &messages())
        .await;
    assert_eq!(out, None);
}

#[tokio::test]
async fn opt_in_retry_recovers_from_transient_errors() {
    let llm = common::spawn_llm(vec![
        (StatusCode::SERVICE_UNAVAILABLE, json!({ "error": "busy" })),
        (StatusCode::OK, common::chat_reply("second time lucky")),
    ])
    .await;
    let mut cfg = common::stub_config("sqlite::memory:", llm.addr, llm.addr);
    cfg.providers.open_router.retry_max_times = Some(2);
    let gateway = LlmGateway::from_config(&cfg).expect("gateway");

    let out = gateway
        .complete(ProviderKind::OpenRouter, "gpt-x", &messages())
        .await;
    assert_eq!(out.as_deref(), Some("second time lucky"));
    assert_eq!(llm.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let llm = common::spawn_llm(vec![(StatusCode::BAD_REQUEST, json!({ "error": "nope" }))]).await;
    let mut cfg = common::stub_config("sqlite::memory:", llm.addr, llm.addr);
    cfg.providers.defaults.retry_max_times = 3;
    let gateway = LlmGateway::from_config(&cfg).expect("gateway");

    let out = gateway
        .complete(ProviderKind::Cerebras, "llama-3", &messages())
        .await;
    assert_eq!(out, None);
    assert_eq!(llm.hits.load(Ordering::SeqCst), 1);
}
