//! Integration tests for the document-processing endpoint.
//!
//! Run with: cargo test -p chat-service --test process_test

use chat_service::config::ChatConfig;
use chat_service::startup::Application;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

async fn spawn_app() -> u16 {
    std::env::set_var("ENVIRONMENT", "test");
    std::env::set_var("APP__PORT", "0");
    std::env::set_var("CHAT_PROVIDER", "mock");

    let config = ChatConfig::load().expect("Failed to load config");
    let app = Application::build(config)
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

#[tokio::test]
async fn process_plain_text_returns_completion() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/v1/process", port))
        .json(&json!({
            "input_type": "Text",
            "input": "The quick brown fox jumps over the lazy dog.",
            "instruction": "Summarize in five words. ",
            "model": "GPT-4o mini",
            "api_key": "test-key",
        }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    // Instruction and content are concatenated into a single user message.
    assert_eq!(
        body["output"],
        "Mock completion for: Summarize in five words. The quick brown fox jumps over the lazy dog."
    );
}

#[tokio::test]
async fn process_rejects_unsupported_input_type() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/v1/process", port))
        .json(&json!({
            "input_type": "Spreadsheet URL",
            "input": "https://example.com/sheet.xlsx",
            "instruction": "Summarize",
            "model": "GPT-4o mini",
            "api_key": "test-key",
        }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("unsupported input type"));
}

#[tokio::test]
async fn process_rejects_unknown_model() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/v1/process", port))
        .json(&json!({
            "input_type": "Text",
            "input": "Some text",
            "instruction": "Summarize",
            "model": "not-a-model",
            "api_key": "test-key",
        }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn process_webpage_fetch_failure_reports_in_band() {
    let port = spawn_app().await;
    let client = Client::new();

    // Unroutable address: the fetch fails, but the endpoint still returns
    // 200 with diagnostic text in the output.
    let response = client
        .post(format!("http://localhost:{}/v1/process", port))
        .json(&json!({
            "input_type": "Webpage URL",
            "input": "http://127.0.0.1:1/nothing-here",
            "instruction": "Summarize",
            "model": "GPT-4o mini",
            "api_key": "test-key",
        }))
        .timeout(Duration::from_secs(30))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["output"]
        .as_str()
        .unwrap()
        .contains("Error processing webpage"));
}
