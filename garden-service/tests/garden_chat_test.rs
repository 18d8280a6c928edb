mod common;

use common::TestApp;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gemini_text_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": text }]
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 12,
            "candidatesTokenCount": 34
        }
    })
}

#[tokio::test]
async fn chat_mode_returns_model_answer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_text_response("Water deeply twice a week.")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = TestApp::spawn(&mock_server.uri()).await;

    let response = app
        .post_garden_chat(json!({ "message": "How often should I water lavender?" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["answer"], "Water deeply twice a week.");
}

#[tokio::test]
async fn calendar_mode_forces_json_response_type() {
    let mock_server = MockServer::start().await;

    let schedule = r#"[{"month":"September","task":"Feed citrus","priority":"High","details":"Last feed before winter."}]"#;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_text_response(schedule)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = TestApp::spawn(&mock_server.uri()).await;

    let response = app
        .post_garden_chat(json!({
            "message": "plan my citrus care",
            "mode": "calendar"
        }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["answer"], schedule);
}

#[tokio::test]
async fn identify_mode_sends_inline_image() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(body_partial_json(json!({
            "contents": [{
                "parts": [
                    {},
                    {},
                    { "inline_data": { "mimeType": "image/jpeg", "data": "aGVsbG8=" } }
                ]
            }]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_text_response("That is a tomato hornworm.")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = TestApp::spawn(&mock_server.uri()).await;

    let response = app
        .post_garden_chat(json!({
            "message": "What is eating my tomatoes?",
            "imageBase64": "aGVsbG8=",
            "mode": "identify"
        }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["answer"], "That is a tomato hornworm.");
}

#[tokio::test]
async fn invalid_base64_image_is_rejected() {
    let mock_server = MockServer::start().await;
    let app = TestApp::spawn(&mock_server.uri()).await;

    let response = app
        .post_garden_chat(json!({
            "message": "identify this",
            "imageBase64": "not valid base64!!!",
            "mode": "identify"
        }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let mock_server = MockServer::start().await;
    let app = TestApp::spawn(&mock_server.uri()).await;

    let response = app.post_garden_chat(json!({ "message": "" })).await;

    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn safety_blocked_response_maps_to_bad_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [] },
                "finishReason": "SAFETY"
            }]
        })))
        .mount(&mock_server)
        .await;

    let app = TestApp::spawn(&mock_server.uri()).await;

    let response = app
        .post_garden_chat(json!({ "message": "something questionable" }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn upstream_rate_limit_maps_to_429() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&mock_server)
        .await;

    let app = TestApp::spawn(&mock_server.uri()).await;

    let response = app.post_garden_chat(json!({ "message": "hello" })).await;

    assert_eq!(response.status().as_u16(), 429);
}

#[tokio::test]
async fn upstream_error_maps_to_bad_gateway() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&mock_server)
        .await;

    let app = TestApp::spawn(&mock_server.uri()).await;

    let response = app.post_garden_chat(json!({ "message": "hello" })).await;

    assert_eq!(response.status().as_u16(), 502);
}

#[tokio::test]
async fn response_without_text_maps_to_bad_gateway() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [] },
                "finishReason": "STOP"
            }]
        })))
        .mount(&mock_server)
        .await;

    let app = TestApp::spawn(&mock_server.uri()).await;

    let response = app.post_garden_chat(json!({ "message": "hello" })).await;

    assert_eq!(response.status().as_u16(), 502);
}

#[tokio::test]
async fn preflight_request_is_allowed_for_any_origin() {
    let mock_server = MockServer::start().await;
    let app = TestApp::spawn(&mock_server.uri()).await;

    let response = app
        .client
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/garden-chat", app.address),
        )
        .header("Origin", "https://intelliflake.example")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
