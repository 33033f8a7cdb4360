use serde_json::json;
use shadow_core::{CalculatorConfig, ScoreInput, ShadowFruit, SystemState};
use shadow_runtime::{
    EMPTY_COMPLETION, GenerationConfig, GenerationHandler, GenerationRequest, SYSTEM_PROMPT,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> GenerationConfig {
    GenerationConfig::default()
        .with_api_key("sk-test")
        .with_base_url(format!("{}/v1", server.uri()))
}

#[tokio::test]
async fn non_post_is_rejected_before_anything_else() {
    let handler = GenerationHandler::unconfigured();
    let response = handler.handle("GET", None).await;

    assert_eq!(response.status, 405);
    assert_eq!(response.body, json!({ "error": "Method not allowed" }));
}

#[tokio::test]
async fn missing_credential_is_a_configuration_error() {
    let handler = GenerationHandler::from_config(&GenerationConfig::default());
    let response = handler.handle("POST", Some(json!({}))).await;

    assert_eq!(response.status, 500);
    assert_eq!(
        response.body,
        json!({ "error": "Missing OPENAI_API_KEY in environment variables." })
    );
}

#[tokio::test]
async fn successful_completion_returns_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4.1-mini",
            "max_tokens": 900
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "## Night Fang\n- 4d8 necrotic" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let handler = GenerationHandler::from_config(&config_for(&server));
    let response = handler
        .handle(
            "POST",
            Some(json!({ "totalAsp": 300, "spentAsp": 0, "availableAsp": 300 })),
        )
        .await;

    assert_eq!(response.status, 200);
    assert!(response.is_success());
    assert_eq!(response.text(), Some("## Night Fang\n- 4d8 necrotic"));

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
    assert!(body["messages"][1]["content"].as_str().unwrap().contains("Total ASP: 300"));
}

#[tokio::test]
async fn fractional_form_values_pass_through_to_the_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "ok" } }]
        })))
        .mount(&server)
        .await;

    let handler = GenerationHandler::from_config(&config_for(&server));
    let response = handler
        .handle(
            "POST",
            Some(json!({
                "shadows": [{ "name": "Oars", "shadowLevel": 7, "rawMight": 12.5, "ttLabel": "Giant", "active": true }],
                "totalAsp": 300.5
            })),
        )
        .await;

    assert_eq!(response.status, 200);
    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains("Total ASP: 300.5\n"));
    assert!(user.contains("Name: Oars | SL 7 | Raw Might 12.5 | Template: Giant | Active: Yes"));
}

#[tokio::test]
async fn empty_choices_fall_back_to_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let handler = GenerationHandler::from_config(&config_for(&server));
    let response = handler.handle("POST", None).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.text(), Some(EMPTY_COMPLETION));
}

#[tokio::test]
async fn upstream_failure_carries_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("{\"error\":\"bad key\"}"))
        .mount(&server)
        .await;

    let handler = GenerationHandler::from_config(&config_for(&server));
    let response = handler.handle("POST", Some(json!({}))).await;

    assert_eq!(response.status, 500);
    assert_eq!(
        response.body,
        json!({ "error": "OpenAI API error", "details": "{\"error\":\"bad key\"}" })
    );
}

#[tokio::test]
async fn request_from_document_reaches_the_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "ok" } }]
        })))
        .mount(&server)
        .await;

    let config = CalculatorConfig::default();
    let mut state = SystemState::new(&config);
    {
        let mut fruit = ShadowFruit::new(&mut state, &config);
        fruit.commit_shadow("Oars", ScoreInput::clamped(20, 9, 9));
        fruit.adjust_stack("temp20", 1).unwrap();
    }
    let request = GenerationRequest::from_state(&state, "  giant theme ");
    assert_eq!(request.total_spu.as_u64(), Some(1000));
    assert_eq!(request.spent_spu.as_u64(), Some(8));
    assert_eq!(request.available_spu.as_u64(), Some(992));
    assert_eq!(request.selected_buff_ids, vec!["temp20".to_string()]);
    assert!(request.prompt().contains("Extra notes / theme from user:\ngiant theme\n"));

    let handler = GenerationHandler::from_config(&config_for(&server));
    assert_eq!(handler.generate(&request).await.unwrap(), "ok");

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains("Name: Oars | SL 10 | Raw Might 20"));
    assert!(user.contains("Selected buffs (IDs or names): temp20"));
}
