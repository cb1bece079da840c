use httpmock::Method::POST;
use httpmock::MockServer;
use llm::{GenerationClient, LLMError, OllamaClient};

#[tokio::test]
async fn generate_returns_trimmed_response() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/generate")
            .body_contains("\"num_predict\":260")
            .body_contains("\"temperature\":0.0")
            .body_contains("Explain recursion");
        then.status(200)
            .header("content-type", "application/json")
            .body("{\"model\":\"llama3.2\",\"created_at\":\"now\",\"response\":\"  Recursion is a function calling itself. \",\"done\":true}");
    });

    let client = OllamaClient::try_new(server.base_url(), "llama3.2").unwrap();
    let text = client.generate("Explain recursion", 260).await.unwrap();
    mock.assert();
    assert_eq!(text, "Recursion is a function calling itself.");
}

#[tokio::test]
async fn oversized_budget_saturates_instead_of_wrapping() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/generate")
            .body_contains("\"num_predict\":2147483647");
        then.status(200)
            .header("content-type", "application/json")
            .body("{\"model\":\"llama3.2\",\"created_at\":\"now\",\"response\":\"ok\",\"done\":true}");
    });

    let client = OllamaClient::try_new(server.base_url(), "llama3.2").unwrap();
    let text = client.generate("Explain sets", 3_000_000_000).await.unwrap();
    mock.assert();
    assert_eq!(text, "ok");
}

#[tokio::test]
async fn server_error_is_network_error() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/generate");
        then.status(500).body("boom");
    });

    let client = OllamaClient::try_new(server.base_url(), "llama3.2").unwrap();
    let err = client.generate("anything", 10).await.unwrap_err();
    assert!(matches!(err, LLMError::Network(_)));
}

#[test]
fn rejects_unparseable_url() {
    assert!(OllamaClient::try_new("not a url", "m").is_err());
}
