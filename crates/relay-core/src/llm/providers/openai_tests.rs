//! Integration tests for the OpenAI-compatible client with mock server

#[cfg(test)]
mod tests {
    use crate::config::Credential;
    use crate::error::ErrorKind;
    use crate::llm::messages::{GenerationRequest, Message};
    use crate::llm::provider_types::{LlmProvider, TimeoutConfig};
    use crate::llm::providers::{BackendClient, BackendConfig, OpenAiProvider, ProviderInstance};
    use reqwest::Client;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(provider: LlmProvider, base_url: &str) -> BackendConfig {
        BackendConfig {
            provider,
            model: "m1".to_string(),
            base_url: base_url.to_string(),
            temperature: 0.7,
            max_tokens: Some(128),
            timeouts: TimeoutConfig::default(),
            api_key: Some(Credential::new("test-api-key")),
        }
    }

    fn create_test_client(config: BackendConfig) -> ProviderInstance {
        let http_client = Client::builder()
            .no_proxy()
            .build()
            .expect("Failed to create HTTP client");
        let provider = config.provider;
        let inner = OpenAiProvider::new(config, http_client);
        match provider {
            LlmProvider::OpenRouter => ProviderInstance::OpenRouter(inner),
            _ => ProviderInstance::OpenAi(inner),
        }
    }

    fn mock_openai_response(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-test123",
            "object": "chat.completion",
            "model": "m1",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30}
        })
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-api-key"))
            .and(body_partial_json(json!({"model": "m1", "max_tokens": 128})))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_openai_response("Hello!")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(test_config(LlmProvider::OpenAi, &mock_server.uri()));
        let result = client
            .generate(&GenerationRequest::prompt("Hi"))
            .await
            .expect("generation should succeed");

        assert_eq!(result.text, "Hello!");
        assert_eq!(result.metadata.provider, "openai");
        assert_eq!(result.metadata.model, "m1");
        assert_eq!(result.metadata.attempts, 1);
        assert_eq!(result.metadata.finish_reason.as_deref(), Some("stop"));
        let usage = result.metadata.usage.expect("usage present");
        assert_eq!(usage.get("total_tokens"), Some(&30));
    }

    #[tokio::test]
    async fn test_generate_sends_conversation() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "messages": [
                    {"role": "system", "content": "You are terse."},
                    {"role": "user", "content": "What are you?"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_openai_response("A bot.")))
            .mount(&mock_server)
            .await;

        let client = create_test_client(test_config(LlmProvider::OpenAi, &mock_server.uri()));
        let request = GenerationRequest::messages(vec![
            Message::system("You are terse."),
            Message::user("What are you?"),
        ]);
        let result = client.generate(&request).await.unwrap();
        assert_eq!(result.text, "A bot.");
    }

    #[tokio::test]
    async fn test_server_error_is_retryable_and_redacted() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "error": {"message": "overloaded", "api_key": "sk-leaked-secret"}
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(test_config(LlmProvider::OpenAi, &mock_server.uri()));
        let err = client
            .generate(&GenerationRequest::prompt("Hi"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::TransientBackendError);
        assert_eq!(err.provider, "openai");
        assert_eq!(err.model, "m1");
        assert_eq!(err.status, Some(503));
        assert!(err.retryable);
        assert!(err.message.contains("overloaded"));
        assert!(!err.message.contains("sk-leaked-secret"));
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_retryable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(test_config(LlmProvider::OpenAi, &mock_server.uri()));
        let err = client
            .generate(&GenerationRequest::prompt("Hi"))
            .await
            .unwrap_err();

        assert_eq!(err.status, Some(401));
        assert!(!err.retryable);
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(test_config(LlmProvider::OpenAi, &mock_server.uri()));
        let err = client
            .generate(&GenerationRequest::prompt("Hi"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::TransientBackendError);
        assert!(!err.retryable);
        assert!(err.message.contains("Failed to parse openai response"));
    }

    #[tokio::test]
    async fn test_missing_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&mock_server)
            .await;

        let client = create_test_client(test_config(LlmProvider::OpenAi, &mock_server.uri()));
        let err = client
            .generate(&GenerationRequest::prompt("Hi"))
            .await
            .unwrap_err();
        assert!(!err.retryable);
        assert!(err.message.contains("no choices"));
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(mock_openai_response("late"))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&mock_server)
            .await;

        let mut config = test_config(LlmProvider::OpenAi, &mock_server.uri());
        config.timeouts = TimeoutConfig::for_request(Some(Duration::from_millis(200)));
        let client = create_test_client(config);

        let err = client
            .generate(&GenerationRequest::prompt("Hi"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::TransientBackendError);
        assert!(err.retryable);
        assert!(err.message.contains("timed out"));
    }

    #[tokio::test]
    async fn test_empty_conversation_is_rejected_without_a_call() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_openai_response("x")))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = create_test_client(test_config(LlmProvider::OpenAi, &mock_server.uri()));
        let err = client
            .generate(&GenerationRequest::messages(Vec::new()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::TerminalBackendError);
        assert_eq!(err.attempts, 0);
        assert!(!err.retryable);
    }

    #[tokio::test]
    async fn test_openrouter_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("X-Title", "Relay"))
            .and(header("Authorization", "Bearer test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_openai_response("routed")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(test_config(LlmProvider::OpenRouter, &mock_server.uri()));
        let result = client
            .generate(&GenerationRequest::prompt("Hi"))
            .await
            .unwrap();
        assert_eq!(result.text, "routed");
        assert_eq!(result.metadata.provider, "openrouter");
        assert_eq!(client.provider(), "openrouter");
    }
}
