use crate::config::EngineConfig;
use crate::error::AppError;
use crate::llm::traits::GenerativeModel;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, instrument};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` endpoint.
///
/// Built once by the application's composition root and shared (via `Arc`) with
/// every engine component. Cloning is cheap: the underlying `reqwest::Client`
/// pools connections internally.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    temperature: Option<f32>,
    request_timeout: Duration,
}

// --- Wire types ---

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl GeminiClient {
    /// Creates a client from a validated configuration.
    pub fn new(config: &EngineConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.api_base_url.as_str().trim_end_matches('/'),
            config.model_id
        );

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            request_timeout: config.request_timeout(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_headers(&self) -> Result<HeaderMap, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| AppError::Config(format!("API key is not a valid header value: {}", e)))?;
        headers.insert(API_KEY_HEADER, key);
        Ok(headers)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate(&self, prompt: String) -> Result<String, AppError> {
        let payload = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart { text: &prompt }],
            }],
            generation_config: self.temperature.map(|temperature| GenerationConfig { temperature }),
        };

        let request_future = self
            .client
            .post(&self.endpoint)
            .headers(self.build_headers()?)
            .json(&payload)
            .send();

        let res = timeout(self.request_timeout, request_future).await??;
        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!("Gemini request failed with status {}", status);
            return Err(AppError::ExternalService(format!(
                "Generation request failed with status {}: {}",
                status, body
            )));
        }

        let body = res.text().await?;
        let response: GenerateResponse = serde_json::from_str(&body)?;

        if let Some(api_error) = response.error {
            return Err(AppError::ExternalService(format!("Gemini error: {}", api_error.message)));
        }

        let candidate = response
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .ok_or_else(|| AppError::MalformedOutput("response contained no candidates".to_string()))?;

        let text: String = candidate
            .content
            .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
            return Err(AppError::MalformedOutput(format!(
                "candidate had no text (finish reason: {})",
                reason
            )));
        }

        debug!(response_len = text.len(), "Gemini generation complete");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

    async fn setup_client(server: &MockServer) -> GeminiClient {
        let config = EngineConfig::new("test-key")
            .unwrap()
            .with_base_url(&format!("{}/v1beta", server.uri()))
            .unwrap();
        GeminiClient::new(&config).unwrap()
    }

    fn text_response(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn test_generate_success() {
        // 1. Arrange
        let server = MockServer::start().await;
        let client = setup_client(&server).await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Hello" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Hi there.")))
            .mount(&server)
            .await;

        // 2. Act
        let result = client.generate("Hello".to_string()).await;

        // 3. Assert
        assert_eq!(result.unwrap(), "Hi there.");
    }

    #[tokio::test]
    async fn test_generate_joins_multiple_parts() {
        let server = MockServer::start().await;
        let client = setup_client(&server).await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "Part one, " }, { "text": "part two." }] } }]
            })))
            .mount(&server)
            .await;

        let result = client.generate("Hello".to_string()).await.unwrap();
        assert_eq!(result, "Part one, part two.");
    }

    #[tokio::test]
    async fn test_generate_server_error() {
        let server = MockServer::start().await;
        let client = setup_client(&server).await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let result = client.generate("Hello".to_string()).await;

        if let Err(AppError::ExternalService(err_msg)) = result {
            assert!(err_msg.contains("status 500"));
            assert!(err_msg.contains("Internal Server Error"));
        } else {
            panic!("Expected AppError::ExternalService, got {:?}", result);
        }
    }

    #[tokio::test]
    async fn test_generate_blocked_candidate_is_malformed() {
        let server = MockServer::start().await;
        let client = setup_client(&server).await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "finishReason": "SAFETY" }]
            })))
            .mount(&server)
            .await;

        let result = client.generate("Hello".to_string()).await;
        match result {
            Err(AppError::MalformedOutput(msg)) => assert!(msg.contains("SAFETY")),
            other => panic!("Expected MalformedOutput, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_non_json_body_is_malformed() {
        let server = MockServer::start().await;
        let client = setup_client(&server).await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = client.generate("Hello".to_string()).await;
        assert!(matches!(result, Err(AppError::MalformedOutput(_))));
    }

    #[tokio::test]
    async fn test_generate_times_out() {
        let server = MockServer::start().await;
        let mut client = setup_client(&server).await;
        client.request_timeout = Duration::from_millis(50);

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(text_response("late"))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let result = client.generate("Hello".to_string()).await;
        assert!(matches!(result, Err(AppError::Timeout(_))));
    }

    #[test]
    fn test_endpoint_format() {
        let config = EngineConfig::new("k").unwrap();
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
