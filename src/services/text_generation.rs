use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::{GenerationConfig, ModelConfig};
use crate::error::GenerationError;
use crate::utils::{log_generate, Logger};

/// Text-generation seam: prompt in, generated text out.
///
/// The returned text may start with an echo of the prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
    do_sample: bool,
}

impl From<&GenerationConfig> for InferenceParameters {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            max_new_tokens: config.max_new_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
            do_sample: config.do_sample,
        }
    }
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
    use_cache: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

#[derive(Debug, Deserialize)]
struct InferenceErrorBody {
    error: String,
}

/// Client for a Hugging Face style text-generation inference endpoint.
pub struct HuggingFaceClient {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
    parameters: GenerationConfig,
    logger: Logger,
}

impl HuggingFaceClient {
    pub fn new(config: &ModelConfig, timeout: Option<std::time::Duration>) -> Result<Self, GenerationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GenerationError::ModelUnavailable(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_token: config.api_token.clone(),
            parameters: config.generation.clone(),
            logger: Logger::new("MODEL"),
        })
    }

    fn build_request<'a>(&self, prompt: &'a str) -> InferenceRequest<'a> {
        InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters::from(&self.parameters),
            options: InferenceOptions {
                wait_for_model: true,
                use_cache: false,
            },
        }
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        log_generate(&format!(
            "POST {} (max_new_tokens: {}, temperature: {}, top_p: {})",
            self.endpoint, self.parameters.max_new_tokens, self.parameters.temperature, self.parameters.top_p
        ));

        let mut request = self.client.post(&self.endpoint).json(&self.build_request(prompt));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                GenerationError::ModelUnavailable(e.to_string())
            } else {
                GenerationError::Generation(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Generation(e.to_string()))?;

        if !status.is_success() {
            let err = classify_http_error(status, &body);
            self.logger.warn_with_error("Model request failed", &err);
            return Err(err);
        }

        parse_generated_text(&body)
    }
}

/// Map a non-success response to an error, preferring the server's message.
pub fn classify_http_error(status: StatusCode, body: &str) -> GenerationError {
    let message = serde_json::from_str::<InferenceErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.chars().take(200).collect());
    let detail = format!("HTTP {}: {}", status, message);

    match status {
        StatusCode::NOT_FOUND | StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
            GenerationError::ModelUnavailable(detail)
        }
        _ => GenerationError::Generation(detail),
    }
}

/// Extract the first generated text from an inference response body.
pub fn parse_generated_text(body: &str) -> Result<String, GenerationError> {
    let response: InferenceResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::Generation(format!("invalid response: {}", e)))?;

    match response {
        InferenceResponse::Single(item) => Ok(item.generated_text),
        InferenceResponse::Batch(items) => items
            .into_iter()
            .next()
            .map(|item| item.generated_text)
            .ok_or_else(|| GenerationError::Generation("model returned no text".to_string())),
    }
}
