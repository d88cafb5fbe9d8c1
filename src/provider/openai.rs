//! OpenAI Images API client.
//!
//! Docs: https://platform.openai.com/docs/api-reference/images

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use super::{ImageProvider, ImageRequest, ImageSize};
use crate::constants::PROVIDER_NAME;
use crate::error::GeneratorError;

/// Request body for POST /v1/images/generations
#[derive(Serialize, Debug)]
struct ImagesGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    quality: &'a str,
}

#[derive(Deserialize, Debug)]
struct ImagesGenerateResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize, Debug)]
struct ImageData {
    b64_json: Option<String>,
    url: Option<String>,
    revised_prompt: Option<String>,
}

/// Calls the OpenAI Images API.
#[derive(Clone, Debug)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: Url,
}

impl OpenAiProvider {
    /// Builds a provider. `timeout` bounds each whole request when set.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: Url,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            api_key: api_key.into(),
            model: model.into(),
            base_url,
        })
    }

    /// The image model in use.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn generations_url(&self) -> String {
        format!(
            "{}/images/generations",
            self.base_url.as_str().trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ImageProvider for OpenAiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn wire_size(&self, size: ImageSize) -> &'static str {
        size.for_model(&self.model)
    }

    async fn generate(&self, request: &ImageRequest<'_>) -> Result<String, GeneratorError> {
        let size = self.wire_size(request.size);
        let req_body = ImagesGenerateRequest {
            model: &self.model,
            prompt: request.prompt,
            n: request.count,
            size,
            quality: request.quality.for_model(&self.model),
        };

        info!("Generating image with {}. Size: {}", self.model, size);

        let resp = self
            .client
            .post(self.generations_url())
            .bearer_auth(&self.api_key)
            .json(&req_body)
            .send()
            .await?;

        let status = resp.status();
        let resp_bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(GeneratorError::Provider(format!(
                "OpenAI Images API error {status}: {}",
                String::from_utf8_lossy(&resp_bytes)
            )));
        }

        let parsed: ImagesGenerateResponse = serde_json::from_slice(&resp_bytes).map_err(|err| {
            GeneratorError::Provider(format!(
                "Failed to parse /v1/images/generations JSON: {err}"
            ))
        })?;

        let first = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| GeneratorError::Provider("No image data returned".to_string()))?;

        if let Some(revised_prompt) = first.revised_prompt {
            debug!("Revised prompt from OpenAI: {revised_prompt}");
        }

        match (first.url, first.b64_json) {
            (Some(url), _) if !url.is_empty() => Ok(url),
            (_, Some(b64_json)) if !b64_json.is_empty() => {
                Ok(format!("data:image/png;base64,{b64_json}"))
            }
            _ => Err(GeneratorError::Provider(
                "Image response missing b64_json and url fields".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GenerateBody, Generator};
    use crate::history::HistoryLog;
    use crate::prompt::StyleGuide;

    use axum::Json;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    /// Serves a canned response on an ephemeral port and records what it was sent.
    async fn mock_openai(status: StatusCode, response: Value) -> (Url, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();
        let app = Router::new().route(
            "/v1/images/generations",
            axum::routing::post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let recorder = recorder.clone();
                let response = response.clone();
                async move {
                    let auth = headers
                        .get(AUTHORIZATION)
                        .and_then(|value| value.to_str().ok())
                        .map(str::to_owned);
                    recorder.lock().await.push((auth, body));
                    (status, Json(response))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        let base_url = Url::parse(&format!("http://{addr}/v1")).expect("parse mock url");
        (base_url, seen)
    }

    fn provider(base_url: Url, model: &str) -> OpenAiProvider {
        OpenAiProvider::new("sk-test", model, base_url, Some(Duration::from_secs(5)))
            .expect("build provider")
    }

    #[tokio::test]
    async fn returns_first_url_and_sends_expected_body() {
        let (base_url, seen) = mock_openai(
            StatusCode::OK,
            json!({
                "created": 1,
                "data": [
                    {"url": "https://images.example/1.png", "revised_prompt": "a cup"},
                    {"url": "https://images.example/2.png"}
                ]
            }),
        )
        .await;
        let provider = provider(base_url, "dall-e-3");

        let url = provider
            .generate(&ImageRequest::new("draw a cup", ImageSize::Tall))
            .await
            .expect("generate");
        assert_eq!(url, "https://images.example/1.png");

        let seen = seen.lock().await;
        assert_eq!(seen.len(), 1);
        let (auth, body) = &seen[0];
        assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
        assert_eq!(body["model"], "dall-e-3");
        assert_eq!(body["prompt"], "draw a cup");
        assert_eq!(body["n"], 1);
        assert_eq!(body["size"], "1024x1792");
        assert_eq!(body["quality"], "hd");
    }

    #[tokio::test]
    async fn base64_payload_becomes_data_url() {
        let (base_url, seen) =
            mock_openai(StatusCode::OK, json!({"data": [{"b64_json": "iVBORw0KGgo="}]})).await;
        let provider = provider(base_url, "gpt-image-1");

        let url = provider
            .generate(&ImageRequest::new("draw a leaf", ImageSize::Wide))
            .await
            .expect("generate");
        assert_eq!(url, "data:image/png;base64,iVBORw0KGgo=");

        let seen = seen.lock().await;
        assert_eq!(seen[0].1["size"], "1536x1024");
        assert_eq!(seen[0].1["quality"], "high");
    }

    #[tokio::test]
    async fn empty_data_is_a_provider_error() {
        let (base_url, _) = mock_openai(StatusCode::OK, json!({"data": []})).await;
        let err = provider(base_url, "dall-e-3")
            .generate(&ImageRequest::new("nothing", ImageSize::Square))
            .await
            .expect_err("no images");
        assert!(matches!(err, GeneratorError::Provider(_)));
    }

    #[tokio::test]
    async fn entry_without_reference_is_a_provider_error() {
        let (base_url, _) =
            mock_openai(StatusCode::OK, json!({"data": [{"revised_prompt": "x"}]})).await;
        let err = provider(base_url, "dall-e-3")
            .generate(&ImageRequest::new("nothing", ImageSize::Square))
            .await
            .expect_err("no reference");
        assert!(matches!(err, GeneratorError::Provider(_)));
    }

    #[tokio::test]
    async fn upstream_failure_is_a_provider_error() {
        let (base_url, _) = mock_openai(
            StatusCode::BAD_REQUEST,
            json!({"error": {"message": "content policy violation"}}),
        )
        .await;
        let err = provider(base_url, "dall-e-3")
            .generate(&ImageRequest::new("blocked", ImageSize::Square))
            .await
            .expect_err("upstream 400");
        assert!(
            matches!(&err, GeneratorError::Provider(message)
                if message.contains("400") && message.contains("content policy violation")),
            "unexpected error: {err:?}"
        );
    }

    #[tokio::test]
    async fn history_records_the_size_sent_to_gpt_image_models() {
        let (base_url, seen) = mock_openai(
            StatusCode::OK,
            json!({"data": [{"url": "https://images.example/tall.png"}]}),
        )
        .await;
        let dir = tempfile::tempdir().expect("tempdir");
        let history = HistoryLog::new(dir.path().join("history.md"));
        let provider: Arc<dyn ImageProvider> = Arc::new(provider(base_url, "gpt-image-1"));
        let generator = Generator::new(
            StyleGuide::new("Muted greens."),
            Some(provider),
            history.clone(),
        );

        let body = GenerateBody {
            usage: Some("Hero Background".to_string()),
            dimension: Some("Vertical (9:16)".to_string()),
            subject: Some("forest path".to_string()),
            additional_details: None,
        };
        let result = generator.generate(body).await.expect("generate");
        assert_eq!(result.image_url, "https://images.example/tall.png");

        assert_eq!(seen.lock().await[0].1["size"], "1024x1536");
        let logged = std::fs::read_to_string(history.path()).expect("history written");
        assert!(logged.contains("(Mapped to: 1024x1536)"), "{logged}");
        assert!(!logged.contains("1024x1792"));
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_provider_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        let base_url = Url::parse(&format!("http://{addr}/v1")).expect("url");
        let err = provider(base_url, "dall-e-3")
            .generate(&ImageRequest::new("offline", ImageSize::Square))
            .await
            .expect_err("connection refused");
        assert!(matches!(err, GeneratorError::Provider(_)));
    }
}
