//! The generate pipeline: validate, build the prompt, call the provider, log.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::PROVIDER_NAME;
use crate::error::GeneratorError;
use crate::history::{HistoryEntry, HistoryLog};
use crate::prompt::{GenerationRequest, ImageDimension, ImageUsage, StyleGuide, build_prompt};
use crate::provider::{ImageProvider, ImageRequest, ImageSize};

/// Raw request body, before validation.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    /// Usage context label
    pub usage: Option<String>,
    /// Dimension label
    pub dimension: Option<String>,
    /// Subject of the image
    pub subject: Option<String>,
    /// Optional extra direction
    pub additional_details: Option<String>,
}

impl GenerateBody {
    /// Checks the required fields are present and non-empty.
    pub fn validate(self) -> Result<GenerationRequest, GeneratorError> {
        let (Some(usage), Some(dimension), Some(subject)) = (
            non_empty(self.usage),
            non_empty(self.dimension),
            non_empty(self.subject),
        ) else {
            return Err(GeneratorError::MissingFields);
        };

        Ok(GenerationRequest {
            usage: ImageUsage::from_label(&usage),
            dimension: ImageDimension::from_label(&dimension),
            subject,
            additional_details: non_empty(self.additional_details),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// A generated image and the prompt that made it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Prompt sent to the provider
    pub prompt: String,
    /// URL (or `data:` URL) of the image
    pub image_url: String,
}

/// Runs generation requests against one provider.
#[derive(Clone)]
pub struct Generator {
    style_guide: StyleGuide,
    provider: Option<Arc<dyn ImageProvider>>,
    history: HistoryLog,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("style_guide", &self.style_guide)
            .field("provider", &self.provider.as_ref().map(|provider| provider.name()))
            .field("history", &self.history)
            .finish()
    }
}

impl Generator {
    /// `provider` is `None` when no API key is configured; every generate
    /// call then fails with [`GeneratorError::ProviderNotConfigured`].
    pub fn new(
        style_guide: StyleGuide,
        provider: Option<Arc<dyn ImageProvider>>,
        history: HistoryLog,
    ) -> Self {
        Self {
            style_guide,
            provider,
            history,
        }
    }

    /// The style guide injected into prompts.
    pub fn style_guide(&self) -> &StyleGuide {
        &self.style_guide
    }

    /// Handles one request end to end.
    pub async fn generate(&self, body: GenerateBody) -> Result<GenerationResult, GeneratorError> {
        let request = body.validate()?;
        let prompt = build_prompt(&request, &self.style_guide);
        let size = ImageSize::for_dimension(request.dimension.label());

        let Some(provider) = self.provider.as_ref() else {
            return Err(GeneratorError::ProviderNotConfigured(
                PROVIDER_NAME.to_string(),
            ));
        };

        let wire_size = provider.wire_size(size);
        info!(
            "Generating '{}' image via {} at {}",
            request.usage,
            provider.name(),
            wire_size
        );
        let image_url = provider.generate(&ImageRequest::new(&prompt, size)).await?;

        let entry = HistoryEntry {
            timestamp: Utc::now(),
            request: &request,
            size: wire_size,
            prompt: &prompt,
        };
        if let Err(err) = self.history.append(&entry).await {
            debug!(
                "Skipping history entry for {}: {}",
                self.history.path().display(),
                err
            );
        }

        Ok(GenerationResult { prompt, image_url })
    }
}
