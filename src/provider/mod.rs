//! Text-to-image providers.

use std::fmt;

use async_trait::async_trait;

use crate::error::GeneratorError;

pub mod openai;

pub use openai::OpenAiProvider;

/// Whether `model` is one the OpenAI provider knows the sizes and quality
/// tiers for: `dall-e-3` or a `gpt-image` model.
pub fn is_supported_model(model: &str) -> bool {
    model == "dall-e-3" || model.starts_with("gpt-image")
}

/// Output size, picked from the requested dimension label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImageSize {
    /// 1:1
    Square,
    /// Portrait
    Tall,
    /// Landscape
    Wide,
}

impl ImageSize {
    /// Resolves a dimension label to a size. Vertical markers win over
    /// widescreen ones, and anything unrecognised is square.
    pub fn for_dimension(label: &str) -> Self {
        if label.contains("Vertical") || label.contains("9:16") {
            Self::Tall
        } else if label.contains("Full screen")
            || label.contains("16:9")
            || label.contains("Rectangle")
        {
            Self::Wide
        } else {
            Self::Square
        }
    }

    /// Wire value for DALL-E models.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "1024x1024",
            Self::Tall => "1024x1792",
            Self::Wide => "1792x1024",
        }
    }

    /// Wire value for the given model. GPT image models use a different set
    /// of portrait and landscape sizes.
    pub fn for_model(self, model: &str) -> &'static str {
        if model.starts_with("gpt-image") {
            match self {
                Self::Square => "1024x1024",
                Self::Tall => "1024x1536",
                Self::Wide => "1536x1024",
            }
        } else {
            self.as_str()
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quality tier requested from the provider.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImageQuality {
    /// Best available quality
    High,
}

impl ImageQuality {
    /// Wire value for the given model.
    pub fn for_model(self, model: &str) -> &'static str {
        match self {
            Self::High if model == "dall-e-3" => "hd",
            Self::High => "high",
        }
    }
}

/// A single call to an image provider.
#[derive(Clone, Debug)]
pub struct ImageRequest<'a> {
    /// Full prompt text
    pub prompt: &'a str,
    /// Output size
    pub size: ImageSize,
    /// Quality tier
    pub quality: ImageQuality,
    /// Number of images to generate
    pub count: u8,
}

impl<'a> ImageRequest<'a> {
    /// A request for one high quality image.
    pub fn new(prompt: &'a str, size: ImageSize) -> Self {
        Self {
            prompt,
            size,
            quality: ImageQuality::High,
            count: 1,
        }
    }
}

/// Something that turns a prompt into an image reference.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Provider name, for logs.
    fn name(&self) -> &str;

    /// The size value this provider puts on the wire for `size`.
    fn wire_size(&self, size: ImageSize) -> &'static str {
        size.as_str()
    }

    /// Generates an image and returns a reference to it, either a URL or a
    /// `data:` URL.
    async fn generate(&self, request: &ImageRequest<'_>) -> Result<String, GeneratorError>;
}
