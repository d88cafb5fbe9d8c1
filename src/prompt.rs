//! Prompt construction for the image provider.
//!
//! Everything here is pure: the same request and style guide always give the
//! same prompt text.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::constants::DEFAULT_STYLE_GUIDE;

/// Usage options offered by the form, in display order.
pub static USAGE_OPTIONS: [ImageUsage; 6] = [
    ImageUsage::HeroBackground,
    ImageUsage::ProductCard,
    ImageUsage::Icon,
    ImageUsage::BlogMainImage,
    ImageUsage::SocialMediaPost,
    ImageUsage::Other,
];

/// Dimension options offered by the form, in display order.
pub static DIMENSION_OPTIONS: [ImageDimension; 4] = [
    ImageDimension::FullScreen,
    ImageDimension::Square,
    ImageDimension::Rectangle,
    ImageDimension::Vertical,
];

/// Where the generated image is going to be used.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ImageUsage {
    /// Full-width background behind a hero section
    HeroBackground,
    /// Card image for a product or service
    ProductCard,
    /// Small icon
    Icon,
    /// Lead image for a blog post
    BlogMainImage,
    /// Social media post
    SocialMediaPost,
    /// Anything else
    Other,
    /// A label outside the fixed list, kept verbatim
    Custom(String),
}

impl ImageUsage {
    /// Maps a label onto a known usage, falling back to [`ImageUsage::Custom`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "Hero Background" => Self::HeroBackground,
            "Product/Service Card Image" => Self::ProductCard,
            "Icon" => Self::Icon,
            "Blog Main Image" => Self::BlogMainImage,
            "Social Media Post" => Self::SocialMediaPost,
            "Other" => Self::Other,
            other => Self::Custom(other.to_string()),
        }
    }

    /// The label as shown to users and written into prompts.
    pub fn label(&self) -> &str {
        match self {
            Self::HeroBackground => "Hero Background",
            Self::ProductCard => "Product/Service Card Image",
            Self::Icon => "Icon",
            Self::BlogMainImage => "Blog Main Image",
            Self::SocialMediaPost => "Social Media Post",
            Self::Other => "Other",
            Self::Custom(label) => label,
        }
    }
}

impl fmt::Display for ImageUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Requested aspect ratio, as picked by the user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ImageDimension {
    /// Full screen (16:9)
    FullScreen,
    /// Square (1:1)
    Square,
    /// Rectangle (4:3)
    Rectangle,
    /// Vertical (9:16)
    Vertical,
    /// A label outside the fixed list, kept verbatim
    Custom(String),
}

impl ImageDimension {
    /// Maps a label onto a known dimension, falling back to [`ImageDimension::Custom`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "Full screen (16:9)" => Self::FullScreen,
            "Square (1:1)" => Self::Square,
            "Rectangle (4:3)" => Self::Rectangle,
            "Vertical (9:16)" => Self::Vertical,
            other => Self::Custom(other.to_string()),
        }
    }

    /// The label as shown to users and written into prompts.
    pub fn label(&self) -> &str {
        match self {
            Self::FullScreen => "Full screen (16:9)",
            Self::Square => "Square (1:1)",
            Self::Rectangle => "Rectangle (4:3)",
            Self::Vertical => "Vertical (9:16)",
            Self::Custom(label) => label,
        }
    }
}

impl fmt::Display for ImageDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated generation request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenerationRequest {
    /// Where the image will be used
    pub usage: ImageUsage,
    /// Requested aspect ratio label
    pub dimension: ImageDimension,
    /// What the image is about, never empty
    pub subject: String,
    /// Free-form extra direction
    pub additional_details: Option<String>,
}

/// Brand style guide text injected into every prompt.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StyleGuide(Arc<str>);

impl StyleGuide {
    /// Wraps style guide text as is, apart from the single line ending a
    /// file normally finishes with.
    pub fn new(text: &str) -> Self {
        let text = text
            .strip_suffix("\r\n")
            .or_else(|| text.strip_suffix('\n'))
            .unwrap_or(text);
        Self(Arc::from(text))
    }

    /// Reads the style guide from a file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::new(&text))
    }

    /// The style guide text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StyleGuide {
    fn default() -> Self {
        Self::new(DEFAULT_STYLE_GUIDE)
    }
}

/// Renders the full prompt for a request.
pub fn build_prompt(request: &GenerationRequest, style_guide: &StyleGuide) -> String {
    let details = match request.additional_details.as_deref() {
        Some(details) if !details.is_empty() => format!("- **Additional Details:** {details}"),
        _ => String::new(),
    };

    format!(
        r#"
*** IMAGE GENERATION PROMPT ***

**CONTEXT:**
Generate a high-quality website image based on the following specifications.

**STYLE GUIDE (STRICTLY ADHERE):**
{style_guide}

**SPECIFICATIONS:**
- **Usage Context:** {usage}
- **Dimensions/Aspect Ratio:** {dimension}
- **Subject/Topic:** {subject}
{details}

**INSTRUCTIONS:**
1. Create a visually striking image that fits the "Usage Context" and "Subject".
2. Ensure the color palette and mood align perfectly with the "Style Guide".
3. Compose the image to allow for text overlay if applicable (especially for Hero/Background).
4. Do not include text inside the image unless it's a logo or specified.
5. High resolution, photorealistic or high-fidelity 3D render style as per guide.
"#,
        style_guide = style_guide.as_str(),
        usage = request.usage,
        dimension = request.dimension,
        subject = request.subject,
    )
}
