//! Shared constants/setters for things
//!

/// Default location of the generation history log, relative to the working directory.
pub const DEFAULT_HISTORY_PATH: &str = "generated_history.md";

/// Display name of the image provider, used in configuration errors.
pub const PROVIDER_NAME: &str = "OpenAI";

/// Default OpenAI API base URL.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default image model.
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Message returned when a request is missing one of the required fields.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: usage, dimension, subject";

/// Generic message for anything that isn't the caller's fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Bundled style guide, used when no `--style-guide` file is configured.
pub const DEFAULT_STYLE_GUIDE: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/style_guide.md"));
