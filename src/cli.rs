//! CLI parser
use clap::{Args, Parser};
use std::num::NonZeroU16;
use std::path::PathBuf;
use url::Url;

use crate::constants::{DEFAULT_HISTORY_PATH, DEFAULT_IMAGE_MODEL, DEFAULT_OPENAI_BASE_URL};
use crate::provider::is_supported_model;

fn parse_image_model(value: &str) -> Result<String, String> {
    if is_supported_model(value) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "unsupported image model '{value}', expected dall-e-3 or a gpt-image model"
        ))
    }
}

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "BRANDGEN_DEBUG")]
    /// Enable debug logging. Env: BRANDGEN_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "3000", env = "BRANDGEN_PORT")]
    /// http listener, defaults to `3000`.
    /// Env: BRANDGEN_PORT
    pub port: NonZeroU16,
    #[clap(
        long,
        short,
        default_value = "127.0.0.1",
        env = "BRANDGEN_LISTEN_ADDRESS"
    )]
    /// Listen address, defaults to `127.0.0.1`.
    /// Env: BRANDGEN_LISTEN_ADDRESS
    pub listen_address: String,

    #[command(flatten)]
    /// Provider, style guide and history settings
    pub generator: GeneratorOptions,
}

#[derive(Args, Debug, Clone)]
/// Settings shared by the server and the one-shot generator
pub struct GeneratorOptions {
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    /// OpenAI API key. Without it every generation fails with a configuration error.
    /// Env: OPENAI_API_KEY
    pub openai_api_key: Option<String>,

    #[arg(
        long,
        default_value = DEFAULT_IMAGE_MODEL,
        env = "BRANDGEN_IMAGE_MODEL",
        value_parser = parse_image_model
    )]
    /// Image model: `dall-e-3` (the default) or a `gpt-image` model.
    /// Env: BRANDGEN_IMAGE_MODEL
    pub image_model: String,

    #[arg(long, default_value = DEFAULT_OPENAI_BASE_URL, env = "BRANDGEN_OPENAI_BASE_URL")]
    /// OpenAI API base URL.
    /// Env: BRANDGEN_OPENAI_BASE_URL
    pub openai_base_url: Url,

    #[arg(long, default_value = DEFAULT_HISTORY_PATH, env = "BRANDGEN_HISTORY_PATH")]
    /// Markdown file that generations are appended to.
    /// Env: BRANDGEN_HISTORY_PATH
    pub history_path: PathBuf,

    #[arg(long, env = "BRANDGEN_STYLE_GUIDE")]
    /// Style guide file, eg `/data/style_guide.md`. Uses the bundled guide if unset.
    /// Env: BRANDGEN_STYLE_GUIDE
    pub style_guide: Option<PathBuf>,

    #[arg(long, env = "BRANDGEN_PROVIDER_TIMEOUT_SECS")]
    /// Timeout for each provider request, in seconds. No timeout if unset.
    /// Env: BRANDGEN_PROVIDER_TIMEOUT_SECS
    pub provider_timeout_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags() {
        let cli = CliOptions::try_parse_from(["brandgen"]).expect("parse defaults");
        assert_eq!(cli.port.get(), 3000);
        assert_eq!(cli.listen_address, "127.0.0.1");
        assert_eq!(cli.generator.history_path, PathBuf::from("generated_history.md"));
        assert_eq!(cli.generator.openai_base_url.as_str(), "https://api.openai.com/v1");
    }

    #[test]
    fn rejects_bad_base_url() {
        let result =
            CliOptions::try_parse_from(["brandgen", "--openai-base-url", "not a url"]);
        assert!(result.is_err());
    }

    #[test]
    fn image_model_must_be_supported() {
        let result = CliOptions::try_parse_from(["brandgen", "--image-model", "dall-e-2"]);
        assert!(result.is_err());

        let cli = CliOptions::try_parse_from(["brandgen", "--image-model", "gpt-image-1"])
            .expect("parse gpt-image model");
        assert_eq!(cli.generator.image_model, "gpt-image-1");
    }
}
