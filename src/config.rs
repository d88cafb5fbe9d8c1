//! Config handling

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::log::LevelFilter;
use tracing::{info, warn};

use crate::cli::GeneratorOptions;
use crate::generator::Generator;
use crate::history::HistoryLog;
use crate::prompt::StyleGuide;
use crate::provider::{ImageProvider, OpenAiProvider};

/// Sets up logging based on the debug flag
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut logger = simple_logger::SimpleLogger::new().with_level(level);
    if !debug {
        logger = logger
            .with_module_level("tracing", LevelFilter::Warn)
            .with_module_level("rustls", LevelFilter::Info)
            .with_module_level("hyper_util", LevelFilter::Info)
            .with_module_level("reqwest", LevelFilter::Info)
            .with_module_level("h2", LevelFilter::Info);
    }
    logger.init().map_err(|err| {
        eprintln!("Failed to initialize logger: {}", err);
        Box::new(std::io::Error::other(err))
    })
}

/// Loads the configured style guide, or the bundled one.
pub fn load_style_guide(options: &GeneratorOptions) -> Result<StyleGuide, anyhow::Error> {
    match options.style_guide.as_deref() {
        Some(path) => {
            let guide = StyleGuide::from_file(path)
                .with_context(|| format!("Failed to read style guide {}", path.display()))?;
            info!("Loaded style guide from {}", path.display());
            Ok(guide)
        }
        None => Ok(StyleGuide::default()),
    }
}

/// Builds the provider, or `None` when no API key is set.
pub fn build_provider(
    options: &GeneratorOptions,
) -> Result<Option<Arc<dyn ImageProvider>>, anyhow::Error> {
    let Some(api_key) = options
        .openai_api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
    else {
        warn!("OPENAI_API_KEY is not set, image generation will fail until it is configured");
        return Ok(None);
    };

    let provider = OpenAiProvider::new(
        api_key,
        options.image_model.as_str(),
        options.openai_base_url.clone(),
        options.provider_timeout_secs.map(Duration::from_secs),
    )
    .context("Failed to build HTTP client")?;
    let provider: Arc<dyn ImageProvider> = Arc::new(provider);
    Ok(Some(provider))
}

/// Assembles a [`Generator`] from the command line settings.
pub fn build_generator(options: &GeneratorOptions) -> Result<Generator, anyhow::Error> {
    let style_guide = load_style_guide(options)?;
    let provider = build_provider(options)?;
    Ok(Generator::new(
        style_guide,
        provider,
        HistoryLog::new(options.history_path.clone()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliOptions;
    use clap::Parser;
    use std::io::Write;

    fn options(args: &[&str]) -> GeneratorOptions {
        let mut argv = vec!["brandgen"];
        argv.extend_from_slice(args);
        CliOptions::try_parse_from(argv)
            .expect("parse options")
            .generator
    }

    #[test]
    fn blank_api_key_means_no_provider() {
        let provider = build_provider(&options(&["--openai-api-key", "  "])).expect("build");
        assert!(provider.is_none());
    }

    #[test]
    fn api_key_builds_openai_provider() {
        let provider = build_provider(&options(&["--openai-api-key", "sk-test"]))
            .expect("build")
            .expect("provider present");
        assert_eq!(provider.name(), "OpenAI");
    }

    #[test]
    fn style_guide_file_overrides_default() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "Only pastel colours.").expect("write guide");
        let path = file.path().to_string_lossy().to_string();

        let guide = load_style_guide(&options(&["--style-guide", &path])).expect("load");
        assert_eq!(guide.as_str(), "Only pastel colours.");
    }

    #[test]
    fn missing_style_guide_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.md").to_string_lossy().to_string();
        assert!(load_style_guide(&options(&["--style-guide", &path])).is_err());
    }
}
