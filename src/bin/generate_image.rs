use anyhow::{Context, Result};
use brandgen::cli::GeneratorOptions;
use brandgen::config::{build_generator, setup_logging};
use brandgen::generator::GenerateBody;
use clap::Parser;
use std::io::{self, Write};

/// Generate one on-brand image from the terminal.
///
/// Minimal UX:
///   generate_image --usage Icon --dimension "Square (1:1)" "coffee cup"
#[derive(Parser, Debug)]
#[command(name = "generate_image")]
#[command(about = "Build a brand prompt and render it through the image provider")]
struct Args {
    /// Subject of the image (e.g. "coffee cup", "mountain sunrise")
    subject: String,

    /// Usage context, one of the form labels or free text
    #[arg(long, default_value = "Hero Background")]
    usage: String,

    /// Dimension label (e.g. "Square (1:1)", "Vertical (9:16)")
    #[arg(long, default_value = "Full screen (16:9)")]
    dimension: String,

    /// Extra direction appended to the prompt
    #[arg(long)]
    details: Option<String>,

    /// Print the full prompt before the image URL
    #[arg(long)]
    show_prompt: bool,

    /// Enable debug logging
    #[arg(long, env = "BRANDGEN_DEBUG")]
    debug: bool,

    #[command(flatten)]
    generator: GeneratorOptions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.debug).map_err(|err| anyhow::anyhow!(err))?;

    let generator = build_generator(&args.generator)?;
    let result = generator
        .generate(GenerateBody {
            usage: Some(args.usage),
            dimension: Some(args.dimension),
            subject: Some(args.subject),
            additional_details: args.details,
        })
        .await
        .context("Image generation failed")?;

    let mut stdout = io::stdout();
    if args.show_prompt {
        writeln!(stdout, "{}", result.prompt.trim())?;
        writeln!(stdout)?;
    }
    writeln!(stdout, "{}", result.image_url)?;
    Ok(())
}
