//! Command-line front end for the notes generator.

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use notegen::client::{GroqClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
use notegen::model::{DetailLevel, FormattingOptions, Tone};
use notegen::pipeline::{Generator, DEFAULT_FILENAME};

/// Generate AI study notes for a list of topics and save them as a PDF.
#[derive(Debug, Parser)]
#[command(name = "notegen", version, about)]
struct Cli {
    /// Topics to cover, one per line (reads stdin when neither this nor
    /// --topics-file is given).
    #[arg(short, long)]
    topics: Option<String>,

    /// File containing topics, one per line.
    #[arg(long, conflicts_with = "topics")]
    topics_file: Option<PathBuf>,

    /// Output PDF filename.
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    output: String,

    /// Detail level: concise, balanced or detailed.
    #[arg(long, default_value = "balanced")]
    detail_level: String,

    /// Writing tone: professional, academic, explainlike5 or enthusiastic.
    #[arg(long, default_value = "academic")]
    tone: String,

    /// Do not ask the model to bold key points.
    #[arg(long)]
    no_highlight: bool,

    /// Do not ask the model for bullet lists.
    #[arg(long)]
    no_bullets: bool,

    /// Do not ask the model for practical examples.
    #[arg(long)]
    no_examples: bool,

    /// Do not ask the model for a closing summary.
    #[arg(long)]
    no_summary: bool,

    /// API key for the completion endpoint.
    #[arg(long, env = "NOTEGEN_API_KEY", hide_env_values = true)]
    api_key: String,

    /// API root of the OpenAI-compatible endpoint.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Completion model to request.
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Pause between requests in milliseconds.
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,
}

impl Cli {
    fn topics_text(&self) -> Result<String> {
        if let Some(topics) = &self.topics {
            return Ok(topics.clone());
        }
        if let Some(path) = &self.topics_file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("reading topics from {}", path.display()));
        }
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("reading topics from stdin")?;
        Ok(buffer)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let topics_text = cli.topics_text()?;

    let formatting = FormattingOptions::default()
        .with_highlight_points(!cli.no_highlight)
        .with_bullet_points(!cli.no_bullets)
        .with_examples(!cli.no_examples)
        .with_summary(!cli.no_summary);

    let client = GroqClient::new(&cli.api_key)?
        .with_base_url(&cli.base_url)
        .with_model(&cli.model);
    let generator = Generator::new(client).with_pause(Duration::from_millis(cli.delay_ms));

    let outcome = generator.run(
        &topics_text,
        &cli.output,
        DetailLevel::parse(&cli.detail_level),
        Tone::parse(&cli.tone),
        formatting,
        |progress| {
            println!(
                "[{:>3}%] ({}/{}) {}",
                progress.percent, progress.current, progress.total, progress.status
            );
        },
    )?;

    println!(
        "Saved {} ({} pages, {} bytes)",
        outcome.path.display(),
        outcome.pages,
        outcome.bytes_written
    );
    Ok(())
}
