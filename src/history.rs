//! Append-only Markdown log of generated prompts.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::io::AsyncWriteExt;

use crate::prompt::GenerationRequest;

/// One generation, as written to the history file.
#[derive(Clone, Debug)]
pub struct HistoryEntry<'a> {
    /// When the image was generated
    pub timestamp: DateTime<Utc>,
    /// The request that produced it
    pub request: &'a GenerationRequest,
    /// Size value actually sent to the provider, eg `1024x1792`
    pub size: &'a str,
    /// Prompt sent to the provider
    pub prompt: &'a str,
}

impl HistoryEntry<'_> {
    /// Renders the entry as a Markdown block ending in a horizontal rule.
    pub fn render(&self) -> String {
        format!(
            "\n## {timestamp} - {usage}\n**Subject:** {subject}\n**Dimensions:** {dimension} (Mapped to: {size})\n**Prompt:**\n```\n{prompt}\n```\n---\n",
            timestamp = self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            usage = self.request.usage,
            subject = self.request.subject,
            dimension = self.request.dimension,
            size = self.size,
            prompt = self.prompt,
        )
    }
}

/// A history file that entries are appended to.
#[derive(Clone, Debug)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    /// Log entries to `path`, creating it on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where entries go.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one entry with a single write.
    pub async fn append(&self, entry: &HistoryEntry<'_>) -> Result<(), std::io::Error> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(entry.render().as_bytes()).await?;
        file.flush().await
    }
}
