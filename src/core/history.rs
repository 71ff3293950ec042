use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::HistoryError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub title: String,
    pub source_url: String,
}

/// Append-only log of completed downloads, one `<title>: <source url>`
/// line per entry. Titles are written verbatim; a `:` inside a title is
/// ambiguous on read-back, an ambiguity the format has always had.
pub struct HistoryStore {
    path: PathBuf,
    // completions from concurrent workers must not interleave lines
    write_lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append(&self, title: &str, source_url: &str) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{}: {}\n", title, source_url).as_bytes())
            .await?;
        file.flush().await?;
        Ok(())
    }

    /// Everything recorded so far, in append order. A missing log file is
    /// an empty history, not an error.
    pub async fn load_all(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for line in text.lines() {
            if line.is_empty() {
                continue;
            }
            match line.split_once(": ") {
                Some((title, url)) => entries.push(HistoryEntry {
                    title: title.to_string(),
                    source_url: url.to_string(),
                }),
                None => tracing::warn!("Skipping malformed history line: {:?}", line),
            }
        }
        Ok(entries)
    }
}
