//! Input manager routing files to the matching extractor

use crate::error::{MatcherError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::info;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt};

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Extract raw text from a PDF, plain text or Markdown file
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(MatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = FileType::detect(path).ok_or_else(|| {
            MatcherError::InvalidInput(format!("File has no extension: {}", path.display()))
        })?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(MatcherError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    /// Read a whole document from standard input. Never cached.
    pub async fn read_stdin(&self) -> Result<String> {
        info!("Reading text from standard input");
        self.read_from(tokio::io::stdin()).await
    }

    pub async fn read_from<R: AsyncRead + Unpin>(&self, mut reader: R) -> Result<String> {
        let mut text = String::new();
        reader.read_to_string(&mut text).await?;
        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_disabled_keeps_nothing() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("job.txt");
        std::fs::write(&path, "python developer").unwrap();

        let mut manager = InputManager::new().with_cache(false);
        assert_eq!(manager.extract_text(&path).await.unwrap(), "python developer");
        assert_eq!(manager.cache_size(), 0);

        // A disabled cache must not serve stale content after the file changes
        std::fs::write(&path, "rust developer").unwrap();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "rust developer");
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_read_from_reader() {
        let manager = InputManager::new();
        let text = manager.read_from(&b"Python developer\nDjango"[..]).await.unwrap();
        assert_eq!(text, "Python developer\nDjango");
        assert_eq!(manager.cache_size(), 0);
    }
}
