//! Per-file rename operations.
//!
//! A file goes `pending → analyzing → {renamed | failed}`. [`Renamer::suggest`]
//! covers the analyzing step and [`Renamer::apply`] the rename. The caller
//! drives the loop so it can show progress between the two.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::discovery::ImageFile;
use crate::error::{PipelineError, PipelineResult};
use crate::llm::{GeminiProvider, ImageInput, RetryOptions, SuggestResult, Suggester};
use crate::naming::NamingOptions;
use crate::sanitize::sanitize_filename;

/// Turns suggestions into renames inside the file's own directory.
pub struct Renamer {
    suggester: Suggester,
    naming: NamingOptions,
    max_length: usize,
}

impl Renamer {
    pub fn new(suggester: Suggester, naming: NamingOptions, max_length: usize) -> Self {
        Self {
            suggester,
            naming,
            max_length,
        }
    }

    /// Build a renamer backed by the Gemini provider.
    pub fn from_config(config: &Config, naming: NamingOptions) -> Self {
        let provider = GeminiProvider::from_config(config);
        let suggester = Suggester::new(Box::new(provider), RetryOptions::from(&config.retry));
        Self::new(suggester, naming, config.naming.max_length)
    }

    /// Read and encode the image, then ask for a suggestion.
    ///
    /// A read failure is reported as a failure without any API call.
    pub async fn suggest(&self, file: &ImageFile) -> SuggestResult {
        let bytes = match tokio::fs::read(&file.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return SuggestResult::Failure {
                    message: PipelineError::Read {
                        path: file.path.clone(),
                        message: e.to_string(),
                    }
                    .to_string(),
                    attempts: 0,
                };
            }
        };

        let image = ImageInput::from_bytes(&bytes, &file.extension);
        self.suggester.suggest(image).await
    }

    /// Compute a free target path for `file` given a raw suggestion.
    pub fn target_for(&self, file: &ImageFile, suggestion: &str) -> PathBuf {
        let clean = sanitize_filename(suggestion, self.max_length);
        if clean.is_empty() {
            tracing::debug!("Suggestion {suggestion:?} sanitized to nothing");
        }
        let base = self.naming.base_name(&clean);
        self.naming
            .resolve_target(parent_dir(&file.path), &base, &file.extension)
    }

    /// Rename `file` in place according to `suggestion`.
    pub fn apply(&self, file: &ImageFile, suggestion: &str) -> PipelineResult<PathBuf> {
        let target = self.target_for(file, suggestion);

        std::fs::rename(&file.path, &target).map_err(|e| PipelineError::Rename {
            from: file.path.clone(),
            to: target.clone(),
            message: e.to_string(),
        })?;

        tracing::info!("Renamed {:?} -> {:?}", file.path, target);
        Ok(target)
    }
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}
