//! File discovery for finding images in a folder.
//!
//! Only the immediate entries of the folder are considered; subdirectories
//! are never entered, even when their names end in an image extension.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::NamingConfig;
use crate::error::PipelineError;

/// Discovers image files directly inside a directory.
pub struct FileDiscovery {
    supported_formats: Vec<String>,
}

/// An image file found during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Full path to the file
    pub path: PathBuf,
    /// Extension, lowercased, without the dot
    pub extension: String,
    /// File size in bytes
    pub size: u64,
}

impl ImageFile {
    /// File name for display, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: &NamingConfig) -> Self {
        Self {
            supported_formats: config
                .supported_formats
                .iter()
                .map(|fmt| fmt.to_lowercase())
                .collect(),
        }
    }

    /// List supported image files directly inside `dir`, sorted by path.
    ///
    /// The listing is a snapshot; files added or removed afterwards are not seen.
    pub fn discover(&self, dir: &Path) -> Result<Vec<ImageFile>, PipelineError> {
        if !dir.is_dir() {
            return Err(PipelineError::NotADirectory(dir.to_path_buf()));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .follow_links(true)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry: {err}");
                    None
                }
            })
        {
            // A symlink counts when its target is a regular file; the link
            // itself is what gets renamed.
            if !entry.path().is_file() {
                continue;
            }
            let Some(extension) = self.supported_extension(entry.path()) else {
                continue;
            };
            if let Ok(meta) = entry.metadata() {
                files.push(ImageFile {
                    path: entry.path().to_path_buf(),
                    extension,
                    size: meta.len(),
                });
            }
        }

        // Sort by path for deterministic ordering
        files.sort_by(|a, b| a.path.cmp(&b.path));
        tracing::debug!("Discovered {} image(s) in {:?}", files.len(), dir);
        Ok(files)
    }

    /// Return the lowercased extension if it is a supported format.
    fn supported_extension(&self, path: &Path) -> Option<String> {
        let ext_lower = path.extension()?.to_str()?.to_lowercase();
        self.supported_formats
            .contains(&ext_lower)
            .then_some(ext_lower)
    }

    /// Get total size of all discovered files.
    pub fn total_size(files: &[ImageFile]) -> u64 {
        files.iter().map(|f| f.size).sum()
    }
}
