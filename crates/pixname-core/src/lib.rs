//! pixname core - rename images from vision-model suggestions.
//!
//! Each image in a folder is sent to a vision-language API, the short
//! description that comes back is sanitized, naming rules are applied, and
//! the file is renamed in place.
//!
//! # Architecture
//!
//! ```text
//! Discover → Read + Encode → Suggest (retry) → Sanitize → Name → Rename
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use pixname_core::{Config, FileDiscovery, NamingOptions, Renamer, SuggestResult};
//!
//! #[tokio::main]
//! async fn main() -> pixname_core::Result<()> {
//!     let config = Config::from_env()?;
//!     let files = FileDiscovery::new(&config.naming).discover("./photos".as_ref())?;
//!     let renamer = Renamer::from_config(&config, NamingOptions::new("trip", "", true));
//!
//!     for file in &files {
//!         if let SuggestResult::Success(s) = renamer.suggest(file).await {
//!             renamer.apply(file, &s.text)?;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod llm;
pub mod naming;
pub mod renamer;
pub mod sanitize;

// Re-exports for convenient access
pub use config::Config;
pub use discovery::{FileDiscovery, ImageFile};
pub use error::{ConfigError, PipelineError, PipelineResult, PixnameError, Result};
pub use llm::{GeminiProvider, RetryOptions, SuggestResult, Suggester, Suggestion, VisionProvider};
pub use naming::NamingOptions;
pub use renamer::Renamer;
pub use sanitize::{sanitize_filename, DEFAULT_MAX_LENGTH};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
