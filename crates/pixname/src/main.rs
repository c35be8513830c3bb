//! pixname CLI - rename a folder of images using a vision model.
//!
//! Every supported image directly inside the chosen folder is sent to the
//! Gemini API, and the short description that comes back becomes the new
//! filename. Prefix, suffix and date stamp are asked for interactively.
//!
//! # Usage
//!
//! ```bash
//! # GEMINI_API_KEY may also live in a .env file in the working directory
//! export GEMINI_API_KEY=...
//! pixname
//!
//! # Use a different model, with debug logs
//! pixname --model gemini-2.5-flash -v
//! ```

use clap::Parser;

mod cli;
mod logging;

/// pixname - rename images using short descriptions from a vision model.
#[derive(Parser, Debug)]
#[command(name = "pixname")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json_logs: bool,

    /// Gemini model identifier (overrides PIXNAME_MODEL)
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing .env is normal; the key may come from the real environment.
    let dotenv_path = dotenvy::dotenv().ok();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let mut config = match pixname_core::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {e}\n  Using default configuration.");
            pixname_core::Config::default()
        }
    };
    if let Some(model) = cli.model.filter(|m| !m.trim().is_empty()) {
        config.llm.model = model.trim().to_string();
    }
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("pixname v{}", pixname_core::VERSION);
    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {path:?}");
    }

    cli::rename::execute(&config).await
}
