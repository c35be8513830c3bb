//! The rename run: credential check, prompts, discovery, batch, summary.
//!
//! Every completion path returns `Ok(())`, including a missing key, an
//! invalid folder and a folder with no images.

mod batch;

use pixname_core::{Config, FileDiscovery, PipelineError, Renamer};

use super::interactive::theme::Palette;
use super::interactive::{Prompter, TerminalPrompter};
use batch::{print_summary, rename_batch, BatchSummary};

/// How a run ended.
#[derive(Debug)]
enum RunOutcome {
    MissingApiKey,
    Cancelled,
    InvalidFolder,
    NoImages,
    Finished(BatchSummary),
}

/// Run one interactive rename session.
pub async fn execute(config: &Config) -> anyhow::Result<()> {
    let palette = Palette::default();
    palette.print_banner();

    let outcome = run(config, &mut TerminalPrompter, &palette, true).await?;
    tracing::debug!("Run ended: {outcome:?}");
    Ok(())
}

async fn run(
    config: &Config,
    prompter: &mut impl Prompter,
    palette: &Palette,
    show_progress: bool,
) -> anyhow::Result<RunOutcome> {
    if let Err(e) = config.require_api_key() {
        palette.print_error(e);
        return Ok(RunOutcome::MissingApiKey);
    }

    let Some(folder) = prompter.folder()? else {
        return Ok(RunOutcome::Cancelled);
    };
    if !folder.is_dir() {
        palette.print_error(PipelineError::NotADirectory(folder));
        return Ok(RunOutcome::InvalidFolder);
    }

    let Some(naming) = prompter.naming()? else {
        return Ok(RunOutcome::Cancelled);
    };
    tracing::debug!("Naming options: {naming:?}");

    let files = match FileDiscovery::new(&config.naming).discover(&folder) {
        Ok(files) => files,
        // The folder can vanish between the prompt and the scan.
        Err(e) => {
            palette.print_error(e);
            return Ok(RunOutcome::InvalidFolder);
        }
    };

    if files.is_empty() {
        palette.print_warning("No supported images found.");
        return Ok(RunOutcome::NoImages);
    }

    let total_size = FileDiscovery::total_size(&files);
    eprintln!(
        "  {}",
        palette.muted.apply_to(format!(
            "Found {} image(s) ({:.1} MB)",
            files.len(),
            total_size as f64 / 1_000_000.0
        ))
    );

    let renamer = Renamer::from_config(config, naming);
    tracing::info!(
        "Renaming {} image(s) in {:?} with model {}",
        files.len(),
        folder,
        config.llm.model
    );

    let summary = rename_batch(&renamer, &files, palette, show_progress).await;
    print_summary(&summary, palette);

    Ok(RunOutcome::Finished(summary))
}
