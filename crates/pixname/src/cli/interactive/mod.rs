//! Interactive prompts for a rename run.
//!
//! Asks, in order: folder path, text to prepend, text to append, and whether
//! to add a date stamp. Ctrl+C or Esc at any prompt ends the run cleanly.

pub mod theme;

use dialoguer::{Confirm, Input};
use pixname_core::NamingOptions;
use std::path::PathBuf;

use theme::Palette;

/// Where a run gets its answers from. The terminal in production.
pub trait Prompter {
    /// Folder to process, or `None` if the user backed out.
    fn folder(&mut self) -> anyhow::Result<Option<PathBuf>>;

    /// Prefix, suffix and date stamp, or `None` if the user backed out.
    fn naming(&mut self) -> anyhow::Result<Option<NamingOptions>>;
}

/// Asks on the terminal with dialoguer.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn folder(&mut self) -> anyhow::Result<Option<PathBuf>> {
        prompt_folder()
    }

    fn naming(&mut self) -> anyhow::Result<Option<NamingOptions>> {
        prompt_naming()
    }
}

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Turn raw folder input into a path: trims, strips one pair of surrounding
/// quotes (as pasted from a file manager), and expands `~`.
pub fn parse_folder_input(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| {
            trimmed
                .strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        })
        .unwrap_or(trimmed);
    PathBuf::from(shellexpand::tilde(unquoted.trim()).into_owned())
}

/// Prompt for the folder to process.
///
/// Returns `Ok(None)` if the user interrupts.
pub fn prompt_folder() -> anyhow::Result<Option<PathBuf>> {
    let theme = Palette::default().prompt_theme();
    let raw = handle_interrupt(
        Input::<String>::with_theme(&theme)
            .with_prompt("Enter the path to the folder")
            .interact_text(),
    )?;
    Ok(raw.map(|r| parse_folder_input(&r)))
}

/// Prompt for prefix, suffix and date stamp.
///
/// The date is fixed here, once, for the whole run.
pub fn prompt_naming() -> anyhow::Result<Option<NamingOptions>> {
    let theme = Palette::default().prompt_theme();

    let Some(prefix) = handle_interrupt(
        Input::<String>::with_theme(&theme)
            .with_prompt("Enter text to PREPEND (leave blank)")
            .allow_empty(true)
            .interact_text(),
    )?
    else {
        return Ok(None);
    };

    let Some(suffix) = handle_interrupt(
        Input::<String>::with_theme(&theme)
            .with_prompt("Enter text to APPEND (leave blank)")
            .allow_empty(true)
            .interact_text(),
    )?
    else {
        return Ok(None);
    };

    let Some(add_date) = Confirm::with_theme(&theme)
        .with_prompt("Add date stamp?")
        .default(false)
        .interact_opt()?
    else {
        return Ok(None);
    };

    Ok(Some(NamingOptions::new(&prefix, &suffix, add_date)))
}
