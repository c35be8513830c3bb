//! Terminal styling for pixname.
//!
//! One [`Palette`] feeds the dialoguer prompts, the banner, the per-file log
//! and the summary, so every part of a run uses the same colors.

use console::Style;
use dialoguer::theme::ColorfulTheme;
use std::fmt::Display;

/// Tagline shown under the version in the banner.
const TAGLINE: &str = "Rename images with a vision model";

/// Styles shared by all CLI output. Everything is written to stderr.
#[derive(Debug, Clone)]
pub struct Palette {
    pub accent: Style,
    pub success: Style,
    pub error: Style,
    pub warning: Style,
    pub muted: Style,
    pub strong: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            accent: Style::new().for_stderr().cyan(),
            success: Style::new().for_stderr().green(),
            error: Style::new().for_stderr().red(),
            warning: Style::new().for_stderr().yellow(),
            muted: Style::new().for_stderr().dim(),
            strong: Style::new().for_stderr().bold(),
        }
    }
}

impl Palette {
    /// Dialoguer theme built from the palette: accent `?`, green `✓`, red `✗`.
    pub fn prompt_theme(&self) -> ColorfulTheme {
        ColorfulTheme {
            prompt_prefix: self.accent.apply_to("?".to_string()),
            prompt_style: self.strong.clone(),
            prompt_suffix: self.muted.apply_to("›".to_string()),
            success_prefix: self.success.apply_to("✓".to_string()),
            success_suffix: self.muted.apply_to("·".to_string()),
            error_prefix: self.error.apply_to("✗".to_string()),
            error_style: self.error.clone(),
            values_style: self.success.clone(),
            ..ColorfulTheme::default()
        }
    }

    pub fn print_banner(&self) {
        eprintln!();
        for line in banner_lines() {
            eprintln!("{}", self.accent.apply_to(line));
        }
        eprintln!();
    }

    /// `Error: {message}` in the error color.
    pub fn print_error(&self, message: impl Display) {
        eprintln!("{}", self.error.apply_to(format!("Error: {message}")));
    }

    pub fn print_warning(&self, message: impl Display) {
        eprintln!("{}", self.warning.apply_to(message.to_string()));
    }
}

/// The boxed version banner, one string per line.
fn banner_lines() -> Vec<String> {
    let version_line = format!("pixname v{}", pixname_core::VERSION);
    // 2 chars of padding on each side of the tagline
    let width = TAGLINE.chars().count() + 4;

    vec![
        format!("  ╔{:═<width$}╗", ""),
        format!("  ║{version_line:^width$}║"),
        format!("  ║{TAGLINE:^width$}║"),
        format!("  ╚{:═<width$}╝", ""),
    ]
}
