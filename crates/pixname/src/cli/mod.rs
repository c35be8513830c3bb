//! Command-line front end: prompts, progress display, and the rename loop.

pub mod interactive;
pub mod progress;
pub mod rename;
