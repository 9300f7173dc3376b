//! botchat Library
//!
//! Terminal chat client for hosted bots. The session logic lives in the
//! workspace crates; this crate adds the headless NDJSON runner used by the
//! binary.

pub mod headless;

// Re-export main entry points
pub use botchat_tui::run;
pub use headless::runner::run_headless;
