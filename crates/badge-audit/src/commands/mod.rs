//! CLI command handlers

pub mod check;

pub use check::{CheckArgs, CheckOutcome, OutputFormat};
