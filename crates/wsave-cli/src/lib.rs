//! Terminal host for the widget save workflow.
//!
//! Provides what a visual-programming host would: a table payload, writers
//! for each output format, a file dialog, a settings file and logging.

pub mod logging;
pub mod settings;
pub mod table;
pub mod terminal;
pub mod writers;
