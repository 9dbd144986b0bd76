//! Save orchestration for data-sink widgets.
//!
//! A widget that receives data on an input and optionally writes it to a
//! file needs the same behavior everywhere: choose a file name and format,
//! keep the name's extension consistent with the format, save again
//! whenever new data arrives if auto-save is on, and report what went
//! wrong. This crate implements that behavior; the host supplies the
//! writers, the file dialog and the persistence of settings.
//!
//! # Example
//!
//! ```ignore
//! use wsave_core::{FilterRegistry, SaveConfig, SaveEnvironment, SaveMachine, Writer};
//!
//! let registry = FilterRegistry::from_writers([
//!     ("Tab-separated values (*.tab)", Box::new(write_tab) as Box<dyn Writer<Table>>),
//! ])?;
//! let mut machine = SaveMachine::new(registry, config, SaveEnvironment::detect(), picker);
//! machine.on_new_input(Some(table))?;
//! for condition in machine.status().conditions() {
//!     println!("{condition}");
//! }
//! ```
//!
//! # Architecture
//!
//! - `extension` - Filter label parsing and file name normalization
//! - `filter` - Ordered registry of output formats and their writers
//! - `config` - Persisted settings and the process environment
//! - `machine` - The save state machine and overridable hooks
//! - `status` - Error and information conditions derived from state
//! - `picker/` - File picker contract and the two platform strategies
//! - `error.rs` - Error types with user-friendly messages

mod config;
mod error;
mod extension;
mod filter;
mod machine;
pub mod picker;
mod status;

pub use config::{PersistScope, SaveConfig, SaveEnvironment};
pub use error::{Result, SaveError};
pub use extension::{KnownExtensions, extension_of, normalize};
pub use filter::{FilterEntry, FilterRegistry, Writer};
pub use machine::{DefaultBehavior, SaveBehavior, SaveMachine, SaveOutcome, SkipReason};
pub use picker::{FilePicker, PickerChoice, PickerRequest};
pub use status::{Condition, ConditionKind, Severity, StatusReport};
