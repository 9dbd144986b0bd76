//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "wsave",
    version,
    about = "Save tables the way a data-sink widget does",
    long_about = "Feed CSV tables to a save component and let it write them.\n\n\
                  The component remembers its target file, output format and\n\
                  auto-save setting in a settings file between runs."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: platform config directory).
    #[arg(long = "settings", value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Deliver inputs to the save component and optionally save.
    Run(RunArgs),

    /// Show the component's status from the settings file.
    Status,

    /// List the available output formats.
    Formats,
}

#[derive(Args)]
pub struct RunArgs {
    /// CSV file delivered as new input; repeat to deliver several in turn.
    #[arg(long = "input", value_name = "CSV")]
    pub inputs: Vec<PathBuf>,

    /// Deliver a cleared input before any --input.
    #[arg(long = "clear")]
    pub clear: bool,

    /// Turn auto-save on or off before delivering inputs.
    #[arg(long = "auto-save", value_enum)]
    pub auto_save: Option<Toggle>,

    /// Press "Save" after delivering inputs.
    #[arg(long = "save", conflicts_with = "save_as")]
    pub save: bool,

    /// Press "Save as ..." after delivering inputs.
    #[arg(long = "save-as")]
    pub save_as: bool,

    /// File dialog strategy.
    #[arg(long = "picker", value_enum, default_value = "auto")]
    pub picker: PickerArg,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Self::On
    }
}

/// File dialog strategy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum PickerArg {
    /// Use the strategy of the current platform.
    Auto,
    /// Fix the extension after the dialog closes.
    Fixup,
    /// Fix the extension while the dialog is open.
    Live,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
