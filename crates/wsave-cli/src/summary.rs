use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use wsave_core::{
    FilterRegistry, SaveError, SaveMachine, SaveOutcome, Severity, SkipReason, StatusReport,
};

pub fn print_formats<D>(registry: &FilterRegistry<D>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![header_cell("Format"), header_cell("Extension")]);
    for entry in registry.entries() {
        table.add_row(vec![entry.label(), entry.extension()]);
    }
    println!("{table}");
}

pub fn print_outcome(trigger: &str, outcome: &SaveOutcome) {
    println!("{trigger}: {}", describe_outcome(outcome));
}

pub fn print_status<D>(machine: &SaveMachine<D>, status: &StatusReport) {
    let target = if machine.config().has_target() {
        machine.filename().display().to_string()
    } else {
        "(not set)".to_string()
    };
    println!("Target: {target}");
    println!("Format: {}", machine.filter());
    println!(
        "Auto-save: {}",
        if machine.auto_save() { "on" } else { "off" }
    );
    for condition in status.conditions() {
        match condition.severity() {
            Severity::Error => eprintln!("{condition}"),
            Severity::Warning | Severity::Information => println!("{condition}"),
        }
    }
}

pub fn print_error(error: &anyhow::Error) {
    eprintln!("{}", render_error(error));
}

/// Save errors get their user-facing message and hint; anything else its
/// context chain.
fn render_error(error: &anyhow::Error) -> String {
    let Some(save_error) = error.downcast_ref::<SaveError>() else {
        return format!("error: {error:#}");
    };
    match save_error.suggestion() {
        Some(hint) => format!("error: {}\nhint: {hint}", save_error.user_message()),
        None => format!("error: {}", save_error.user_message()),
    }
}

fn describe_outcome(outcome: &SaveOutcome) -> String {
    match outcome {
        SaveOutcome::Saved { path } => format!("saved {}", path.display()),
        SaveOutcome::Skipped(SkipReason::NoData) => "nothing to save".to_string(),
        SaveOutcome::Skipped(SkipReason::NoTarget) => "no file name set".to_string(),
        SaveOutcome::Skipped(SkipReason::AutoSaveOff) => "auto-save is off".to_string(),
        SaveOutcome::Failed { message } => format!("failed: {message}"),
        SaveOutcome::Cancelled => "cancelled".to_string(),
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}
