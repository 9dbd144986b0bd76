use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use wsave_cli::settings::Settings;
use wsave_cli::table::Table;
use wsave_cli::terminal::TerminalDialog;
use wsave_cli::writers::build_registry;
use wsave_core::picker::{PlatformStrategy, picker_for, platform_picker};
use wsave_core::{FilePicker, PersistScope, SaveEnvironment, SaveMachine, SaveOutcome};

use crate::cli::{PickerArg, RunArgs};
use crate::summary::{print_formats, print_outcome, print_status};

pub fn run_formats() -> Result<()> {
    let registry = build_registry().context("build output formats")?;
    print_formats(&registry);
    Ok(())
}

/// Print the persisted state as a freshly loaded component would show it.
pub fn run_status(settings_path: &Path, environment: SaveEnvironment) -> Result<bool> {
    let settings = Settings::load_from(settings_path);
    let machine = build_machine(&settings, environment, PickerArg::Auto)?;
    let status = machine.status();
    print_status(&machine, &status);
    Ok(status.has_errors())
}

/// Deliver inputs, press the requested button and persist the result.
///
/// Returns whether an error condition remains.
pub fn run_inputs(
    args: &RunArgs,
    settings_path: &Path,
    environment: SaveEnvironment,
) -> Result<bool> {
    let span = info_span!("run", settings = %settings_path.display());
    let _guard = span.enter();

    let mut settings = Settings::load_from(settings_path);
    let mut machine = build_machine(&settings, environment, args.picker)?;

    if let Some(toggle) = args.auto_save {
        machine.set_auto_save(toggle.enabled());
    }
    if args.clear {
        let outcome = machine.on_new_input(None)?;
        print_outcome("cleared input", &outcome);
    }
    for input in &args.inputs {
        let table = Table::read_csv(input)?;
        info!(
            input = %input.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "New input"
        );
        let outcome = machine.on_new_input(Some(table))?;
        print_outcome(&input.display().to_string(), &outcome);
    }

    let pressed: Option<SaveOutcome> = if args.save_as {
        Some(machine.save_as()?)
    } else if args.save {
        Some(machine.save()?)
    } else {
        None
    };
    if let Some(outcome) = pressed {
        print_outcome(machine.button_label(), &outcome);
    }

    settings.save = machine.snapshot(PersistScope::Workflow);
    settings.save_to(settings_path)?;

    let status = machine.status();
    print_status(&machine, &status);
    Ok(status.has_errors())
}

fn build_machine(
    settings: &Settings,
    environment: SaveEnvironment,
    picker: PickerArg,
) -> Result<SaveMachine<Table>> {
    let registry = build_registry().context("build output formats")?;
    Ok(SaveMachine::new(
        registry,
        settings.save.clone(),
        environment,
        terminal_picker(picker),
    ))
}

fn terminal_picker(picker: PickerArg) -> Box<dyn FilePicker> {
    let dialog = TerminalDialog::new(io::stdin().lock(), io::stderr());
    match picker {
        PickerArg::Auto => platform_picker(dialog),
        PickerArg::Fixup => picker_for(PlatformStrategy::Fixup, dialog),
        PickerArg::Live => picker_for(PlatformStrategy::Live, dialog),
    }
}
