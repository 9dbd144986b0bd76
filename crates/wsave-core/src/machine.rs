//! The save state machine.
//!
//! A component is either without a target (`filename` empty) or has one.
//! The presence of data and the auto-save flag decide whether a save is
//! attempted, never which state the component is in.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::config::{PersistScope, SaveConfig, SaveEnvironment};
use crate::error::{Result, SaveError};
use crate::filter::FilterRegistry;
use crate::picker::{FilePicker, PickerRequest};
use crate::status::StatusReport;

/// Hooks a concrete component can override.
///
/// Every method has a default, so [`DefaultBehavior`] is enough for
/// components whose registry carries a writer for each filter.
pub trait SaveBehavior<D> {
    /// Write `data` to `path` in the format named by `filter`.
    ///
    /// The default resolves the registry writer. Components built with a
    /// label-only registry override this instead.
    fn do_save(
        &mut self,
        registry: &FilterRegistry<D>,
        filter: &str,
        path: &Path,
        data: &D,
    ) -> Result<()> {
        registry
            .writer_for(filter)?
            .write(path, data)
            .map_err(|source| SaveError::write(path, source))
    }

    /// Base name proposed to the file picker before a target is chosen.
    fn suggested_name(&self) -> String {
        String::new()
    }

    /// Called whenever new input arrives, e.g. to show the input size.
    fn update_status(&mut self, _data: Option<&D>) {}

    /// Filters offered in the file picker.
    fn valid_filters(&self, registry: &FilterRegistry<D>) -> Vec<String> {
        registry.labels().map(str::to_string).collect()
    }

    /// Filter preselected in the file picker.
    fn default_valid_filter(&self, current: &str) -> String {
        current.to_string()
    }
}

/// Behavior with every hook left at its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBehavior;

impl<D> SaveBehavior<D> for DefaultBehavior {}

/// Why no writer was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No data has been received, or the input was cleared.
    NoData,
    /// No target file has been chosen.
    NoTarget,
    /// New input arrived while auto-save is off.
    AutoSaveOff,
}

/// Result of a save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The writer completed.
    Saved { path: PathBuf },
    /// No writer was invoked.
    Skipped(SkipReason),
    /// The writer failed; the message is shown as a general error.
    Failed { message: String },
    /// The user dismissed the file picker.
    Cancelled,
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Save orchestration for a single component.
pub struct SaveMachine<D> {
    registry: FilterRegistry<D>,
    config: SaveConfig,
    environment: SaveEnvironment,
    data: Option<D>,
    general_error: Option<String>,
    button_label: String,
    behavior: Box<dyn SaveBehavior<D>>,
    picker: Box<dyn FilePicker>,
}

impl<D> SaveMachine<D> {
    /// Create a machine from persisted settings.
    ///
    /// An empty or unregistered `filter` is replaced by the registry
    /// default, and a persisted `filename` is reconciled with the filter's
    /// extension.
    pub fn new(
        registry: FilterRegistry<D>,
        mut config: SaveConfig,
        environment: SaveEnvironment,
        picker: Box<dyn FilePicker>,
    ) -> Self {
        if !registry.contains(&config.filter) {
            if !config.filter.is_empty() {
                warn!(
                    filter = %config.filter,
                    "Persisted output format is no longer available, using the default"
                );
            }
            config.filter = registry.default_filter().to_string();
        }
        if config.has_target() {
            // Registered labels always parse, `contains` was ensured above.
            if let Ok(extension) = registry.extension_for(&config.filter) {
                let reconciled = registry.all_extensions().normalize(&config.filename, extension);
                if reconciled != config.filename {
                    debug!(
                        from = %config.filename.display(),
                        to = %reconciled.display(),
                        "Reconciled persisted file name with output format"
                    );
                    config.filename = reconciled;
                }
            }
        }

        Self {
            registry,
            config,
            environment,
            data: None,
            general_error: None,
            button_label: "Save".to_string(),
            behavior: Box::new(DefaultBehavior),
            picker,
        }
    }

    /// Replace the default hooks.
    pub fn with_behavior(mut self, behavior: impl SaveBehavior<D> + 'static) -> Self {
        self.behavior = Box::new(behavior);
        self
    }

    /// Entry point for the host's input handler.
    ///
    /// Stores the payload (or its absence), clears the previous save error
    /// and, when auto-save is on and a target is set, saves.
    pub fn on_new_input(&mut self, data: Option<D>) -> Result<SaveOutcome> {
        self.data = data;
        self.general_error = None;
        self.behavior.update_status(self.data.as_ref());

        if !self.config.auto_save {
            return Ok(SaveOutcome::Skipped(SkipReason::AutoSaveOff));
        }
        if !self.config.has_target() {
            debug!("Auto-save is on but no file name is set");
            return Ok(SaveOutcome::Skipped(SkipReason::NoTarget));
        }
        self.save()
    }

    /// Save to the current target, asking for one if none is set.
    pub fn save(&mut self) -> Result<SaveOutcome> {
        if !self.config.has_target() {
            return self.save_as();
        }
        self.try_save()
    }

    /// Ask the user for a target and format, then save.
    ///
    /// Cancelling the picker changes nothing.
    pub fn save_as(&mut self) -> Result<SaveOutcome> {
        let request = self.picker_request()?;
        let Some(choice) = self.picker.choose(&request)? else {
            debug!("File picker cancelled");
            return Ok(SaveOutcome::Cancelled);
        };

        let extension = self.registry.extension_for(&choice.filter)?;
        let filename = self
            .registry
            .all_extensions()
            .normalize(&choice.path, extension);

        self.config.last_dir = filename
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.button_label = format!("Save as {}", display_name(&filename));
        info!(
            filename = %filename.display(),
            filter = %choice.filter,
            "Save target changed"
        );
        self.config.filename = filename;
        self.config.filter = choice.filter;

        self.try_save()
    }

    /// Write the current data, if there is any and a target is set.
    fn try_save(&mut self) -> Result<SaveOutcome> {
        self.general_error = None;
        let Some(data) = self.data.as_ref() else {
            debug!("Nothing to save: no input data");
            return Ok(SaveOutcome::Skipped(SkipReason::NoData));
        };
        if !self.config.has_target() {
            return Ok(SaveOutcome::Skipped(SkipReason::NoTarget));
        }

        let path = &self.config.filename;
        match self
            .behavior
            .do_save(&self.registry, &self.config.filter, path, data)
        {
            Ok(()) => {
                info!(filename = %path.display(), filter = %self.config.filter, "Saved");
                Ok(SaveOutcome::Saved { path: path.clone() })
            }
            Err(err) if err.is_io() => {
                let message = err.to_string();
                warn!(filename = %path.display(), error = %message, "Save failed");
                self.general_error = Some(message.clone());
                Ok(SaveOutcome::Failed { message })
            }
            Err(err) => {
                error!(filter = %self.config.filter, error = %err, "Save misconfigured");
                Err(err)
            }
        }
    }

    fn picker_request(&self) -> Result<PickerRequest> {
        let filters = self.behavior.valid_filters(&self.registry);
        let default_filter = self.behavior.default_valid_filter(&self.config.filter);
        if !filters.contains(&default_filter) {
            return Err(SaveError::UnknownFilter {
                label: default_filter,
            });
        }
        Ok(PickerRequest {
            start: self.initial_start_dir(),
            filters,
            default_filter,
            suggested_name: self.behavior.suggested_name(),
            known_extensions: self.registry.all_extensions().clone(),
        })
    }

    /// Where the file picker opens.
    ///
    /// The current file when its directory still exists, otherwise the last
    /// used directory, otherwise the home directory.
    pub fn initial_start_dir(&self) -> PathBuf {
        let filename = &self.config.filename;
        if self.config.has_target() && filename.parent().is_some_and(Path::exists) {
            filename.clone()
        } else if !self.config.last_dir.as_os_str().is_empty() {
            self.config.last_dir.clone()
        } else {
            self.environment.home_dir.clone()
        }
    }

    /// Turn auto-save on or off. Never saves by itself.
    pub fn set_auto_save(&mut self, enabled: bool) {
        if self.config.auto_save != enabled {
            debug!(enabled, "Auto-save toggled");
        }
        self.config.auto_save = enabled;
    }

    /// Currently active status conditions.
    pub fn status(&self) -> StatusReport {
        StatusReport::evaluate(
            &self.config,
            self.data.is_some(),
            self.general_error.as_deref(),
        )
    }

    /// Settings to persist for the given scope.
    pub fn snapshot(&self, scope: PersistScope) -> SaveConfig {
        self.config.for_scope(scope)
    }

    pub fn config(&self) -> &SaveConfig {
        &self.config
    }

    pub fn filename(&self) -> &Path {
        &self.config.filename
    }

    pub fn filter(&self) -> &str {
        &self.config.filter
    }

    pub fn last_dir(&self) -> &Path {
        &self.config.last_dir
    }

    pub fn auto_save(&self) -> bool {
        self.config.auto_save
    }

    pub fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }

    pub fn registry(&self) -> &FilterRegistry<D> {
        &self.registry
    }

    /// Text of the save button.
    pub fn button_label(&self) -> &str {
        &self.button_label
    }
}

impl<D> fmt::Debug for SaveMachine<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaveMachine")
            .field("config", &self.config)
            .field("has_data", &self.data.is_some())
            .field("general_error", &self.general_error)
            .field("button_label", &self.button_label)
            .finish_non_exhaustive()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
