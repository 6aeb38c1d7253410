use std::{cell::RefCell, rc::Rc};

use log::{debug, error};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::SettingsError, settings::StoredSettings};

pub const BAD_SETTINGS_MESSAGE: &str = "Bad user settings in local storage";

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq)]
pub struct DiagnosticEvent {
    pub message: String,
    pub extras: DiagnosticExtras,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq)]
pub struct DiagnosticExtras {
    pub error: String,
}

/// External error reporting collaborator
pub trait DiagnosticsSink {
    fn report(&self, event: DiagnosticEvent);
}

/// Reports diagnostics through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl DiagnosticsSink for LogDiagnostics {
    fn report(&self, event: DiagnosticEvent) {
        error!("{}: {}", event.message, event.extras.error);
    }
}

/// Keeps every reported event, mostly useful in tests
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: RefCell<Vec<DiagnosticEvent>>,
}

impl RecordingDiagnostics {
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.borrow().clone()
    }
}

impl DiagnosticsSink for RecordingDiagnostics {
    fn report(&self, event: DiagnosticEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[derive(Clone)]
pub struct SettingsCodec {
    diagnostics: Rc<dyn DiagnosticsSink>,
}

impl SettingsCodec {
    pub fn new(diagnostics: Rc<dyn DiagnosticsSink>) -> Self {
        Self { diagnostics }
    }

    /// Parses a persisted blob, falling back to the schema defaults on invalid JSON.
    ///
    /// Only the JSON syntax is checked here, field values are validated when read.
    pub fn decode(&self, blob: Option<&str>) -> StoredSettings {
        let Some(blob) = blob else {
            return StoredSettings::defaults();
        };

        match serde_json::from_str::<Value>(blob) {
            Ok(Value::Object(settings)) => StoredSettings(settings),
            // Well-formed but not an object: no setting can be read from it
            Ok(other) => {
                debug!("Ignoring settings stored as a non-object JSON value: {other}");
                StoredSettings::default()
            }
            Err(err) => {
                self.diagnostics.report(DiagnosticEvent {
                    message: BAD_SETTINGS_MESSAGE.to_string(),
                    extras: DiagnosticExtras {
                        error: err.to_string(),
                    },
                });
                StoredSettings::defaults()
            }
        }
    }

    pub fn encode(&self, settings: &StoredSettings) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(settings)?)
    }
}
