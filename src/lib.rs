#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate macro_attr;

#[macro_use]
extern crate enum_derive;

pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod schema;
pub mod settings;
pub mod storage;
pub mod store;

pub use codec::{DiagnosticEvent, DiagnosticsSink, LogDiagnostics};
pub use config::ClientSettingsConfig;
pub use container::{SettingsContainer, SettingsSubscriber};
pub use error::SettingsError;
pub use schema::{SchemaEntry, SettingName, SettingValue};
pub use settings::{Settings, StoredSettings};
pub use storage::{MemoryStorage, SettingsStorage, StorageError};
pub use store::{ClientSettingsStore, WriteOutcome};
