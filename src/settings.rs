use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::{SettingName, SettingValue};

/// Settings as they are persisted: a parsed but unvalidated JSON object.
///
/// Keys unknown to the schema and values outside of it are kept as is so that a
/// merge only ever touches the updated setting.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(transparent)]
pub struct StoredSettings(pub Map<String, Value>);

impl StoredSettings {
    pub fn defaults() -> Self {
        Settings::default().into()
    }

    pub fn raw_value(&self, name: SettingName) -> Option<&Value> {
        self.0.get(name.key())
    }

    /// Stored value for `name` when it is allowed by the schema, its default otherwise
    pub fn resolve(&self, name: SettingName) -> SettingValue {
        self.raw_value(name)
            .and_then(SettingValue::from_json)
            .filter(|value| name.allows(value))
            .unwrap_or_else(|| name.default_value().clone())
    }

    pub fn with(mut self, name: SettingName, value: &SettingValue) -> Self {
        self.0.insert(name.key().to_string(), value.to_json());
        self
    }
}

impl From<Settings> for StoredSettings {
    fn from(settings: Settings) -> Self {
        StoredSettings(
            settings
                .0
                .into_iter()
                .map(|(name, value)| (name.key().to_string(), value.to_json()))
                .collect(),
        )
    }
}

/// Current value of every setting, always valid against the schema
#[derive(Debug, PartialEq, Clone)]
pub struct Settings(BTreeMap<SettingName, SettingValue>);

impl Default for Settings {
    fn default() -> Self {
        Self(
            SettingName::iter_variants()
                .map(|name| (name, name.default_value().clone()))
                .collect(),
        )
    }
}

impl Settings {
    pub fn get(&self, name: SettingName) -> &SettingValue {
        // The map is built from every variant and never loses a key
        self.0.get(&name).unwrap_or_else(|| name.default_value())
    }

    /// New mapping with `name` updated, or `None` if `value` is not allowed for `name`
    pub fn with(&self, name: SettingName, value: SettingValue) -> Option<Self> {
        if !name.allows(&value) {
            return None;
        }
        let mut values = self.0.clone();
        values.insert(name, value);
        Some(Self(values))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SettingName, &SettingValue)> {
        self.0.iter().map(|(name, value)| (*name, value))
    }
}

impl From<&StoredSettings> for Settings {
    fn from(stored: &StoredSettings) -> Self {
        Self(
            SettingName::iter_variants()
                .map(|name| (name, stored.resolve(name)))
                .collect(),
        )
    }
}
