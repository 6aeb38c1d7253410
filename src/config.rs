use serde::{Deserialize, Serialize};

pub const DEFAULT_STORAGE_KEY: &str = "__designer_user_settings__";

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq)]
#[serde(default)]
pub struct ClientSettingsConfig {
    /// Key of the settings blob in the browser storage
    pub storage_key: String,
}

impl Default for ClientSettingsConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}
