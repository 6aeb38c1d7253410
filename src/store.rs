use std::rc::Rc;

use log::debug;

use crate::{
    codec::{DiagnosticsSink, SettingsCodec},
    config::ClientSettingsConfig,
    error::SettingsError,
    schema::{SettingName, SettingValue},
    settings::{Settings, StoredSettings},
    storage::{SettingsPersistence, SettingsStorage},
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WriteOutcome {
    Persisted,
    /// The value is not allowed by the schema, nothing was written
    Rejected,
    /// The value is already the current one, nothing was written
    Unchanged,
}

/// Reads settings from and writes them to the persisted blob.
///
/// Every call goes back to the storage, nothing is cached here.
#[derive(Clone)]
pub struct ClientSettingsStore {
    persistence: SettingsPersistence,
    codec: SettingsCodec,
}

impl ClientSettingsStore {
    pub fn new(
        config: &ClientSettingsConfig,
        storage: Rc<dyn SettingsStorage>,
        diagnostics: Rc<dyn DiagnosticsSink>,
    ) -> Self {
        Self {
            persistence: SettingsPersistence::new(storage, config.storage_key.clone()),
            codec: SettingsCodec::new(diagnostics),
        }
    }

    pub fn read(&self) -> StoredSettings {
        self.codec.decode(self.persistence.load().as_deref())
    }

    pub fn load_settings(&self) -> Settings {
        Settings::from(&self.read())
    }

    pub fn get_setting(&self, name: SettingName) -> SettingValue {
        self.read().resolve(name)
    }

    pub fn set_setting(
        &self,
        name: SettingName,
        value: SettingValue,
    ) -> Result<WriteOutcome, SettingsError> {
        let stored = self.read();
        if !name.allows(&value) {
            debug!("Ignoring value `{value}` not allowed for setting `{name}`");
            return Ok(WriteOutcome::Rejected);
        }

        let blob = self.codec.encode(&stored.with(name, &value))?;
        self.persistence.save(&blob)?;
        Ok(WriteOutcome::Persisted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        codec::RecordingDiagnostics,
        storage::{MemoryStorage, StorageError},
    };
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::{json, Value};

    struct TestStore {
        store: ClientSettingsStore,
        storage: Rc<MemoryStorage>,
        diagnostics: Rc<RecordingDiagnostics>,
    }

    impl TestStore {
        fn persisted(&self) -> Option<Value> {
            self.storage
                .get_item(&ClientSettingsConfig::default().storage_key)
                .unwrap()
                .map(|blob| serde_json::from_str(&blob).unwrap())
        }

        fn persist(&self, blob: &str) {
            self.storage
                .set_item(&ClientSettingsConfig::default().storage_key, blob)
                .unwrap();
        }
    }

    #[fixture]
    fn test_store() -> TestStore {
        let storage = Rc::new(MemoryStorage::new());
        let diagnostics = Rc::new(RecordingDiagnostics::default());
        TestStore {
            store: ClientSettingsStore::new(
                &ClientSettingsConfig::default(),
                storage.clone(),
                diagnostics.clone(),
            ),
            storage,
            diagnostics,
        }
    }

    #[rstest]
    fn test_get_setting_on_empty_storage(test_store: TestStore) {
        for name in SettingName::iter_variants() {
            assert_eq!(test_store.store.get_setting(name), *name.default_value());
        }
        assert_eq!(test_store.persisted(), None);
    }

    #[rstest]
    fn test_get_setting_on_malformed_storage(test_store: TestStore) {
        test_store.persist("{not json");

        assert_eq!(
            test_store.store.get_setting(SettingName::Theme),
            SettingValue::from("light")
        );
        assert_eq!(test_store.diagnostics.events().len(), 1);
    }

    #[rstest]
    fn test_get_setting_on_unavailable_storage(test_store: TestStore) {
        test_store.storage.set_available(false);

        assert_eq!(
            test_store.store.get_setting(SettingName::NavigatorLayout),
            SettingValue::from("undocked")
        );
        assert!(test_store.diagnostics.events().is_empty());
    }

    #[rstest]
    fn test_get_setting_falls_back_to_default_for_invalid_stored_value(test_store: TestStore) {
        test_store.persist(r#"{"theme":"purple","canvasZoom":150}"#);

        assert_eq!(
            test_store.store.get_setting(SettingName::Theme),
            SettingValue::from("light")
        );
        assert_eq!(
            test_store.store.get_setting(SettingName::CanvasZoom),
            SettingValue::Number(150)
        );
    }

    #[rstest]
    fn test_set_allowed_setting_keeps_other_fields(test_store: TestStore) {
        test_store.persist(r#"{"canvasZoom":150,"theme":"purple","legacy":"value"}"#);

        let outcome = test_store
            .store
            .set_setting(SettingName::NavigatorLayout, "docked".into())
            .unwrap();

        assert_eq!(outcome, WriteOutcome::Persisted);
        assert_eq!(
            test_store.persisted(),
            Some(json!({
                "canvasZoom": 150,
                "theme": "purple",
                "legacy": "value",
                "navigatorLayout": "docked"
            }))
        );
    }

    #[rstest]
    fn test_set_setting_on_empty_storage_writes_defaults(test_store: TestStore) {
        test_store
            .store
            .set_setting(SettingName::IsAiCommandBarVisible, false.into())
            .unwrap();

        assert_eq!(
            test_store.persisted(),
            Some(json!({
                "theme": "light",
                "navigatorLayout": "undocked",
                "isAiCommandBarVisible": false,
                "canvasZoom": 100
            }))
        );
    }

    #[rstest]
    fn test_set_setting_over_non_object_blob(test_store: TestStore) {
        test_store.persist("42");

        test_store
            .store
            .set_setting(SettingName::Theme, "dark".into())
            .unwrap();

        assert_eq!(test_store.persisted(), Some(json!({ "theme": "dark" })));
        assert!(test_store.diagnostics.events().is_empty());
    }

    #[rstest]
    #[case::unknown_text(SettingName::Theme, SettingValue::from("purple"))]
    #[case::wrong_type(SettingName::IsAiCommandBarVisible, SettingValue::from("false"))]
    #[case::unknown_number(SettingName::CanvasZoom, SettingValue::Number(42))]
    fn test_set_rejected_setting_leaves_storage_untouched(
        test_store: TestStore,
        #[case] name: SettingName,
        #[case] value: SettingValue,
    ) {
        test_store.persist(r#"{"theme":"dark"}"#);

        let outcome = test_store.store.set_setting(name, value).unwrap();

        assert_eq!(outcome, WriteOutcome::Rejected);
        assert_eq!(test_store.persisted(), Some(json!({ "theme": "dark" })));
    }

    #[rstest]
    fn test_set_setting_reports_storage_failures(test_store: TestStore) {
        test_store.storage.set_read_only(true);

        let result = test_store
            .store
            .set_setting(SettingName::Theme, "dark".into());

        assert!(matches!(
            result,
            Err(SettingsError::Storage {
                source: StorageError::Write { .. },
                ..
            })
        ));
    }

    #[rstest]
    fn test_load_settings_is_always_valid(test_store: TestStore) {
        test_store.persist(r#"{"theme":"dark","canvasZoom":"big"}"#);

        let settings = test_store.store.load_settings();

        for (name, value) in settings.iter() {
            assert!(name.allows(value));
        }
        assert_eq!(settings.get(SettingName::Theme), &SettingValue::from("dark"));
    }
}
