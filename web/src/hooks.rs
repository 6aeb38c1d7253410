use std::rc::Rc;

use dioxus::prelude::*;
use log::{debug, error};

use client_settings::{
    SettingName, SettingValue, Settings, SettingsContainer, SettingsSubscriber, WriteOutcome,
};

#[derive(Clone)]
pub struct UseClientSettings {
    settings: Signal<Settings>,
    is_loaded: Signal<bool>,
    subscriber: Rc<SettingsSubscriber>,
}

impl UseClientSettings {
    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    pub fn get(&self, name: SettingName) -> SettingValue {
        self.settings.read().get(name).clone()
    }

    /// Whether the persisted settings were loaded, until then `settings` are the defaults
    pub fn is_loaded(&self) -> bool {
        *self.is_loaded.read()
    }

    pub fn set_setting_value(&self, name: SettingName, value: SettingValue) {
        match self.subscriber.set_setting_value(name, value) {
            Ok(WriteOutcome::Persisted) => debug!("Setting `{name}` saved"),
            Ok(WriteOutcome::Rejected) => debug!("Setting `{name}` value rejected"),
            Ok(WriteOutcome::Unchanged) => {}
            Err(err) => error!("Failed to save setting `{name}`: {err:?}"),
        }
    }
}

/// Binds the component to the `SettingsContainer` provided in the context.
///
/// Persisted settings are loaded once, after the first render of the component.
pub fn use_client_settings() -> UseClientSettings {
    let container = use_context::<SettingsContainer>();
    let settings = use_signal(|| container.current());
    let mut is_loaded = use_signal(|| false);
    let subscriber = use_hook(move || {
        Rc::new(container.subscribe(move |new_settings: &Settings| {
            let mut settings = settings;
            settings.set(new_settings.clone());
        }))
    });

    use_effect({
        let subscriber = subscriber.clone();
        move || {
            subscriber.load();
            is_loaded.set(subscriber.is_loaded());
        }
    });

    UseClientSettings {
        settings,
        is_loaded,
        subscriber,
    }
}
