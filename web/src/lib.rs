#![allow(non_snake_case)]

use std::rc::Rc;

use cfg_if::cfg_if;
use dioxus::prelude::*;
use log::debug;

use client_settings::{
    ClientSettingsConfig, ClientSettingsStore, LogDiagnostics, SettingsContainer, SettingsStorage,
};

use components::settings_panel::SettingsPanel;

pub mod components;
pub mod hooks;

cfg_if! {
    if #[cfg(feature = "web")] {
        pub mod local_storage;
        mod theme;
        mod utils;

        use theme::ThemeApplier;

        fn settings_storage() -> Rc<dyn SettingsStorage> {
            Rc::new(local_storage::BrowserLocalStorage)
        }
    } else {
        fn settings_storage() -> Rc<dyn SettingsStorage> {
            Rc::new(client_settings::MemoryStorage::new())
        }

        #[component]
        fn ThemeApplier() -> Element {
            rsx! {}
        }
    }
}

#[component]
pub fn App() -> Element {
    use_context_provider(|| {
        let config = ClientSettingsConfig::default();
        debug!("Using settings stored under `{}`", config.storage_key);
        SettingsContainer::new(ClientSettingsStore::new(
            &config,
            settings_storage(),
            Rc::new(LogDiagnostics),
        ))
    });

    rsx! {
        div {
            class: "h-full flex flex-col text-sm",

            ThemeApplier {}
            SettingsPanel {}
        }
    }
}
