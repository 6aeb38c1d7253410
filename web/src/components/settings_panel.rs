#![allow(non_snake_case)]

use dioxus::prelude::*;

use client_settings::SettingName;

use crate::hooks::use_client_settings;

#[component]
pub fn SettingsPanel() -> Element {
    rsx! {
        div {
            class: "flex flex-col gap-2 p-4",

            h2 { class: "text-lg", "Settings" }

            for name in SettingName::iter_variants() {
                SettingSelect { key: "{name}", name }
            }
        }
    }
}

#[component]
pub fn SettingSelect(name: SettingName) -> Element {
    let client_settings = use_client_settings();
    let current_value = client_settings.get(name);
    let is_loaded = client_settings.is_loaded();
    let label = name.label();
    let entry = name.schema();

    rsx! {
        fieldset {
            class: "fieldset",
            label {
                class: "fieldset-label text-sm text-base-content",
                span { class: "label-text grow", "{label}" }

                select {
                    class: "select select-sm",
                    disabled: !is_loaded,
                    onchange: move |event| {
                        if let Some(value) = entry.parse_value(&event.value()) {
                            client_settings.set_setting_value(name, value.clone());
                        }
                    },

                    for value in entry.values.iter() {
                        option {
                            value: "{value}",
                            selected: *value == current_value,
                            "{value}"
                        }
                    }
                }
            }
        }
    }
}
