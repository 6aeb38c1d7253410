#![allow(non_snake_case)]

use anyhow::Result;
use dioxus::prelude::*;

use client_settings::{SettingName, SettingValue};

use crate::{
    hooks::use_client_settings,
    utils::{get_document_element, js_error},
};

/// Reflects the `theme` setting on the document element
pub fn apply_theme(theme: &SettingValue) -> Result<bool> {
    let document_element = get_document_element()?;

    let dark_mode = *theme == SettingValue::from("dark");
    log::debug!("Applying {theme} theme");
    if dark_mode {
        document_element
            .set_attribute("data-theme", "uidark")
            .map_err(js_error)?;
        document_element.class_list().add_1("dark").map_err(js_error)?;
    } else {
        document_element
            .set_attribute("data-theme", "uilight")
            .map_err(js_error)?;
        document_element
            .class_list()
            .remove_1("dark")
            .map_err(js_error)?;
    }

    Ok(dark_mode)
}

#[component]
pub fn ThemeApplier() -> Element {
    let client_settings = use_client_settings();

    use_effect(move || {
        let theme = client_settings.get(SettingName::Theme);
        if let Err(err) = apply_theme(&theme) {
            log::error!("Failed to apply the {theme} theme: {err:?}");
        }
    });

    rsx! {}
}
