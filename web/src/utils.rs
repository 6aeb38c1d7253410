use anyhow::{anyhow, Context, Result};
use gloo_utils::errors::JsError;
use wasm_bindgen::JsValue;

pub fn js_error(err: JsValue) -> anyhow::Error {
    match JsError::try_from(err) {
        Ok(js_error) => js_error.into(),
        Err(not_an_error) => anyhow!("{not_an_error}"),
    }
}

pub fn get_document_element() -> Result<web_sys::Element> {
    let window = web_sys::window().context("Unable to get the window object")?;
    let document = window
        .document()
        .context("Unable to get the document object")?;
    document
        .document_element()
        .context("Unable to get the document element")
}

pub fn get_local_storage() -> Result<web_sys::Storage> {
    let window = web_sys::window().context("Unable to get the window object")?;
    window
        .local_storage()
        .map_err(js_error)?
        .context("No local storage available")
}
