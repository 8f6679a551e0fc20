//! Client-side save of an export file.

use wasm_bindgen::{JsCast, JsValue};

use batlog_app::log_view::ExportFile;

/// Offer `file` to the user as a download.
///
/// # Errors
///
/// Returns the JS exception raised by any of the DOM calls.
pub fn save(file: &ExportFile) -> Result<(), JsValue> {
    let bytes = js_sys::Uint8Array::from(file.content.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(JsValue::from)?;
    anchor.set_href(&url);
    anchor.set_download(&file.filename);
    anchor.click();

    web_sys::Url::revoke_object_url(&url)
}
