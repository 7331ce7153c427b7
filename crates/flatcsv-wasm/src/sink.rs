use flatcsv::Sink;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url, Window};

/// Browsers may start the save after `click` returns, so the object URL
/// outlives the call by this much.
pub const REVOKE_DELAY_MS: i32 = 1_000;

/// Saves a document through the browser's download flow: the payload is
/// wrapped in a `Blob`, exposed through an object URL and fetched by a
/// detached anchor carrying the `download` attribute.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserDownload;

impl Sink for BrowserDownload {
    type Error = JsValue;

    fn deliver(&mut self, payload: &str, filename: &str, content_type: &str) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document available"))?;

        let parts = js_sys::Array::of1(&JsValue::from_str(payload));
        let bag = BlobPropertyBag::new();
        bag.set_type(content_type);
        let blob = Blob::new_with_str_sequence_and_options(&parts, &bag)?;
        let url = Url::create_object_url_with_blob(&blob)?;

        let anchor: HtmlAnchorElement = document
            .create_element("a")?
            .dyn_into()
            .map_err(JsValue::from)?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();

        schedule_revoke(&window, url).map(|_| ())
    }
}

/// Releases `url` after [`REVOKE_DELAY_MS`] from a timer callback. Returns
/// the timer handle.
pub fn schedule_revoke(window: &Window, url: String) -> Result<i32, JsValue> {
    let revoke = Closure::once_into_js(move || {
        if let Err(err) = Url::revoke_object_url(&url) {
            web_sys::console::warn_2(&JsValue::from_str("flatcsv: could not revoke object url"), &err);
        }
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        revoke.unchecked_ref::<js_sys::Function>(),
        REVOKE_DELAY_MS,
    )
}
