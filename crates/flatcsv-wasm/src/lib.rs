mod js_value;
mod sink;

pub use crate::js_value::from_js;
pub use crate::sink::{BrowserDownload, REVOKE_DELAY_MS, schedule_revoke};

use flatcsv::{Download, Options, Sink};
use wasm_bindgen::prelude::*;

/// Use wee_alloc as the global allocator for smaller WASM binary size
#[cfg(feature = "size_opt")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Maximum input size in bytes (10 MB)
const MAX_INPUT_SIZE: usize = 10 * 1024 * 1024;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Convert a JSON string to CSV. `options_json` is an optional JSON object
/// with the same camelCase keys as the JS options object.
#[wasm_bindgen]
pub fn json_to_csv(json_str: &str, options_json: Option<String>) -> Result<String, String> {
    if json_str.len() > MAX_INPUT_SIZE {
        return Err(format!(
            "Input exceeds maximum size limit of {} bytes",
            MAX_INPUT_SIZE
        ));
    }

    let value: serde_json::Value =
        serde_json::from_str(json_str).map_err(|e| format!("Invalid JSON: {}", e))?;
    let options = match options_json.as_deref() {
        Some(s) if !s.trim().is_empty() => {
            Options::from_json_str(s).map_err(|e| format!("Invalid options: {}", e))?
        }
        _ => Options::default(),
    };

    Ok(flatcsv::encode_json(&value, &options))
}

/// Convert a live JS value (objects, arrays, `Date`, `BigInt`, ...) to CSV.
#[wasm_bindgen(js_name = toCsv)]
pub fn to_csv(value: JsValue, options: JsValue) -> Result<String, JsValue> {
    let options = options_from_js(options)?;
    let value = from_js(&value)?;
    Ok(flatcsv::encode(&value, &options))
}

/// Offer a finished CSV document to the user as a file download.
#[wasm_bindgen(js_name = exportCsv)]
pub fn export_csv(
    csv: &str,
    filename: Option<String>,
    content_type: Option<String>,
) -> Result<(), JsValue> {
    let download = download(filename, content_type);
    BrowserDownload.deliver(csv, &download.filename, &download.content_type)
}

/// Get the version of the flatcsv bindings
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn options_from_js(options: JsValue) -> Result<Options, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(Options::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))
}

fn download(filename: Option<String>, content_type: Option<String>) -> Download {
    let mut download = Download::default();
    if let Some(name) = filename {
        download.filename = name;
    }
    if let Some(ct) = content_type {
        download.content_type = ct;
    }
    download
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_to_csv_simple() {
        let json = r#"[{"month": "Jan", "data": 10}, {"month": "Feb", "data": 20}]"#;
        let result = json_to_csv(json, None);
        assert_eq!(result.as_deref(), Ok("month,data\nJan,10\nFeb,20"));
    }

    #[test]
    fn test_json_to_csv_with_options() {
        let json = r#"{"a": {"b": "x;y"}}"#;
        let opts = Some(r#"{"delimiter": ";", "header": false}"#.to_string());
        assert_eq!(json_to_csv(json, opts).as_deref(), Ok("\"x;y\""));
    }

    #[test]
    fn test_json_to_csv_rejects_bad_options() {
        let result = json_to_csv("[]", Some(r#"{"lineEnding": "x"}"#.to_string()));
        assert!(result.unwrap_err().contains("Invalid options"));
    }

    #[test]
    fn test_json_to_csv_invalid_json() {
        let result = json_to_csv("{", None);
        assert!(result.unwrap_err().starts_with("Invalid JSON"));
    }

    #[test]
    fn test_json_to_csv_size_limit() {
        let large_json = "x".repeat(MAX_INPUT_SIZE + 1);
        let result = json_to_csv(&large_json, None);
        assert!(
            result
                .unwrap_err()
                .contains("Input exceeds maximum size limit")
        );
    }

    #[test]
    fn test_download_defaults() {
        let d = download(None, None);
        assert_eq!(d.filename, "export.csv");
        assert_eq!(d.content_type, "text/csv;charset=utf-8");
        let d = download(Some("report.csv".into()), None);
        assert_eq!(d.filename, "report.csv");
    }
}
