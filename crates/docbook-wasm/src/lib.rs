use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct BridgeOptions {
    palette: Option<Vec<String>>,
    sanitize: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompileResult {
    html: String,
    diagnostics: Vec<docbook_core::Diagnostic>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderResult {
    html: String,
}

#[wasm_bindgen]
pub fn compile_markup(source: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let options = options_from_js(options)?;
    let compile_options = docbook_core::CompileOptions {
        palette: palette_or_default(&options),
    };
    let result = docbook_core::compile_with_options(source, &compile_options);
    let out = CompileResult {
        html: finish(result.html, &options),
        diagnostics: result.diagnostics,
    };
    serde_wasm_bindgen::to_value(&out).map_err(|err| JsValue::from_str(&err.to_string()))
}

#[wasm_bindgen]
pub fn render_document(json: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let options = options_from_js(options)?;
    let document =
        docbook_core::Document::from_json(json).map_err(|err| JsValue::from_str(&err.to_string()))?;
    let render_options = docbook_core::RenderOptions {
        palette: palette_or_default(&options),
    };
    let html = docbook_core::render_document(&document, &render_options);
    let out = RenderResult {
        html: finish(html, &options),
    };
    serde_wasm_bindgen::to_value(&out).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn options_from_js(value: JsValue) -> Result<BridgeOptions, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(BridgeOptions::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn palette_or_default(options: &BridgeOptions) -> Vec<String> {
    options
        .palette
        .clone()
        .unwrap_or_else(docbook_core::default_palette)
}

fn finish(html: String, options: &BridgeOptions) -> String {
    if options.sanitize.unwrap_or(false) {
        docbook_core::sanitize_html(&html)
    } else {
        html
    }
}
