//! WASM bindings for certificate and license OCR field extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! OCR runs on the JavaScript side; these bindings take its text lines.

use wasm_bindgen::prelude::*;

use certscan_core::extraction::keywords::KEYWORD_TABLE_VERSION;
use certscan_core::models::config::ExtractionConfig;
use certscan_core::{classify, CertificateExtractor, CertificateParser, ExtractionResult, OcrLines};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Version of the built-in keyword tables.
#[wasm_bindgen]
pub fn keyword_table_version() -> u32 {
    KEYWORD_TABLE_VERSION
}

/// Extract certificate fields from an array of OCR lines.
#[wasm_bindgen]
pub fn extract_certificate(lines: JsValue) -> Result<JsValue, JsValue> {
    let lines = lines_from_js(lines)?;
    let result = CertificateExtractor::new()
        .extract_lines(&lines)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_js(&result)
}

/// Extract certificate fields from text with one OCR line per line.
#[wasm_bindgen]
pub fn extract_certificate_from_text(text: &str) -> Result<JsValue, JsValue> {
    let result = CertificateExtractor::new()
        .parse_text(text)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_js(&result)
}

/// Classify OCR text: "toefl", "toeic", "ielts", "driver_license" or "unknown".
#[wasm_bindgen]
pub fn classify_document(text: &str) -> String {
    classify(&OcrLines::from_text(text)).to_string()
}

/// Certificate scanner class for browser use.
#[wasm_bindgen]
pub struct CertificateScanner {
    config: ExtractionConfig,
    include_raw_text: bool,
    log_warnings: bool,
}

#[wasm_bindgen]
impl CertificateScanner {
    /// Create a scanner with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
            include_raw_text: false,
            log_warnings: false,
        }
    }

    /// Number of trailing lines searched for dates.
    #[wasm_bindgen]
    pub fn set_trailing_window(&mut self, lines: usize) {
        self.config.trailing_window = lines.max(1);
    }

    /// Enable or disable expiry date derivation.
    #[wasm_bindgen]
    pub fn set_derive_expiry(&mut self, derive: bool) {
        self.config.derive_expiry = derive;
    }

    /// Months added to the issue date for a derived expiry date.
    #[wasm_bindgen]
    pub fn set_expiry_offset_months(&mut self, months: u32) {
        self.config.expiry_offset_months = months;
    }

    /// Minimum length of codes captured without a label.
    #[wasm_bindgen]
    pub fn set_min_code_length(&mut self, length: usize) {
        self.config.min_code_length = length.max(1);
    }

    /// Keep the joined OCR text in results.
    #[wasm_bindgen]
    pub fn set_include_raw_text(&mut self, include: bool) {
        self.include_raw_text = include;
    }

    /// Log extraction warnings to the browser console.
    #[wasm_bindgen]
    pub fn set_log_warnings(&mut self, log: bool) {
        self.log_warnings = log;
    }

    /// Extract certificate fields from an array of OCR lines.
    #[wasm_bindgen]
    pub fn extract(&self, lines: JsValue) -> Result<JsValue, JsValue> {
        let lines = lines_from_js(lines)?;
        self.finish(self.extractor().extract_lines(&lines))
    }

    /// Extract certificate fields from text with one OCR line per line.
    #[wasm_bindgen]
    pub fn extract_text(&self, text: &str) -> Result<JsValue, JsValue> {
        self.finish(self.extractor().parse_text(text))
    }

    fn extractor(&self) -> CertificateExtractor {
        CertificateExtractor::from_config(&self.config)
    }

    fn finish(
        &self,
        result: Result<ExtractionResult, certscan_core::ExtractionError>,
    ) -> Result<JsValue, JsValue> {
        let result = result.map_err(|e| JsValue::from_str(&e.to_string()))?;

        if self.log_warnings {
            for warning in result.warnings() {
                web_sys::console::warn_1(&JsValue::from_str(warning));
            }
        }

        if self.include_raw_text {
            to_js(&result)
        } else {
            to_js(&result.without_raw_text())
        }
    }
}

impl Default for CertificateScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn lines_from_js(lines: JsValue) -> Result<Vec<String>, JsValue> {
    if !js_sys::Array::is_array(&lines) {
        return Err(JsValue::from_str("expected an array of OCR lines"));
    }

    serde_wasm_bindgen::from_value(lines).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js(result: &ExtractionResult) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(result).map_err(|e| JsValue::from_str(&e.to_string()))
}
