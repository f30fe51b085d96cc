//! WASM bindings for quote and invoice intent parsing.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use devis_core::intent::{normalize, IntentParser};
use devis_core::models::client::Client;
use devis_core::models::config::DevisConfig;
use devis_core::models::document::{DocumentDraft, LineItem};

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

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read a client roster. `undefined` and `null` mean no known clients.
fn clients_from_js(clients: JsValue) -> Result<Vec<Client>, JsValue> {
    if clients.is_undefined() || clients.is_null() {
        return Ok(Vec::new());
    }

    serde_wasm_bindgen::from_value(clients).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse a user message against a list of clients.
///
/// Returns `{ documentType, clientMatch, projectTitle, hasDocumentType, hasClient }`.
#[wasm_bindgen]
pub fn parse_user_intent(message: &str, clients: JsValue) -> Result<JsValue, JsValue> {
    let clients = clients_from_js(clients)?;
    let intent = devis_core::parse_user_intent(message, &clients);
    to_js(&intent)
}

/// Detect "quote" or "invoice" in a message.
#[wasm_bindgen]
pub fn detect_document_type(text: &str) -> Option<String> {
    devis_core::detect_document_type(&normalize(text)).map(|t| t.as_str().to_string())
}

/// Extract the project title from a message.
#[wasm_bindgen]
pub fn extract_project_title(text: &str) -> Option<String> {
    devis_core::extract_project_title(&normalize(text))
}

/// Compute HT, VAT and TTC totals for an array of line items.
#[wasm_bindgen]
pub fn compute_totals(items: JsValue) -> Result<JsValue, JsValue> {
    let items: Vec<LineItem> =
        serde_wasm_bindgen::from_value(items).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let totals = devis_core::document::compute_totals(&items)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_js(&totals)
}

/// Today's date from the JS clock.
fn today() -> Result<NaiveDate, JsValue> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .ok_or_else(|| JsValue::from_str("Invalid system date"))
}

/// Intent parser class for browser use.
#[wasm_bindgen]
pub struct IntentParserJs {
    parser: IntentParser,
    config: DevisConfig,
}

#[wasm_bindgen]
impl IntentParserJs {
    /// Create a parser with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: IntentParser::new(),
            config: DevisConfig::default(),
        }
    }

    /// Create a parser from a JSON configuration string.
    #[wasm_bindgen]
    pub fn from_config(json: &str) -> Result<IntentParserJs, JsValue> {
        let config: DevisConfig =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        config
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            parser: IntentParser::from_config(&config.intent),
            config,
        })
    }

    /// Parse a message against a list of clients.
    #[wasm_bindgen]
    pub fn parse(&self, message: &str, clients: JsValue) -> Result<JsValue, JsValue> {
        let clients = clients_from_js(clients)?;
        let intent = self.parser.parse(message, &clients);

        if intent.is_empty() {
            web_sys::console::debug_1(&JsValue::from_str("devis: nothing recognised in message"));
        }

        to_js(&intent)
    }

    /// Seed a draft dated today from a message, with optional line items.
    #[wasm_bindgen]
    pub fn create_draft(
        &self,
        message: &str,
        clients: JsValue,
        sequence: u32,
        items: JsValue,
    ) -> Result<JsValue, JsValue> {
        let clients = clients_from_js(clients)?;
        let intent = self.parser.parse(message, &clients);

        let mut draft = DocumentDraft::from_intent(&intent, &self.config.documents, today()?, sequence)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        if !items.is_undefined() && !items.is_null() {
            let items: Vec<LineItem> = serde_wasm_bindgen::from_value(items)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            for item in items {
                draft
                    .add_line(item)
                    .map_err(|e| JsValue::from_str(&e.to_string()))?;
            }
        }

        to_js(&draft)
    }
}

impl Default for IntentParserJs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_detect_document_type() {
        assert_eq!(detect_document_type("Un DEVIS svp"), Some("quote".to_string()));
        assert_eq!(detect_document_type("Bonjour"), None);
    }

    #[wasm_bindgen_test]
    fn test_extract_project_title() {
        assert_eq!(
            extract_project_title("Projet: Villa SAINT-MARC"),
            Some("Villa saint-marc".to_string())
        );
    }

    #[wasm_bindgen_test]
    fn test_parse_with_roster() {
        let roster = to_js(&vec![Client::new("Jean", "Dupont").with_id("c1")]).unwrap();
        let result = parse_user_intent("facture pour Dupont", roster).unwrap();

        let has_client = js_sys::Reflect::get(&result, &JsValue::from_str("hasClient")).unwrap();
        assert_eq!(has_client.as_bool(), Some(true));
    }

    #[wasm_bindgen_test]
    fn test_parse_without_roster() {
        let result = parse_user_intent("Devis", JsValue::UNDEFINED).unwrap();

        let has_client = js_sys::Reflect::get(&result, &JsValue::from_str("hasClient")).unwrap();
        assert_eq!(has_client.as_bool(), Some(false));
    }

    #[wasm_bindgen_test]
    fn test_from_config_rejects_bad_bounds() {
        let json = r#"{"intent": {"title_min_len": 10, "title_max_len": 5}}"#;
        assert!(IntentParserJs::from_config(json).is_err());
        assert!(IntentParserJs::from_config("{}").is_ok());
    }
}
