//! FFI-oriented JSON API for cross-language bindings.
//!
//! All functions take string inputs and return JSON strings,
//! minimizing the FFI surface area.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::catalogs::DEFAULT_THRESHOLD;
use crate::chatbot::respond;
use crate::lookup::suggest;
use crate::matcher::detect;
use crate::reference::ReferenceData;
use crate::types::{NutritionFacts, Product, Report};

// ---------------------------------------------------------------------------
// Options types (deserialized from JSON input)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct DetectOptions {
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    /// Include substitutes for the detected allergens in the result.
    #[serde(default)]
    pub suggest: bool,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            suggest: false,
        }
    }
}

fn default_threshold() -> u8 {
    DEFAULT_THRESHOLD
}

// ---------------------------------------------------------------------------
// Result types (serialized to JSON output)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct FfiResult<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn success<T: Serialize>(data: T) -> String {
    serde_json::to_string(&FfiResult {
        success: true,
        data: Some(data),
        error: None,
    })
    .unwrap_or_else(|e| failure(format!("JSON serialization error: {e}")))
}

fn failure(message: String) -> String {
    // A map with a bool and a string cannot fail to serialize.
    serde_json::json!({ "success": false, "error": message }).to_string()
}

fn load_reference(reference_json: &str) -> Result<ReferenceData, String> {
    ReferenceData::from_json(reference_json).map_err(|e| format!("Invalid reference data: {e}"))
}

fn guarded<T: Serialize>(f: impl FnOnce() -> T) -> String {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(data) => success(data),
        Err(_) => failure("Internal matcher panic".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Public FFI functions
// ---------------------------------------------------------------------------

/// Detect allergens in ingredient text.
///
/// Input: ingredient text, reference data JSON, options JSON `{ threshold?: number, suggest?: boolean }`
/// Output: `{ success, data: { allergens: [...], suggestions: {...} } }`
pub fn detect_to_json(text: &str, reference_json: &str, options_json: &str) -> String {
    let opts: DetectOptions = if options_json.trim().is_empty() {
        DetectOptions::default()
    } else {
        match serde_json::from_str(options_json) {
            Ok(o) => o,
            Err(e) => return failure(format!("Invalid options JSON: {e}")),
        }
    };
    let reference = match load_reference(reference_json) {
        Ok(r) => r,
        Err(e) => return failure(e),
    };

    guarded(|| {
        if opts.suggest {
            Report::build(&reference, text, opts.threshold)
        } else {
            Report {
                allergens: detect(&reference, text, opts.threshold),
                ..Report::default()
            }
        }
    })
}

/// Look up substitutes for allergens.
///
/// Input: JSON array of allergen names, reference data JSON
/// Output: `{ success, data: { "<allergen>": ["<substitute>", ...] } }`
pub fn suggest_to_json(allergens_json: &str, reference_json: &str) -> String {
    let allergens: Vec<String> = match serde_json::from_str(allergens_json) {
        Ok(a) => a,
        Err(e) => return failure(format!("Invalid allergens JSON: {e}")),
    };
    let reference = match load_reference(reference_json) {
        Ok(r) => r,
        Err(e) => return failure(e),
    };

    guarded(|| suggest(&reference, &allergens))
}

/// Answer a nutrition question about a product record.
///
/// Input: question text, product JSON (Open Food Facts product object), or `null`
/// Output: `{ success, data: "<answer>" }`
pub fn answer_to_json(query: &str, product_json: &str) -> String {
    let product: Option<Product> = match serde_json::from_str(product_json) {
        Ok(p) => p,
        Err(e) => return failure(format!("Invalid product JSON: {e}")),
    };

    guarded(|| {
        let facts = product.as_ref().map(NutritionFacts::from_product);
        respond(query, facts.as_ref())
    })
}
