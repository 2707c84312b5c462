//! Allergen checker WASM bindings.
//!
//! Provides JavaScript-callable functions via wasm-bindgen.
//! All functions take string inputs and return JSON strings.

use allergen_core::{answer_to_json, detect_to_json, suggest_to_json};
use wasm_bindgen::prelude::*;

/// Detect allergens in ingredient text.
///
/// @param text - Ingredient text, e.g. from a label or OCR
/// @param reference_json - JSON object mapping allergen names to substitute arrays
/// @param options_json - JSON options `{ threshold?: number, suggest?: boolean }`, or ""
/// @returns JSON string with `{ success: boolean, data?: Report, error?: string }`
#[wasm_bindgen(js_name = "detect")]
pub fn wasm_detect(text: &str, reference_json: &str, options_json: &str) -> String {
    detect_to_json(text, reference_json, options_json)
}

/// Look up substitutes for detected allergens.
///
/// @param allergens_json - JSON array of allergen names
/// @param reference_json - JSON object mapping allergen names to substitute arrays
/// @returns JSON string with `{ success: boolean, data?: Suggestions, error?: string }`
#[wasm_bindgen(js_name = "suggest")]
pub fn wasm_suggest(allergens_json: &str, reference_json: &str) -> String {
    suggest_to_json(allergens_json, reference_json)
}

/// Answer a nutrition question about a product.
///
/// @param query - Question text
/// @param product_json - Open Food Facts product object, or `null`
/// @returns JSON string with `{ success: boolean, data?: string, error?: string }`
#[wasm_bindgen(js_name = "answer")]
pub fn wasm_answer(query: &str, product_json: &str) -> String {
    answer_to_json(query, product_json)
}
