//! Product records from the Open Food Facts API and the sources that supply them.
//!
//! Two response shapes are understood:
//! - product by barcode: `{ "status": 1, "product": { ... } }`
//! - search by name: `{ "products": [ { ... }, ... ] }` (first hit is used)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::types::{Product, ProductQuery};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to read product response {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed product response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("product request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("product service returned HTTP {0}")]
    Status(u16),
}

/// Anything that can resolve a barcode or product name to a product record.
pub trait ProductSource {
    /// `Ok(None)` means the source answered but knows no such product.
    fn fetch(&self, query: &ProductQuery) -> Result<Option<Product>, LookupError>;
}

#[derive(Deserialize)]
struct BarcodeResponse {
    #[serde(default)]
    status: i64,
    product: Option<Product>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Product>,
}

impl Product {
    /// Parse a product-by-barcode response. Anything but `status == 1` is "not found".
    pub fn from_barcode_response(json: &str) -> Result<Option<Product>, LookupError> {
        let response: BarcodeResponse = serde_json::from_str(json)?;
        if response.status != 1 {
            return Ok(None);
        }
        Ok(response.product)
    }

    /// Parse a search response, keeping the first product.
    pub fn from_search_response(json: &str) -> Result<Option<Product>, LookupError> {
        let response: SearchResponse = serde_json::from_str(json)?;
        Ok(response.products.into_iter().next())
    }

    /// Parse either response shape, picking by the presence of a `products` array.
    pub fn from_response(json: &str) -> Result<Option<Product>, LookupError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.get("products").is_some() {
            let response: SearchResponse = serde_json::from_value(value)?;
            Ok(response.products.into_iter().next())
        } else {
            let response: BarcodeResponse = serde_json::from_value(value)?;
            Ok((response.status == 1).then_some(response.product).flatten())
        }
    }

    pub fn has_ingredients(&self) -> bool {
        !self.ingredients_text.trim().is_empty()
    }
}

/// Serves a saved API response from disk, regardless of the query.
///
/// Useful offline and in tests; the query only feeds the log line.
pub struct FileProductSource {
    path: PathBuf,
}

impl FileProductSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProductSource for FileProductSource {
    fn fetch(&self, query: &ProductQuery) -> Result<Option<Product>, LookupError> {
        let content = fs::read_to_string(&self.path).map_err(|source| LookupError::Io {
            path: self.path.clone(),
            source,
        })?;
        let product = Product::from_response(&content)?;
        if let Some(ref p) = product {
            if !p.has_ingredients() {
                warn!(query = query.as_str(), code = %p.code, "product has no ingredient text");
            }
        }
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARCODE_FOUND: &str = r#"{
        "code": "3017620422003",
        "status": 1,
        "status_verbose": "product found",
        "product": {
            "code": "3017620422003",
            "product_name": "Nutella",
            "ingredients_text": "Sugar, palm oil, HAZELNUTS 13%, skimmed MILK powder 8.7%, fat-reduced cocoa 7.4%, emulsifier: lecithins (SOYA), vanillin",
            "nutriments": { "energy-kcal_100g": 539, "sugars_100g": 56.3 },
            "labels_tags": ["en:no-gluten"]
        }
    }"#;

    #[test]
    fn barcode_found() {
        let product = Product::from_barcode_response(BARCODE_FOUND)
            .unwrap()
            .unwrap();
        assert_eq!(product.code, "3017620422003");
        assert_eq!(product.name, "Nutella");
        assert!(product.ingredients_text.contains("HAZELNUTS"));
        assert!(product.has_ingredients());
    }

    #[test]
    fn barcode_not_found() {
        let json = r#"{"code": "000", "status": 0, "status_verbose": "product not found"}"#;
        assert!(Product::from_barcode_response(json).unwrap().is_none());
    }

    #[test]
    fn search_first_hit() {
        let json = r#"{"count": 2, "products": [
            {"code": "1", "product_name": "First"},
            {"code": "2", "product_name": "Second"}
        ]}"#;
        let product = Product::from_search_response(json).unwrap().unwrap();
        assert_eq!(product.name, "First");
        assert!(!product.has_ingredients());
    }

    #[test]
    fn search_hit_with_null_fields() {
        let json = r#"{"products": [
            {"code": "7", "product_name": "Crackers", "ingredients_text": "wheat flour",
             "nutriments": null, "labels_tags": null}
        ]}"#;
        let product = Product::from_search_response(json).unwrap().unwrap();
        assert_eq!(product.name, "Crackers");
        assert!(product.has_ingredients());
        assert!(product.nutriments.is_empty());
    }

    #[test]
    fn search_no_hits() {
        assert!(Product::from_search_response(r#"{"count": 0, "products": []}"#)
            .unwrap()
            .is_none());
    }

    #[test]
    fn response_shape_detection() {
        assert_eq!(
            Product::from_response(BARCODE_FOUND).unwrap().unwrap().name,
            "Nutella"
        );
        assert_eq!(
            Product::from_response(r#"{"products": [{"product_name": "Bar"}]}"#)
                .unwrap()
                .unwrap()
                .name,
            "Bar"
        );
        assert!(Product::from_response(r#"{"status": 0}"#)
            .unwrap()
            .is_none());
    }

    #[test]
    fn malformed_response() {
        assert!(matches!(
            Product::from_response("not json"),
            Err(LookupError::Malformed(_))
        ));
        assert!(matches!(
            Product::from_search_response(r#"{"products": "nope"}"#),
            Err(LookupError::Malformed(_))
        ));
    }

    #[test]
    fn file_source_missing_file() {
        let source = FileProductSource::new("no/such/response.json");
        let err = source
            .fetch(&ProductQuery::parse("3017620422003"))
            .unwrap_err();
        assert!(matches!(err, LookupError::Io { .. }));
    }

    #[test]
    fn file_source_reads_saved_response() {
        let path = std::env::temp_dir().join("allergen-core-product-source.json");
        fs::write(&path, BARCODE_FOUND).unwrap();
        let product = FileProductSource::new(&path)
            .fetch(&ProductQuery::parse("nutella"))
            .unwrap()
            .unwrap();
        assert_eq!(product.name, "Nutella");
        let _ = fs::remove_file(&path);
    }
}
