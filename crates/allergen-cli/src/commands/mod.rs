pub mod allergens;
pub mod ask;
pub mod detect;
pub mod lookup;
pub mod suggest;

use std::path::Path;

use allergen_core::{FileProductSource, Product, ProductQuery, ProductSource};

use crate::off_client::OpenFoodFactsClient;
use crate::reader::Settings;

/// Resolve a product from a saved response file, or from Open Food Facts.
pub fn fetch_product(
    settings: &Settings,
    query: &str,
    response: Option<&Path>,
) -> Result<Product, String> {
    let query = ProductQuery::parse(query);
    let source: Box<dyn ProductSource> = match response {
        Some(path) => Box::new(FileProductSource::new(path)),
        None => Box::new(
            OpenFoodFactsClient::new(&settings.api_base_url, &settings.user_agent)
                .map_err(|e| e.to_string())?,
        ),
    };

    source
        .fetch(&query)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "No product found.".to_string())
}
