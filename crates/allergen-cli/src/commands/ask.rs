use std::path::Path;

use allergen_core::{respond, NutritionFacts};

use super::fetch_product;
use crate::reader::Settings;

pub fn run_ask(
    settings: &Settings,
    question: &str,
    product: Option<&str>,
    response: Option<&Path>,
) -> Result<String, String> {
    let query = product.unwrap_or_default();
    let product = fetch_product(settings, query, response)?;
    let facts = NutritionFacts::from_product(&product);
    Ok(respond(question, Some(&facts)))
}
