use std::path::Path;

use allergen_core::{NutritionFacts, Report};

use super::fetch_product;
use crate::reader::Settings;

pub fn run_lookup(
    settings: &Settings,
    query: &str,
    response: Option<&Path>,
    format: &str,
) -> Result<String, String> {
    let reference = settings.load_reference()?;
    let product = fetch_product(settings, query, response)?;

    let report = Report::build(&reference, &product.ingredients_text, settings.threshold);
    let facts = NutritionFacts::from_product(&product);

    if format == "json" {
        let output = serde_json::json!({
            "product": {
                "code": product.code,
                "name": product.name,
                "ingredients_text": product.ingredients_text,
            },
            "report": report,
            "nutrition": facts,
        });
        return serde_json::to_string_pretty(&output)
            .map_err(|e| format!("JSON serialization error: {e}"));
    }

    let mut lines = vec![format!("Found: {} ({})", product.name, product.code)];
    if product.has_ingredients() {
        lines.push(format!("Ingredients: {}", product.ingredients_text.trim()));
    } else {
        lines.push("Ingredients: No ingredients available.".to_string());
    }
    lines.push(report.render());
    lines.push(render_facts(&facts));

    Ok(lines.join("\n"))
}

fn render_facts(facts: &NutritionFacts) -> String {
    let rows = [
        ("Energy", facts.energy_kcal, "kcal"),
        ("Fat", facts.fat, "g"),
        ("Saturated fat", facts.saturated_fat, "g"),
        ("Carbohydrates", facts.carbohydrates, "g"),
        ("Sugars", facts.sugars, "g"),
        ("Fiber", facts.fiber, "g"),
        ("Proteins", facts.proteins, "g"),
        ("Salt", facts.salt, "g"),
    ];

    let present: Vec<String> = rows
        .iter()
        .filter_map(|(label, value, unit)| value.map(|v| format!("  {label}: {v} {unit}")))
        .collect();

    if present.is_empty() {
        return "No nutrition data available.".to_string();
    }

    let mut lines = vec!["Nutrition facts (per 100g):".to_string()];
    lines.extend(present);
    lines.join("\n")
}
