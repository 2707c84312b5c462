use allergen_core::SubstitutionLookup;

use crate::reader::Settings;

pub fn run_suggest(settings: &Settings, allergens: &[String], format: &str) -> Result<String, String> {
    let reference = settings.load_reference()?;

    let requested: Vec<String> = allergens.iter().map(|a| a.trim().to_lowercase()).collect();
    let suggestions = SubstitutionLookup::new(&reference).suggest(&requested);

    if format == "json" {
        return serde_json::to_string_pretty(&suggestions)
            .map_err(|e| format!("JSON serialization error: {e}"));
    }

    let mut lines: Vec<String> = suggestions
        .iter()
        .map(|(allergen, subs)| {
            if subs.is_empty() {
                format!("{allergen}: no substitutes listed")
            } else {
                format!("{allergen}: {}", subs.join(", "))
            }
        })
        .collect();

    let unknown: Vec<&str> = requested
        .iter()
        .filter(|a| !suggestions.contains_key(a.as_str()))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        lines.push(format!("Unknown allergens: {}", unknown.join(", ")));
    }

    Ok(lines.join("\n"))
}
