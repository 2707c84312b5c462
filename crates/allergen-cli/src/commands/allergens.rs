use crate::reader::Settings;

pub fn run_allergens(settings: &Settings, format: &str) -> Result<String, String> {
    let reference = settings.load_reference()?;

    if format == "json" {
        return serde_json::to_string_pretty(&reference)
            .map_err(|e| format!("JSON serialization error: {e}"));
    }

    let mut lines: Vec<String> = reference.names().map(str::to_string).collect();
    let count = reference.len();
    let word = if count == 1 { "allergen" } else { "allergens" };
    lines.push(format!("{count} {word} in {}.", settings.reference_path.display()));
    Ok(lines.join("\n"))
}
