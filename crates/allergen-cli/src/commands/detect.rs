use allergen_core::Report;
use tracing::warn;

use crate::reader::Settings;

pub fn run_detect(settings: &Settings, text: &str, format: &str) -> Result<String, String> {
    let reference = settings.load_reference()?;

    if text.trim().is_empty() {
        warn!("ingredient text is empty");
    }

    let report = Report::build(&reference, text, settings.threshold);
    render_report(&report, format)
}

pub fn render_report(report: &Report, format: &str) -> Result<String, String> {
    match format {
        "json" => serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization error: {e}")),
        _ => Ok(report.render()),
    }
}
