use crate::lookup::SubstitutionLookup;
use crate::matcher::AllergenMatcher;
use crate::reference::ReferenceData;
use crate::types::Report;

const NO_SUBSTITUTES: &str = "no substitutes listed";

impl Report {
    /// Detect allergens in `text` and attach substitutes for each of them.
    pub fn build(reference: &ReferenceData, text: &str, threshold: u8) -> Self {
        let allergens = AllergenMatcher::new(reference).detect(text, threshold);
        let suggestions = SubstitutionLookup::new(reference).suggest(&allergens);
        Report {
            allergens,
            suggestions,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.allergens.is_empty()
    }

    /// Plain-text rendering for terminals and chat output.
    pub fn render(&self) -> String {
        if self.is_clean() {
            return "No common allergens detected!".to_string();
        }

        let names: Vec<&str> = self.allergens.iter().map(String::as_str).collect();
        let mut lines = vec![format!("Allergens detected: {}", names.join(", "))];

        if !self.suggestions.is_empty() {
            lines.push("Suggested alternatives:".to_string());
            for (allergen, subs) in &self.suggestions {
                let subs = if subs.is_empty() {
                    NO_SUBSTITUTES.to_string()
                } else {
                    subs.join(", ")
                };
                lines.push(format!("{} -> {}", capitalize(allergen), subs));
            }
        }

        lines.join("\n")
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
