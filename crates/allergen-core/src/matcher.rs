//! Allergen detection over free-form ingredient text.
//!
//! For each allergen in the reference data:
//! 1. a literal occurrence in the lowercased text is an immediate match;
//! 2. otherwise every whitespace token is scored with [`partial_ratio`] and
//!    the first token scoring strictly above the threshold is a match.
//!
//! Multi-word allergen names are compared against single tokens only; no
//! multi-token windows are built.

use tracing::{debug, trace};

use crate::fuzz::partial_ratio;
use crate::reference::ReferenceData;
use crate::types::DetectedAllergens;

pub struct AllergenMatcher<'a> {
    reference: &'a ReferenceData,
}

impl<'a> AllergenMatcher<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    /// Detect allergens in `text`. `threshold` is a 0–100 similarity cutoff
    /// applied with a strict `>`; values above 100 disable the fuzzy path.
    pub fn detect(&self, text: &str, threshold: u8) -> DetectedAllergens {
        let mut detected = DetectedAllergens::new();
        let normalized = text.to_lowercase();
        if normalized.is_empty() {
            return detected;
        }

        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        let cutoff = f64::from(threshold);

        for allergen in self.reference.names() {
            if normalized.contains(allergen) {
                trace!(allergen, "exact match");
                detected.insert(allergen.to_string());
                continue;
            }

            let hit = tokens.iter().find_map(|token| {
                let score = partial_ratio(allergen, token);
                (score > cutoff).then_some((*token, score))
            });
            if let Some((token, score)) = hit {
                trace!(allergen, token, score, "fuzzy match");
                detected.insert(allergen.to_string());
            }
        }

        debug!(
            tokens = tokens.len(),
            threshold,
            detected = detected.len(),
            "allergen detection finished"
        );
        detected
    }
}

/// Convenience wrapper around [`AllergenMatcher::detect`].
pub fn detect(reference: &ReferenceData, text: &str, threshold: u8) -> DetectedAllergens {
    AllergenMatcher::new(reference).detect(text, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogs::DEFAULT_THRESHOLD;

    fn reference() -> ReferenceData {
        ReferenceData::from_entries([
            ("milk", vec!["oat milk", "almond milk"]),
            ("peanut", vec!["sunflower seed butter"]),
        ])
        .unwrap()
    }

    fn set(items: &[&str]) -> DetectedAllergens {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_match_case_insensitive() {
        let r = reference();
        assert_eq!(detect(&r, "Contains: Milk, Sugar, Salt", DEFAULT_THRESHOLD), set(&["milk"]));
    }

    #[test]
    fn misspelled_token_contains_allergen() {
        let r = reference();
        assert_eq!(detect(&r, "Contains: Peanutt, Sugar", DEFAULT_THRESHOLD), set(&["peanut"]));
    }

    #[test]
    fn fuzzy_match_on_substituted_char() {
        let r = reference();
        // partial_ratio("peanut", "peamut") ≈ 83.3
        assert_eq!(detect(&r, "roasted peamut oil", 80), set(&["peanut"]));
        assert_eq!(detect(&r, "roasted peamut oil", 84), set(&[]));
    }

    #[test]
    fn threshold_is_strict() {
        let r = ReferenceData::from_entries([("wheat", Vec::<String>::new())]).unwrap();
        // partial_ratio("wheat", "wh3at") == 80
        assert!(detect(&r, "wh3at flour", 80).is_empty());
        assert_eq!(detect(&r, "wh3at flour", 79), set(&["wheat"]));
    }

    #[test]
    fn exact_match_ignores_threshold() {
        let r = reference();
        assert_eq!(detect(&r, "skimmed milk powder", 100), set(&["milk"]));
        assert_eq!(detect(&r, "skimmed milk powder", u8::MAX), set(&["milk"]));
    }

    #[test]
    fn empty_and_blank_text() {
        let r = reference();
        assert!(detect(&r, "", 0).is_empty());
        assert!(detect(&r, "", DEFAULT_THRESHOLD).is_empty());
        assert!(detect(&r, "   \n\t ", DEFAULT_THRESHOLD).is_empty());
    }

    #[test]
    fn no_allergens() {
        let r = reference();
        assert!(detect(&r, "water, rice, vinegar", DEFAULT_THRESHOLD).is_empty());
    }

    #[test]
    fn multi_word_allergen_exact() {
        let r = ReferenceData::from_entries([("tree nut", vec!["seeds"])]).unwrap();
        assert_eq!(detect(&r, "May contain TREE NUT traces", 80), set(&["tree nut"]));
    }

    #[test]
    fn multi_word_allergen_split_across_lines() {
        let r = ReferenceData::from_entries([("tree nut", vec!["seeds"])]).unwrap();
        // No literal "tree nut", but the token "tree" aligns inside the name.
        assert_eq!(detect(&r, "tree\nnut", 80), set(&["tree nut"]));
    }

    #[test]
    fn matcher_reusable() {
        let r = reference();
        let matcher = AllergenMatcher::new(&r);
        let first = matcher.detect("milk and peanuts", 80);
        let second = matcher.detect("milk and peanuts", 80);
        assert_eq!(first, second);
        assert_eq!(first, set(&["milk", "peanut"]));
    }
}
