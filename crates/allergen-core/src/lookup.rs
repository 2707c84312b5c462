use crate::reference::ReferenceData;
use crate::types::Suggestions;

/// Maps detected allergens back to their substitute ingredients.
pub struct SubstitutionLookup<'a> {
    reference: &'a ReferenceData,
}

impl<'a> SubstitutionLookup<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    /// Substitutes for every allergen that has a reference entry.
    /// Unknown allergens are skipped.
    pub fn suggest<I, S>(&self, allergens: I) -> Suggestions
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        allergens
            .into_iter()
            .filter_map(|allergen| {
                let allergen = allergen.as_ref();
                self.reference
                    .substitutes(allergen)
                    .map(|subs| (allergen.to_string(), subs.to_vec()))
            })
            .collect()
    }
}

pub fn suggest<I, S>(reference: &ReferenceData, allergens: I) -> Suggestions
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    SubstitutionLookup::new(reference).suggest(allergens)
}
