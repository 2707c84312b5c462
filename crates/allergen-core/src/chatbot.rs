//! Keyword-driven answers to nutrition questions about a single product.

use serde::{Deserialize, Serialize};

use crate::types::NutritionFacts;

const NO_DATA: &str = "I don't have data for that product yet.";
const FALLBACK: &str = "I can answer questions about calories, sugar, fat, protein, fiber, salt, carbs, and vegan/vegetarian info.";

/// Answer `query` from `facts`. The first matching keyword rule wins.
pub fn respond(query: &str, facts: Option<&NutritionFacts>) -> String {
    let Some(facts) = facts else {
        return NO_DATA.to_string();
    };

    let q = query.to_lowercase();
    let has = |kw: &str| q.contains(kw);

    if has("calorie") || has("energy") {
        format!(
            "{} has about {} kcal per 100g.",
            facts.name,
            amount(facts.energy_kcal)
        )
    } else if has("sugar") {
        format!("It contains around {} g of sugar per 100g.", amount(facts.sugars))
    } else if has("fat") && has("saturated") {
        format!("Saturated fat: {} g per 100g.", amount(facts.saturated_fat))
    } else if has("fat") {
        format!("Total fat: {} g per 100g.", amount(facts.fat))
    } else if has("protein") {
        format!("Protein content: {} g per 100g.", amount(facts.proteins))
    } else if has("fiber") || has("fibre") {
        format!("Fiber content: {} g per 100g.", amount(facts.fiber))
    } else if has("salt") || has("sodium") {
        format!("Salt content: {} g per 100g.", amount(facts.salt))
    } else if has("carb") {
        format!("Carbohydrates: {} g per 100g.", amount(facts.carbohydrates))
    } else if has("vegan") {
        if facts.vegan {
            "Yes, it's vegan!".to_string()
        } else {
            "No, it's not vegan.".to_string()
        }
    } else if has("vegetarian") {
        if facts.vegetarian {
            "Yes, it's vegetarian!".to_string()
        } else {
            "No, it's not vegetarian.".to_string()
        }
    } else {
        FALLBACK.to_string()
    }
}

fn amount(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => "N/A".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub user: String,
    pub bot: String,
}

/// A question/answer session about one product.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    facts: Option<NutritionFacts>,
    history: Vec<Exchange>,
}

impl Conversation {
    pub fn new(facts: Option<NutritionFacts>) -> Self {
        Self {
            facts,
            history: Vec::new(),
        }
    }

    /// Answer a question and record it in the history.
    pub fn ask(&mut self, query: &str) -> &str {
        let bot = respond(query, self.facts.as_ref());
        self.history.push(Exchange {
            user: query.to_string(),
            bot,
        });
        &self.history[self.history.len() - 1].bot
    }

    pub fn history(&self) -> &[Exchange] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn facts() -> NutritionFacts {
        NutritionFacts {
            name: "Nutella".into(),
            energy_kcal: Some(539.0),
            fat: Some(30.9),
            saturated_fat: Some(10.6),
            carbohydrates: Some(57.5),
            sugars: Some(56.3),
            fiber: None,
            proteins: Some(6.3),
            salt: Some(0.107),
            vegan: false,
            vegetarian: true,
        }
    }

    #[test]
    fn no_data() {
        assert_eq!(respond("how much sugar?", None), NO_DATA);
    }

    #[test]
    fn keyword_routing() {
        let f = facts();
        let ask = |q: &str| respond(q, Some(&f));
        assert_eq!(ask("How many CALORIES?"), "Nutella has about 539 kcal per 100g.");
        assert_eq!(ask("energy?"), "Nutella has about 539 kcal per 100g.");
        assert_eq!(ask("sugar"), "It contains around 56.3 g of sugar per 100g.");
        assert_eq!(ask("saturated fat?"), "Saturated fat: 10.6 g per 100g.");
        assert_eq!(ask("how much fat"), "Total fat: 30.9 g per 100g.");
        assert_eq!(ask("protein"), "Protein content: 6.3 g per 100g.");
        assert_eq!(ask("sodium level"), "Salt content: 0.107 g per 100g.");
        assert_eq!(ask("carbs?"), "Carbohydrates: 57.5 g per 100g.");
        assert_eq!(ask("is it vegan"), "No, it's not vegan.");
        assert_eq!(ask("is it vegetarian"), "Yes, it's vegetarian!");
        assert_eq!(ask("what about the weather"), FALLBACK);
    }

    #[test]
    fn missing_value_is_na() {
        let f = facts();
        assert_eq!(respond("fibre?", Some(&f)), "Fiber content: N/A g per 100g.");
    }

    #[test]
    fn first_rule_wins() {
        let f = facts();
        // "sugar" is checked before "fat".
        assert_eq!(
            respond("sugar and fat", Some(&f)),
            "It contains around 56.3 g of sugar per 100g."
        );
    }

    #[test]
    fn conversation_history() {
        let mut chat = Conversation::new(Some(facts()));
        assert_eq!(chat.ask("protein?"), "Protein content: 6.3 g per 100g.");
        chat.ask("vegan?");
        assert_eq!(chat.history().len(), 2);
        assert_eq!(chat.history()[1].user, "vegan?");
        assert_eq!(chat.history()[1].bot, "No, it's not vegan.");
    }
}
