use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::catalogs::{nutriments, UNKNOWN_PRODUCT_NAME, VEGAN_LABEL, VEGETARIAN_LABEL};

// ---------------------------------------------------------------------------
// Detection output
// ---------------------------------------------------------------------------

/// Allergen names found in a block of ingredient text.
pub type DetectedAllergens = BTreeSet<String>;

/// Substitute ingredients per detected allergen.
pub type Suggestions = BTreeMap<String, Vec<String>>;

/// Detection and suggestion results bundled for the display layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub allergens: DetectedAllergens,
    pub suggestions: Suggestions,
}

// ---------------------------------------------------------------------------
// Product records (Open Food Facts shape)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub code: String,
    #[serde(
        rename = "product_name",
        default = "unknown_product_name",
        deserialize_with = "deserialize_product_name"
    )]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub ingredients_text: String,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub nutriments: BTreeMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub labels_tags: Vec<String>,
}

fn unknown_product_name() -> String {
    UNKNOWN_PRODUCT_NAME.to_string()
}

fn deserialize_product_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(unknown_product_name))
}

/// `null` reads as the field's default.
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// How a user-supplied query addresses a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ProductQuery {
    Barcode(String),
    Name(String),
}

impl ProductQuery {
    /// A query made only of ASCII digits is a barcode, anything else a name search.
    pub fn parse(query: &str) -> Self {
        let query = query.trim();
        if !query.is_empty() && query.bytes().all(|b| b.is_ascii_digit()) {
            ProductQuery::Barcode(query.to_string())
        } else {
            ProductQuery::Name(query.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProductQuery::Barcode(s) | ProductQuery::Name(s) => s,
        }
    }
}

// ---------------------------------------------------------------------------
// Nutrition facts (per 100g)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_kcal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proteins: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salt: Option<f64>,
    pub vegan: bool,
    pub vegetarian: bool,
}

impl NutritionFacts {
    pub fn from_product(product: &Product) -> Self {
        let get = |key: &str| product.nutriments.get(key).and_then(nutriment_value);
        Self {
            name: product.name.clone(),
            energy_kcal: get(nutriments::ENERGY_KCAL),
            fat: get(nutriments::FAT),
            saturated_fat: get(nutriments::SATURATED_FAT),
            carbohydrates: get(nutriments::CARBOHYDRATES),
            sugars: get(nutriments::SUGARS),
            fiber: get(nutriments::FIBER),
            proteins: get(nutriments::PROTEINS),
            salt: get(nutriments::SALT),
            vegan: has_label(&product.labels_tags, VEGAN_LABEL),
            vegetarian: has_label(&product.labels_tags, VEGETARIAN_LABEL),
        }
    }
}

/// Nutriments arrive either as JSON numbers or as numeric strings.
fn nutriment_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Matches both bare tags (`vegan`) and language-prefixed ones (`en:vegan`).
fn has_label(tags: &[String], label: &str) -> bool {
    tags.iter().any(|tag| {
        tag == label
            || tag
                .split_once(':')
                .is_some_and(|(_, bare)| bare == label)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(nutriments: serde_json::Value, labels: &[&str]) -> Product {
        Product {
            code: "0001".into(),
            name: "Test Bar".into(),
            ingredients_text: String::new(),
            nutriments: serde_json::from_value(nutriments).unwrap(),
            labels_tags: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn query_digits_is_barcode() {
        assert_eq!(
            ProductQuery::parse("3017620422003"),
            ProductQuery::Barcode("3017620422003".into())
        );
        assert_eq!(
            ProductQuery::parse(" 12345 "),
            ProductQuery::Barcode("12345".into())
        );
    }

    #[test]
    fn query_text_is_name() {
        assert_eq!(ProductQuery::parse("nutella"), ProductQuery::Name("nutella".into()));
        assert_eq!(ProductQuery::parse("7up"), ProductQuery::Name("7up".into()));
        assert_eq!(ProductQuery::parse(""), ProductQuery::Name(String::new()));
    }

    #[test]
    fn facts_read_numbers_and_numeric_strings() {
        let p = product(
            json!({ "energy-kcal_100g": 539, "sugars_100g": "56.3", "fat_100g": "n/a" }),
            &[],
        );
        let facts = NutritionFacts::from_product(&p);
        assert_eq!(facts.name, "Test Bar");
        assert_eq!(facts.energy_kcal, Some(539.0));
        assert_eq!(facts.sugars, Some(56.3));
        assert_eq!(facts.fat, None);
        assert_eq!(facts.proteins, None);
    }

    #[test]
    fn facts_labels() {
        let p = product(json!({}), &["en:vegan", "en:organic"]);
        let facts = NutritionFacts::from_product(&p);
        assert!(facts.vegan);
        assert!(!facts.vegetarian);

        let p = product(json!({}), &["vegetarian"]);
        let facts = NutritionFacts::from_product(&p);
        assert!(!facts.vegan);
        assert!(facts.vegetarian);
    }

    #[test]
    fn product_defaults_when_fields_missing() {
        let p: Product = serde_json::from_value(json!({ "code": "42" })).unwrap();
        assert_eq!(p.name, UNKNOWN_PRODUCT_NAME);
        assert!(p.ingredients_text.is_empty());
        assert!(p.nutriments.is_empty());
        assert!(p.labels_tags.is_empty());
    }

    #[test]
    fn product_null_fields() {
        let p: Product = serde_json::from_value(json!({
            "code": "42",
            "product_name": "",
            "ingredients_text": null
        }))
        .unwrap();
        assert_eq!(p.name, UNKNOWN_PRODUCT_NAME);
        assert_eq!(p.ingredients_text, "");
    }

    #[test]
    fn product_null_nutriments_and_labels() {
        let p: Product = serde_json::from_str(
            r#"{"code":"1","product_name":"X","ingredients_text":"milk","labels_tags":null,"nutriments":null}"#,
        )
        .unwrap();
        assert_eq!(p.name, "X");
        assert_eq!(p.ingredients_text, "milk");
        assert!(p.nutriments.is_empty());
        assert!(p.labels_tags.is_empty());

        let facts = NutritionFacts::from_product(&p);
        assert_eq!(facts.energy_kcal, None);
        assert!(!facts.vegan);
    }
}
