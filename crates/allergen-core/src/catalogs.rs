/// Default similarity cutoff for the fuzzy path of allergen detection.
pub const DEFAULT_THRESHOLD: u8 = 80;

/// Default location of the allergen reference data, relative to the working directory.
pub const DEFAULT_REFERENCE_PATH: &str = "data/allergens_list.json";

/// Open Food Facts public API root.
pub const OPEN_FOOD_FACTS_URL: &str = "https://world.openfoodfacts.org";

/// Name reported for products whose record carries no `product_name`.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";

/// Per-100g nutriment keys as published by Open Food Facts.
pub mod nutriments {
    pub const ENERGY_KCAL: &str = "energy-kcal_100g";
    pub const FAT: &str = "fat_100g";
    pub const SATURATED_FAT: &str = "saturated-fat_100g";
    pub const CARBOHYDRATES: &str = "carbohydrates_100g";
    pub const SUGARS: &str = "sugars_100g";
    pub const FIBER: &str = "fiber_100g";
    pub const PROTEINS: &str = "proteins_100g";
    pub const SALT: &str = "salt_100g";
}

/// Label tags that mark a product as suitable for a diet.
pub const VEGAN_LABEL: &str = "vegan";
pub const VEGETARIAN_LABEL: &str = "vegetarian";
