use crate::additives::AdditiveTable;
use crate::models::{RawProduct, ScanResult, VegStatus};

const MAX_CATEGORIES: usize = 5;

/// Builds the simplified scan view from an upstream product record.
///
/// Never fails: every missing field falls back to a default.
pub fn normalize(product: &RawProduct, additives: &AdditiveTable) -> ScanResult {
    let name = product
        .str_field("product_name")
        .unwrap_or("Unknown Product")
        .to_string();

    let image_url = product.str_field("image_url").unwrap_or_default().to_string();

    let categories = product
        .str_field("categories")
        .unwrap_or("Unknown Category")
        .split(',')
        .take(MAX_CATEGORIES)
        .map(|c| c.trim().to_string())
        .collect();

    let veg_status = veg_status(&product.tags("ingredients_analysis_tags"));

    let allergens = product
        .tags("allergens_tags")
        .into_iter()
        .map(allergen_name)
        .collect();

    let additives = product
        .tags("additives_tags")
        .into_iter()
        .map(|tag| additives.describe(tag))
        .collect();

    let nutriscore = product
        .str_field("nutriscore_grade")
        .unwrap_or("unknown")
        .to_uppercase();

    ScanResult {
        name,
        image_url,
        categories,
        veg_status,
        allergens,
        additives,
        nutriscore,
    }
}

fn veg_status(tags: &[&str]) -> VegStatus {
    let has = |tag: &str| tags.contains(&tag);

    if has("en:vegan") {
        VegStatus::Vegan
    } else if has("en:vegetarian") {
        VegStatus::Vegetarian
    } else if has("en:non-vegetarian") {
        VegStatus::NonVegetarian
    } else {
        VegStatus::Unknown
    }
}

// "en:milk-products" -> "Milk Products"
fn allergen_name(tag: &str) -> String {
    let tag = tag.strip_prefix("en:").unwrap_or(tag);
    title_case(&tag.replace('-', " "))
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;

    for ch in s.chars() {
        if ch.is_alphabetic() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(ch);
            word_start = true;
        }
    }

    out
}
