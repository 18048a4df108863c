use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope returned by the OpenFoodFacts product endpoint.
#[derive(Debug, Deserialize)]
pub struct OpenFoodFactsResponse {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub product: Option<Value>,
}

impl OpenFoodFactsResponse {
    /// Only a numeric status of 1 means found; anything else is a miss.
    pub fn is_found(&self) -> bool {
        self.status.as_ref().and_then(Value::as_i64) == Some(1)
    }
}

/// Upstream product payload, kept loosely typed.
///
/// Fields that are missing, `null` or of an unexpected JSON type read as
/// absent.
#[derive(Debug, Clone, Default)]
pub struct RawProduct(pub Value);

impl RawProduct {
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// String entries of an array field; non-string entries are ignored.
    pub fn tags(&self, key: &str) -> Vec<&str> {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

impl From<Value> for RawProduct {
    fn from(value: Value) -> Self {
        RawProduct(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VegStatus {
    Vegan,
    Vegetarian,
    #[serde(rename = "Non-Vegetarian")]
    NonVegetarian,
    Unknown,
}

/// Simplified product view served by `/api/scan/{barcode}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub name: String,
    pub image_url: String,
    pub categories: Vec<String>,
    pub veg_status: VegStatus,
    pub allergens: Vec<String>,
    pub additives: Vec<String>,
    pub nutriscore: String,
}
