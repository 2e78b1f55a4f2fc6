//! Domain product records and the envelope the search tool answers with.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SearchError;

/// One search hit as returned by the backend: the record payload plus the backend's own keys
pub type RawHit = Map<String, Value>;

/// Backend-assigned identifier key on every hit
pub const OBJECT_ID: &str = "objectID";

/// Accepts both a single string and an array of strings, e.g. `"size": "M"` or `"size": ["M", "L"]`
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where D: serde::Deserializer<'de> {
    use serde::de;

    struct StringOrVec;

    impl<'de> de::Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result { formatter.write_str("a string, an array of strings, or null") }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> { Ok(Vec::new()) }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> { Ok(Vec::new()) }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> { Ok(vec![v.to_string()]) }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut values = Vec::new();
            while let Some(value) = seq.next_element::<String>()? {
                values.push(value);
            }
            Ok(values)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// A catalog listing. `name` and `price` are required; the well-known optional attributes are
/// typed and anything else on the record is carried in `attributes` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_vec", skip_serializing_if = "Vec::is_empty")]
    pub size: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Value shape each typed optional attribute accepts
#[derive(Clone, Copy)]
enum Shape {
    Text,
    Number,
    TextList,
    /// A string, or an array of strings and numbers
    Sizes,
    Any,
}

const OPTIONAL_ATTRIBUTES: &[(&str, Shape)] = &[
    ("description", Shape::Text),
    ("category", Shape::Text),
    ("subCategory", Shape::Text),
    ("size", Shape::Sizes),
    ("gender", Shape::Text),
    ("condition", Shape::Text),
    ("currency", Shape::Text),
    ("status", Shape::Text),
    ("discountPercentage", Shape::Number),
    ("images", Shape::TextList),
    ("sellerId", Shape::Text),
    ("createdAt", Shape::Any),
];

/// Fit the typed optional attributes to their shapes. `null` is dropped, numeric sizes become
/// strings, and anything else that does not fit is returned to be carried untouched.
fn conform_optional(hit: &mut RawHit) -> Map<String, Value> {
    let mut untyped = Map::new();
    for (key, shape) in OPTIONAL_ATTRIBUTES {
        let Some(value) = hit.remove(*key) else { continue };
        let conformed = match (shape, value) {
            (_, Value::Null) => continue,
            (Shape::Any, value) => Ok(value),
            (Shape::Text, value @ Value::String(_)) | (Shape::Number, value @ Value::Number(_)) => Ok(value),
            (Shape::TextList, Value::Array(items)) if items.iter().all(Value::is_string) => Ok(Value::Array(items)),
            (Shape::Sizes, value @ Value::String(_)) => Ok(value),
            (Shape::Sizes, Value::Array(items)) if items.iter().all(|item| item.is_string() || item.is_number()) => Ok(Value::Array(
                items.into_iter().map(|item| if let Value::Number(n) = item { Value::String(n.to_string()) } else { item }).collect(),
            )),
            (_, value) => Err(value),
        };
        match conformed {
            Ok(value) => {
                hit.insert(key.to_string(), value);
            }
            Err(value) => {
                untyped.insert(key.to_string(), value);
            }
        }
    }
    untyped
}

impl Product {
    /// Map a raw hit into a product, failing closed when the hit lacks the backend identifier
    /// or a required attribute. Optional attributes of an unexpected type are kept verbatim
    /// in `attributes`.
    pub fn from_hit(mut hit: RawHit) -> Result<Product, SearchError> {
        let id = match hit.remove(OBJECT_ID) {
            Some(Value::String(id)) if !id.is_empty() => id,
            Some(other) => return Err(SearchError::backend(format!("malformed hit: {} is {}", OBJECT_ID, other))),
            None => return Err(SearchError::backend(format!("malformed hit: missing {}", OBJECT_ID))),
        };
        // the backend identifier is authoritative
        hit.remove("id");
        let untyped = conform_optional(&mut hit);

        let mut product: Product =
            serde_json::from_value(Value::Object(hit)).map_err(|err| SearchError::backend(format!("malformed hit {}: {}", id, err)))?;
        product.id = id;
        product.attributes.extend(untyped);
        Ok(product)
    }
}

/// Map every hit, preserving backend order; one malformed hit fails the whole mapping
pub fn map_hits(hits: Vec<RawHit>) -> Result<Vec<Product>, SearchError> { hits.into_iter().map(Product::from_hit).collect() }

/// What the search tool hands back to the conversation. Never an error: failures are
/// carried in `success` and `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub success: bool,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchEnvelope {
    pub fn found(products: Vec<Product>) -> Self { Self { success: true, count: products.len(), products: Some(products), message: None } }

    pub fn failed(message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = "search failed".to_string();
        }
        Self { success: false, count: 0, products: None, message: Some(message) }
    }

    pub fn products(&self) -> &[Product] { self.products.as_deref().unwrap_or_default() }
}

impl From<Result<Vec<Product>, SearchError>> for SearchEnvelope {
    fn from(result: Result<Vec<Product>, SearchError>) -> Self {
        match result {
            Ok(products) => SearchEnvelope::found(products),
            Err(err) => SearchEnvelope::failed(err.to_string()),
        }
    }
}
