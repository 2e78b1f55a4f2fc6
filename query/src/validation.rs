//! Raw tool input to [`FilterSpec`].
//!
//! The input is the JSON object an agent passes to the search tool. Each recognised key is
//! checked against its closed literal set or format; the first failing field aborts
//! validation. Unknown keys are ignored and `null` counts as absent, except for `currency`,
//! where an explicit `null` selects the default currency.

use std::collections::BTreeSet;
use std::convert::TryFrom;

use serde_json::{Map, Value};

use crate::error::FilterError;
use crate::filter::{Category, Condition, Currency, FilterSpec, Gender, Size, SortOrder, SubCategory};

pub const QUERY: &str = "query";
pub const CATEGORY: &str = "category";
pub const SUB_CATEGORY: &str = "subCategory";
pub const MIN_PRICE: &str = "minPrice";
pub const MAX_PRICE: &str = "maxPrice";
pub const DISCOUNT_PERCENTAGE: &str = "discountPercentage";
pub const SIZE: &str = "size";
pub const GENDER: &str = "gender";
pub const CONDITION: &str = "condition";
pub const CURRENCY: &str = "currency";
pub const ORDER: &str = "order";

/// Validate a raw JSON filter object
pub fn parse_filter(input: &Value) -> Result<FilterSpec, FilterError> {
    let object = input.as_object().ok_or_else(|| FilterError::MalformedInput(format!("expected an object, got {}", input)))?;

    Ok(FilterSpec {
        query: optional(object, QUERY).map(|value| string(QUERY, value).map(str::to_string)).transpose()?,
        category: optional(object, CATEGORY).map(categories).transpose()?,
        sub_category: optional(object, SUB_CATEGORY).map(|value| literal(SUB_CATEGORY, value, SubCategory::from_literal)).transpose()?,
        min_price: optional(object, MIN_PRICE).map(|value| non_negative(MIN_PRICE, value)).transpose()?,
        max_price: optional(object, MAX_PRICE).map(|value| non_negative(MAX_PRICE, value)).transpose()?,
        discount_percentage: optional(object, DISCOUNT_PERCENTAGE).map(|value| non_negative(DISCOUNT_PERCENTAGE, value)).transpose()?,
        size: optional(object, SIZE).map(sizes).transpose()?,
        gender: optional(object, GENDER).map(|value| literal(GENDER, value, Gender::from_literal)).transpose()?,
        condition: optional(object, CONDITION).map(|value| literal(CONDITION, value, Condition::from_literal)).transpose()?,
        currency: currency(object)?,
        order: optional(object, ORDER).map(|value| literal(ORDER, value, SortOrder::from_literal)).transpose()?,
    })
}

fn optional<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    match object.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

/// Absent key: no currency constraint. Present but `null`: the default currency.
fn currency(object: &Map<String, Value>) -> Result<Option<Currency>, FilterError> {
    match object.get(CURRENCY) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(Currency::default())),
        Some(value) => literal(CURRENCY, value, Currency::from_literal).map(Some),
    }
}

/// Textual form of a rejected value: strings as-is, anything else as JSON
fn rendered(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn string<'a>(field: &'static str, value: &'a Value) -> Result<&'a str, FilterError> {
    value.as_str().ok_or_else(|| FilterError::invalid(field, rendered(value)))
}

fn literal<T>(field: &'static str, value: &Value, parse: impl Fn(&str) -> Option<T>) -> Result<T, FilterError> {
    let text = string(field, value)?;
    parse(text).ok_or_else(|| FilterError::invalid(field, text))
}

fn non_negative(field: &'static str, value: &Value) -> Result<f64, FilterError> {
    let number = value.as_f64().ok_or_else(|| FilterError::invalid(field, rendered(value)))?;
    check_bound(field, number).map_err(|_| FilterError::invalid(field, rendered(value)))?;
    // -0 would otherwise encode as "price>=-0"
    Ok(if number == 0.0 { 0.0 } else { number })
}

/// Numeric bounds must be finite and non-negative
fn check_bound(field: &'static str, number: f64) -> Result<(), FilterError> {
    if !number.is_finite() || number < 0.0 {
        return Err(FilterError::invalid(field, number.to_string()));
    }
    Ok(())
}

impl FilterSpec {
    /// Re-check the numeric bounds of a spec assembled in code rather than parsed from input.
    /// Enumerated fields are valid by construction.
    pub fn validate(&self) -> Result<(), FilterError> {
        let bounds = [(MIN_PRICE, self.min_price), (MAX_PRICE, self.max_price), (DISCOUNT_PERCENTAGE, self.discount_percentage)];
        for (field, bound) in bounds {
            if let Some(number) = bound {
                check_bound(field, number)?;
            }
        }
        Ok(())
    }
}

/// A single category or a list of them
fn categories(value: &Value) -> Result<BTreeSet<Category>, FilterError> {
    match value {
        Value::Array(items) => items.iter().map(|item| literal(CATEGORY, item, Category::from_literal)).collect(),
        single => Ok(BTreeSet::from([literal(CATEGORY, single, Category::from_literal)?])),
    }
}

fn sizes(value: &Value) -> Result<Vec<Size>, FilterError> {
    let items = value.as_array().ok_or_else(|| FilterError::invalid(SIZE, rendered(value)))?;
    items.iter().map(|item| literal(SIZE, item, Size::parse)).collect()
}

impl TryFrom<&Value> for FilterSpec {
    type Error = FilterError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> { parse_filter(value) }
}

impl TryFrom<Value> for FilterSpec {
    type Error = FilterError;

    fn try_from(value: Value) -> Result<Self, Self::Error> { parse_filter(&value) }
}

impl<'a> TryFrom<&'a str> for FilterSpec {
    type Error = FilterError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> { parse_filter(&serde_json::from_str(value)?) }
}
