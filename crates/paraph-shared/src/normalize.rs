//! Normalization of the upstream paraphrase payload.
//!
//! The upstream API answers with a string, a list of strings, or a list of
//! lists of strings depending on the requested result type. Anything else is
//! kept as an opaque value and rendered through its JSON text.

use serde_json::Value;

/// One paraphrased alternative.
pub type Variant = String;

/// Variants for one unit of input (a sentence in "multiple" mode).
pub type Group = Vec<Variant>;

pub type NormalizedResult = Vec<Group>;

#[derive(Debug, Clone, PartialEq)]
pub enum RawResult {
    Grouped(Vec<Vec<Value>>),
    Flat(Vec<String>),
    Single(String),
    Unknown(Value),
}

impl RawResult {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) if items.iter().all(Value::is_array) => RawResult::Grouped(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::Array(inner) => inner,
                        other => vec![other],
                    })
                    .collect(),
            ),
            Value::Array(items) if items.iter().all(Value::is_string) => RawResult::Flat(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            Value::String(s) => RawResult::Single(s),
            other => RawResult::Unknown(other),
        }
    }

    pub fn into_groups(self) -> NormalizedResult {
        match self {
            RawResult::Grouped(groups) => groups
                .into_iter()
                .map(|group| group.into_iter().map(variant_text).collect())
                .collect(),
            RawResult::Flat(variants) => vec![variants],
            RawResult::Single(variant) => vec![vec![variant]],
            RawResult::Unknown(value) => vec![vec![value.to_string()]],
        }
    }
}

fn variant_text(value: Value) -> Variant {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Resolves any payload into groups of variants. Never fails.
pub fn normalize(value: &Value) -> NormalizedResult {
    RawResult::from_value(value.clone()).into_groups()
}
