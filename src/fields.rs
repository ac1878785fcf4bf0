use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::TranslateError;

/// Field list requested from the gene index by the request builder.
pub const DEFAULT_FIELD_LIST: &str =
    "id,name,description,region,start,end,db_type,system_name,genetree,synonyms";

/// Fields that may be absent on a hit whatever the field list says.
pub const OPTIONAL_FIELDS: [&str; 2] = ["genetree", "synonyms"];

/// Ordered set of field names every search hit is expected to carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldList(Vec<String>);

impl FieldList {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.names().filter(|name| !is_optional(name))
    }

    pub fn optional(&self) -> impl Iterator<Item = &str> {
        self.names().filter(|name| is_optional(name))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for FieldList {
    fn default() -> Self {
        DEFAULT_FIELD_LIST
            .split(',')
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into()
    }
}

impl From<Vec<String>> for FieldList {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl fmt::Display for FieldList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

impl FromStr for FieldList {
    type Err = TranslateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut names: Vec<String> = Vec::new();
        for segment in value.split(',') {
            let name = segment.trim();
            if name.is_empty() {
                continue;
            }
            let is_valid = name
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
            if !is_valid {
                return Err(TranslateError::InvalidFieldList(value.to_string()));
            }
            if !names.iter().any(|existing| existing == name) {
                names.push(name.to_string());
            }
        }
        if names.is_empty() {
            return Err(TranslateError::InvalidFieldList(value.to_string()));
        }
        Ok(Self(names))
    }
}

fn is_optional(name: &str) -> bool {
    OPTIONAL_FIELDS.contains(&name)
}

/// Checks that `entry` holds a truthy value for every required field.
///
/// Stops at the first failing field, so the error always names a single
/// field of a single hit.
pub fn validate_entry_fields(
    entry: &Map<String, Value>,
    fields: &FieldList,
) -> Result<(), TranslateError> {
    for field in fields.required() {
        if !entry.get(field).is_some_and(is_truthy) {
            return Err(TranslateError::MissingField {
                id: entry_id(entry),
                field: field.to_string(),
            });
        }
    }
    Ok(())
}

/// Search engine truthiness: `null`, `false`, `0`, `NaN` and `""` count as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Renders a scalar the way it appears in the translated output.
pub fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn entry_id(entry: &Map<String, Value>) -> String {
    entry
        .get("id")
        .map(render_scalar)
        .unwrap_or_else(|| "undefined".to_string())
}
