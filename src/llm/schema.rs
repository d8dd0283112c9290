// ABOUTME: Response schema declarations sent to the model and checked locally on the way back
// ABOUTME: Serializes to the Gemini OpenAPI-subset schema and validates serde_json values with paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Response Schemas
//!
//! A [`ResponseSchema`] is declared once per operation and used twice: it is
//! serialized into the request so the service constrains its output, and it
//! validates the returned JSON before any typed conversion happens. The
//! service's own enforcement is not trusted.
//!
//! Validation rules:
//!
//! - Every `required` property must be present and non-null
//! - Optional properties may be absent or `null`
//! - Unknown properties are ignored
//! - String enums match case-insensitively after trimming
//! - `minimum` applies to numbers only
//! - `minLength` counts characters and `minItems` counts array elements

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;
use serde_json::Value;

/// JSON type of a schema node, in the service's upper-case spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    /// JSON string
    String,
    /// Any JSON number
    Number,
    /// Whole JSON number
    Integer,
    /// JSON boolean
    Boolean,
    /// JSON array
    Array,
    /// JSON object
    Object,
}

impl SchemaType {
    /// Lower-case name used in violation messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match (self, value) {
            (Self::String, Value::String(_))
            | (Self::Number, Value::Number(_))
            | (Self::Boolean, Value::Bool(_))
            | (Self::Array, Value::Array(_))
            | (Self::Object, Value::Object(_)) => true,
            (Self::Integer, Value::Number(number)) => number.is_i64() || number.is_u64(),
            _ => false,
        }
    }
}

/// A schema node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    enum_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Box<ResponseSchema>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, ResponseSchema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    required: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    property_ordering: Vec<String>,
}

impl ResponseSchema {
    const fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            format: None,
            enum_values: Vec::new(),
            minimum: None,
            min_length: None,
            min_items: None,
            items: None,
            properties: BTreeMap::new(),
            required: Vec::new(),
            property_ordering: Vec::new(),
        }
    }

    /// String node
    #[must_use]
    pub const fn string() -> Self {
        Self::of(SchemaType::String)
    }

    /// Number node
    #[must_use]
    pub const fn number() -> Self {
        Self::of(SchemaType::Number)
    }

    /// Integer node
    #[must_use]
    pub const fn integer() -> Self {
        Self::of(SchemaType::Integer)
    }

    /// Boolean node
    #[must_use]
    pub const fn boolean() -> Self {
        Self::of(SchemaType::Boolean)
    }

    /// Empty object node; add properties with [`required`](Self::required) and [`optional`](Self::optional)
    #[must_use]
    pub const fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    /// Array node with an item schema
    #[must_use]
    pub fn array(items: Self) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaType::Array)
        }
    }

    /// String node restricted to the given values
    #[must_use]
    pub fn string_enum(values: &[&str]) -> Self {
        Self {
            format: Some("enum"),
            enum_values: values.iter().map(|value| (*value).to_owned()).collect(),
            ..Self::of(SchemaType::String)
        }
    }

    /// Attach a description the model sees
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Lower bound for a number node
    #[must_use]
    pub const fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Shortest accepted string, in characters
    #[must_use]
    pub const fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Fewest accepted array elements
    #[must_use]
    pub const fn with_min_items(mut self, min_items: usize) -> Self {
        self.min_items = Some(min_items);
        self
    }

    /// Add a property that must be present and non-null
    #[must_use]
    pub fn required(mut self, name: &str, schema: Self) -> Self {
        self.required.push(name.to_owned());
        self.optional(name, schema)
    }

    /// Add a property that may be absent or null
    #[must_use]
    pub fn optional(mut self, name: &str, schema: Self) -> Self {
        self.property_ordering.push(name.to_owned());
        self.properties.insert(name.to_owned(), schema);
        self
    }

    /// JSON type of this node
    #[must_use]
    pub const fn schema_type(&self) -> SchemaType {
        self.schema_type
    }

    /// Schema of a named property
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Self> {
        self.properties.get(name)
    }

    /// Whether a property is declared required
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|required| required == name)
    }

    /// Property names in declaration order
    #[must_use]
    pub fn property_names(&self) -> &[String] {
        &self.property_ordering
    }

    /// Check a parsed value against this schema
    ///
    /// # Errors
    ///
    /// Returns the first violation found, with a `$`-rooted path to the offending value.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        self.validate_at("$", value)
    }

    fn validate_at(&self, path: &str, value: &Value) -> Result<(), SchemaViolation> {
        if !self.schema_type.matches(value) {
            return Err(SchemaViolation::new(
                path,
                format!(
                    "expected {}, found {}",
                    self.schema_type.label(),
                    value_kind(value)
                ),
            ));
        }

        match value {
            Value::String(text) if !self.enum_values.is_empty() => {
                let candidate = text.trim();
                if !self
                    .enum_values
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(candidate))
                {
                    return Err(SchemaViolation::new(
                        path,
                        format!(
                            "`{candidate}` is not one of [{}]",
                            self.enum_values.join(", ")
                        ),
                    ));
                }
            }
            Value::String(text) => {
                if let Some(min_length) = self.min_length {
                    let length = text.chars().count();
                    if length < min_length {
                        return Err(SchemaViolation::new(
                            path,
                            format!("{length} characters is shorter than {min_length}"),
                        ));
                    }
                }
            }
            Value::Number(number) => {
                if let (Some(minimum), Some(actual)) = (self.minimum, number.as_f64()) {
                    if actual < minimum {
                        return Err(SchemaViolation::new(
                            path,
                            format!("{actual} is below the minimum of {minimum}"),
                        ));
                    }
                }
            }
            Value::Array(items) => {
                if let Some(min_items) = self.min_items {
                    if items.len() < min_items {
                        return Err(SchemaViolation::new(
                            path,
                            format!("{} items is fewer than {min_items}", items.len()),
                        ));
                    }
                }
                if let Some(item_schema) = &self.items {
                    for (index, item) in items.iter().enumerate() {
                        item_schema.validate_at(&format!("{path}[{index}]"), item)?;
                    }
                }
            }
            Value::Object(fields) => {
                for name in &self.required {
                    if matches!(fields.get(name), None | Some(Value::Null)) {
                        return Err(SchemaViolation::new(
                            &format!("{path}.{name}"),
                            "missing required field",
                        ));
                    }
                }
                for (name, schema) in &self.properties {
                    match fields.get(name) {
                        None | Some(Value::Null) => {}
                        Some(field) => schema.validate_at(&format!("{path}.{name}"), field)?,
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }
}

/// First mismatch between a value and its schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// `$`-rooted path, e.g. `$.nutrition.calories`
    pub path: String,
    /// What is wrong at that path
    pub message: String,
}

impl SchemaViolation {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_owned(),
            message: message.into(),
        }
    }
}

impl Display for SchemaViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}: {}", self.path, self.message)
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
