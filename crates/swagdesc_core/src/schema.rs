//! Schema fragment structure definitions

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// JSON Schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    /// Explicit null marker, emitted for sampled `null` values
    Null,
}

impl SchemaType {
    /// Keyword used for this type in a schema document
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
        }
    }

    /// Parse an exact schema keyword (`"integer"`, `"object"`, ...)
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            "null" => Some(Self::Null),
            _ => None,
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format marker for binary payloads (file uploads and downloads)
pub const FORMAT_BINARY: &str = "binary";

/// Schema fragment describing one value or field.
///
/// Field order matches the order keys are written to the document:
/// `type`, `format`, `name`, `required`, `example`, `description`,
/// then `properties` or `items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Schema type
    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// Format (for numbers or strings)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Field name, carried for parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Required flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Example
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Property definitions, in insertion order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
    /// Array item schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

impl Schema {
    /// Create a new schema
    #[must_use]
    pub const fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            format: None,
            name: None,
            required: None,
            example: None,
            description: None,
            properties: None,
            items: None,
        }
    }

    /// Create a string schema
    #[must_use]
    pub const fn string() -> Self {
        Self::new(SchemaType::String)
    }

    /// Create an integer schema
    #[must_use]
    pub const fn integer() -> Self {
        Self::new(SchemaType::Integer)
    }

    /// Create a number schema
    #[must_use]
    pub const fn number() -> Self {
        Self::new(SchemaType::Number)
    }

    /// Create a boolean schema
    #[must_use]
    pub const fn boolean() -> Self {
        Self::new(SchemaType::Boolean)
    }

    /// Create a null schema
    #[must_use]
    pub const fn null() -> Self {
        Self::new(SchemaType::Null)
    }

    /// Create an array schema
    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::new(SchemaType::Array)
        }
    }

    /// Create an object schema with an empty property map
    #[must_use]
    pub fn object() -> Self {
        Self {
            properties: Some(IndexMap::new()),
            ..Self::new(SchemaType::Object)
        }
    }

    /// Create an object schema with the given properties
    #[must_use]
    pub fn object_with(properties: IndexMap<String, Schema>) -> Self {
        Self {
            properties: Some(properties),
            ..Self::new(SchemaType::Object)
        }
    }

    /// Attach an example value
    #[must_use]
    pub fn with_example(mut self, example: serde_json::Value) -> Self {
        self.example = Some(example);
        self
    }

    /// Property map, created empty if absent
    pub fn properties_mut(&mut self) -> &mut IndexMap<String, Schema> {
        self.properties.get_or_insert_with(IndexMap::new)
    }

    /// Remove one top-level key from the fragment
    pub fn remove_key(&mut self, key: SchemaKey) {
        match key {
            SchemaKey::Type => self.schema_type = None,
            SchemaKey::Format => self.format = None,
            SchemaKey::Name => self.name = None,
            SchemaKey::Required => self.required = None,
            SchemaKey::Example => self.example = None,
            SchemaKey::Description => self.description = None,
            SchemaKey::Properties => self.properties = None,
            SchemaKey::Items => self.items = None,
        }
    }

    /// Whether a key is unset or holds an empty value.
    ///
    /// Empty means: absent, `""`, `"0"`, `false`, `0`, an empty list,
    /// an empty map or JSON `null`.
    #[must_use]
    pub fn key_is_empty(&self, key: SchemaKey) -> bool {
        match key {
            SchemaKey::Type => self.schema_type.is_none(),
            SchemaKey::Format => self.format.as_deref().is_none_or(is_empty_str),
            SchemaKey::Name => self.name.as_deref().is_none_or(is_empty_str),
            SchemaKey::Required => self.required != Some(true),
            SchemaKey::Example => self.example.as_ref().is_none_or(is_empty_value),
            SchemaKey::Description => self.description.as_deref().is_none_or(is_empty_str),
            SchemaKey::Properties => self.properties.as_ref().is_none_or(IndexMap::is_empty),
            SchemaKey::Items => self.items.is_none(),
        }
    }
}

fn is_empty_str(value: &str) -> bool {
    value.is_empty() || value == "0"
}

fn is_empty_value(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => is_empty_str(s),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Top-level key of a [`Schema`], as named in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKey {
    Type,
    Format,
    Name,
    Required,
    Example,
    Description,
    Properties,
    Items,
}

impl SchemaKey {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Format => "format",
            Self::Name => "name",
            Self::Required => "required",
            Self::Example => "example",
            Self::Description => "description",
            Self::Properties => "properties",
            Self::Items => "items",
        }
    }
}

impl FromStr for SchemaKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "type" => Ok(Self::Type),
            "format" => Ok(Self::Format),
            "name" => Ok(Self::Name),
            "required" => Ok(Self::Required),
            "example" => Ok(Self::Example),
            "description" => Ok(Self::Description),
            "properties" => Ok(Self::Properties),
            "items" => Ok(Self::Items),
            other => Err(format!("unknown schema key: {other}")),
        }
    }
}

/// Mapping from top-level field name to schema fragment.
///
/// Dotted paths address nested `properties`; intermediate nodes are created as
/// empty objects and are only ever extended afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaTree(IndexMap<String, Schema>);

impl SchemaTree {
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Set a top-level entry, replacing any previous one
    pub fn insert(&mut self, name: impl Into<String>, schema: Schema) -> Option<Schema> {
        self.0.insert(name.into(), schema)
    }

    /// Set the fragment at `path`, creating `{type: object, properties: {}}`
    /// for every missing intermediate segment.
    ///
    /// An existing intermediate node keeps its type and siblings; it only
    /// gains a `properties` map if it had none. The leaf is overwritten.
    /// Empty segments (`"a..b"`) are skipped.
    pub fn insert_path<'a, I>(&mut self, path: I, schema: Schema)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let segments: Vec<&str> = path.into_iter().filter(|s| !s.is_empty()).collect();
        let Some((leaf, parents)) = segments.split_last() else {
            return;
        };
        let mut target = &mut self.0;
        for segment in parents {
            target = target
                .entry((*segment).to_string())
                .or_insert_with(Schema::object)
                .properties_mut();
        }
        target.insert((*leaf).to_string(), schema);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.0.get(name)
    }

    /// Look up a fragment by dotted path
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&Schema> {
        let mut segments = path.split('.').filter(|s| !s.is_empty());
        let mut current = self.0.get(segments.next()?)?;
        for segment in segments {
            current = current.properties.as_ref()?.get(segment)?;
        }
        Some(current)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Schema)> {
        self.0.iter()
    }

    /// Wrap the tree as the `properties` of an object schema
    #[must_use]
    pub fn into_object(self) -> Schema {
        Schema::object_with(self.0)
    }

    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, Schema> {
        self.0
    }
}

impl From<IndexMap<String, Schema>> for SchemaTree {
    fn from(map: IndexMap<String, Schema>) -> Self {
        Self(map)
    }
}
