//! Runtime value to schema fragment conversion.
//!
//! Values are inspected by shape: scalars carry their value as example,
//! ordered lists sample their first element, keyed maps describe every entry.
//! Object-like values opt in through [`Describable`] or are serialized with
//! serde first.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use swagdesc_core::schema::{Schema, SchemaType};
use tracing::warn;

use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::Result;

/// Request data handed to [`Describable::to_fields`].
///
/// Document builds run outside a live request, so this is usually empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    pub path: Option<String>,
    pub attributes: Map<String, Value>,
}

/// Capability of producing the keyed field view of a value, like a resource
/// rendering itself for a response.
pub trait Describable {
    fn to_fields(&self, request: &RequestContext) -> Map<String, Value>;
}

impl Describable for Map<String, Value> {
    fn to_fields(&self, _request: &RequestContext) -> Map<String, Value> {
        self.clone()
    }
}

/// Schema type implied by a sample value.
///
/// Lists are arrays unless empty; an empty list or map is an `object`.
pub fn schema_type_of(value: &Value) -> SchemaType {
    match value {
        Value::Null => SchemaType::Null,
        Value::Bool(_) => SchemaType::Boolean,
        Value::Number(n) if n.is_i64() || n.is_u64() => SchemaType::Integer,
        Value::Number(_) => SchemaType::Number,
        Value::String(_) => SchemaType::String,
        Value::Array(items) if !items.is_empty() => SchemaType::Array,
        Value::Array(_) | Value::Object(_) => SchemaType::Object,
    }
}

/// Describes runtime values as schema fragments
#[derive(Debug, Clone)]
pub struct ValueDescriber {
    max_depth: usize,
    request: RequestContext,
}

impl Default for ValueDescriber {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl ValueDescriber {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            request: RequestContext::default(),
        }
    }

    #[must_use]
    pub fn with_request(mut self, request: RequestContext) -> Self {
        self.request = request;
        self
    }

    /// Describe one value.
    ///
    /// `with_example` applies to the value itself; nested scalars always carry
    /// their examples.
    pub fn describe(&self, value: &Value, with_example: bool) -> Schema {
        self.describe_at(value, with_example, 0)
    }

    /// Describe an object that renders its own fields
    pub fn describe_object<D>(&self, object: &D) -> Schema
    where
        D: Describable + ?Sized,
    {
        let fields = object.to_fields(&self.request);
        Schema::object_with(self.describe_fields(&fields, 1))
    }

    /// Describe any serializable value.
    ///
    /// Serialized maps are object-like: they always get a `properties` key,
    /// even when empty.
    pub fn describe_serialize<T>(&self, value: &T) -> Result<Schema>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value)?;
        Ok(match &value {
            Value::Object(fields) => Schema::object_with(self.describe_fields(fields, 1)),
            other => self.describe(other, true),
        })
    }

    /// Properties of the value's description, empty for non-objects
    pub fn properties_of(&self, value: &Value) -> IndexMap<String, Schema> {
        self.describe(value, true).properties.unwrap_or_default()
    }

    fn describe_at(&self, value: &Value, with_example: bool, depth: usize) -> Schema {
        if depth >= self.max_depth {
            warn!(depth, "value nesting exceeds max depth, truncating to object");
            return Schema::new(SchemaType::Object);
        }
        match value {
            Value::Null => Schema::null(),
            Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                let schema = Schema::new(schema_type_of(value));
                if with_example {
                    schema.with_example(value.clone())
                } else {
                    schema
                }
            }
            Value::Array(items) => match items.first() {
                Some(first) => Schema::array(self.describe_at(first, true, depth + 1)),
                None => Schema::new(SchemaType::Object),
            },
            Value::Object(fields) if fields.is_empty() => Schema::new(SchemaType::Object),
            Value::Object(fields) => Schema::object_with(self.describe_fields(fields, depth + 1)),
        }
    }

    fn describe_fields(&self, fields: &Map<String, Value>, depth: usize) -> IndexMap<String, Schema> {
        fields
            .iter()
            .map(|(key, value)| (key.clone(), self.describe_at(value, true, depth)))
            .collect()
    }
}
