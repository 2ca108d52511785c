//! Type name normalization and mapping onto schema types.
//!
//! Type names arrive as host primitives (`int`, `bool`, `float`), array
//! shorthands (`User[]`), or namespaced class identifiers (`\App\User`,
//! `crate::models::User`). Unrecognised names pass through unchanged and are
//! treated as opaque class-like identifiers.

use swagdesc_core::schema::SchemaType;

use crate::registry::TypeRegistry;

/// Fixed primitive keyword set
pub const PRIMITIVE_TYPES: &[&str] = &[
    "string", "integer", "float", "boolean", "array", "object", "null",
];

/// Short aliases resolved during normalization
const SHORT_ALIASES: &[(&str, &str)] = &[("int", "integer"), ("bool", "boolean")];

const NAMESPACE_SEPARATORS: &[&str] = &["\\", "::"];

const ARRAY_SUFFIX: &str = "[]";

/// Date/time annotations that render as formatted strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
    Date,
    DateTime,
}

impl Temporal {
    /// `format` keyword for this kind
    pub const fn format(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::DateTime => "date-time",
        }
    }
}

/// Strip every leading namespace separator (`\`, `::`)
pub fn strip_namespace_prefix(ty: &str) -> &str {
    let mut rest = ty;
    while let Some(sep) = NAMESPACE_SEPARATORS.iter().find(|sep| rest.starts_with(**sep)) {
        rest = &rest[sep.len()..];
    }
    rest
}

fn has_namespace(ty: &str) -> bool {
    NAMESPACE_SEPARATORS.iter().any(|sep| ty.contains(sep))
}

/// Canonicalize a type name.
///
/// Namespaced names lose their leading separators and keep their case.
/// Everything else is lower-cased with short aliases resolved. Array
/// shorthands normalize their element type. Idempotent.
pub fn normalize(ty: &str) -> String {
    if let Some(base) = array_base(ty) {
        return format!("{}[]", normalize(base));
    }
    let stripped = strip_namespace_prefix(ty.trim());
    if has_namespace(stripped) {
        return stripped.to_string();
    }
    let lower = stripped.to_lowercase();
    SHORT_ALIASES
        .iter()
        .find(|(short, _)| *short == lower)
        .map_or(lower, |(_, full)| (*full).to_string())
}

/// Whether the normalized name is in [`PRIMITIVE_TYPES`]
pub fn is_primitive(ty: &str) -> bool {
    PRIMITIVE_TYPES.contains(&normalize(ty).as_str())
}

/// Whether the name has the `<base>[]` form
pub fn is_array_shorthand(ty: &str) -> bool {
    array_base(ty).is_some()
}

fn array_base(ty: &str) -> Option<&str> {
    ty.trim()
        .strip_suffix(ARRAY_SUFFIX)
        .filter(|base| !base.trim().is_empty())
}

/// Normalized element type of an array shorthand (`int[]` -> `integer`)
pub fn element_type(ty: &str) -> Option<String> {
    array_base(ty).map(normalize)
}

/// Whether the name is a non-primitive resolvable through `registry`
pub fn is_class_name(ty: &str, registry: &dyn TypeRegistry) -> bool {
    let normalized = normalize(ty);
    !PRIMITIVE_TYPES.contains(&normalized.as_str()) && registry.resolve(&normalized)
}

/// First alternative of a union annotation (`int|null` -> `int`)
pub fn first_alternative(ty: &str) -> &str {
    ty.split('|').next().unwrap_or(ty).trim()
}

/// Date/time kind of an annotation, by its last path segment.
///
/// Generic arguments are ignored, so `chrono::DateTime<Utc>` is a date-time.
pub fn temporal_kind(ty: &str) -> Option<Temporal> {
    let without_generics = ty.split('<').next().unwrap_or(ty);
    let last = without_generics
        .rsplit(['\\', ':'])
        .next()
        .unwrap_or(without_generics)
        .trim()
        .to_lowercase();
    match last.as_str() {
        "date" | "naivedate" => Some(Temporal::Date),
        "datetime" | "naivedatetime" | "offsetdatetime" | "primitivedatetime" | "carbon" => {
            Some(Temporal::DateTime)
        }
        _ => None,
    }
}

/// Schema type for names with a known primitive mapping, `None` otherwise
pub fn known_schema_type(ty: &str) -> Option<SchemaType> {
    if is_array_shorthand(ty) {
        return Some(SchemaType::Array);
    }
    let normalized = normalize(ty);
    let mapped = match normalized.as_str() {
        "string" => SchemaType::String,
        "integer" => SchemaType::Integer,
        "float" | "double" | "number" => SchemaType::Number,
        "boolean" => SchemaType::Boolean,
        "array" => SchemaType::Array,
        "object" => SchemaType::Object,
        "null" => SchemaType::Null,
        other if temporal_kind(other).is_some() => SchemaType::String,
        _ => return None,
    };
    Some(mapped)
}

/// Map a type name to a schema type; class-like names map to `object`
pub fn to_schema_type(ty: &str) -> SchemaType {
    known_schema_type(ty).unwrap_or(SchemaType::Object)
}

/// Host primitive keyword for a schema type.
///
/// Only primitives round-trip through [`to_schema_type`]; class names do not.
pub const fn to_host_type(schema_type: SchemaType) -> &'static str {
    match schema_type {
        SchemaType::String => "string",
        SchemaType::Integer => "integer",
        SchemaType::Number => "float",
        SchemaType::Boolean => "boolean",
        SchemaType::Array => "array",
        SchemaType::Object => "object",
        SchemaType::Null => "null",
    }
}

/// Whether the raw name is a host primitive or alias that has a schema
/// equivalent (`int`, `float`, `string[]`, ...)
pub fn is_host_primitive(ty: &str) -> bool {
    known_schema_type(ty).is_some()
}
