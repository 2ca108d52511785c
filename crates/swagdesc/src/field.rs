//! Declarative field descriptors and their conversion to schema fragments.
//!
//! A [`FieldAnnotation`] describes one documented field, parameter or
//! response value. It is built either through [`FieldAnnotationBuilder`] or
//! from an annotation configuration map, converted once into a [`Schema`] and
//! merged into a [`SchemaTree`] under its (possibly dotted) name.

use std::cell::OnceCell;
use std::fmt;

use serde_json::{Map, Value};
use swagdesc_core::schema::{FORMAT_BINARY, Schema, SchemaKey, SchemaTree, SchemaType};
use tracing::debug;

use crate::context::DescribeContext;
use crate::describe::schema_type_of;
use crate::error::{Error, Result};
use crate::types::{
    element_type, first_alternative, is_array_shorthand, is_host_primitive, known_schema_type,
    normalize, temporal_kind, to_schema_type,
};

/// Option that receives a bare `value` key in configuration maps
pub const DEFAULT_PARAM: &str = "name";

/// Separator of nested field paths
pub const PATH_SEPARATOR: char = '.';

/// Item type used when an array field names none
const DEFAULT_ITEMS: &str = "string";

/// Options recognised in configuration maps
const OPTIONS: &[&str] = &[
    "name",
    "type",
    "format",
    "description",
    "example",
    "items",
    "required",
];

/// One documented field
#[derive(Debug, Clone, Default)]
pub struct FieldAnnotation {
    name: Option<String>,
    type_name: Option<String>,
    format: Option<String>,
    description: Option<String>,
    example: Option<Value>,
    items: Option<String>,
    required: Option<bool>,
    host_type: Option<String>,
    example_required: bool,
    exclude_keys: Vec<SchemaKey>,
    exclude_empty_keys: Vec<SchemaKey>,
    nested: OnceCell<bool>,
}

impl FieldAnnotation {
    pub fn builder() -> FieldAnnotationBuilder {
        FieldAnnotationBuilder::default()
    }

    /// Build from a configuration map with the default `value` target and
    /// the option policy of `ctx`
    pub fn from_config(config: &Map<String, Value>, ctx: &DescribeContext) -> Result<Self> {
        FieldAnnotationBuilder::from_config(config, DEFAULT_PARAM, ctx.config().strict_options)
            .map(FieldAnnotationBuilder::build)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Declared type after processing: a schema keyword for host primitives,
    /// the given class-like name otherwise
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Normalized host type the field was declared with
    pub fn host_type(&self) -> Option<&str> {
        self.host_type.as_deref()
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn example(&self) -> Option<&Value> {
        self.example.as_ref()
    }

    pub fn items(&self) -> Option<&str> {
        self.items.as_deref()
    }

    pub fn required(&self) -> Option<bool> {
        self.required
    }

    pub fn example_required(&self) -> bool {
        self.example_required
    }

    /// Whether the name is a dotted path
    pub fn is_nested(&self) -> bool {
        *self.nested.get_or_init(|| {
            self.name
                .as_deref()
                .is_some_and(|name| name.contains(PATH_SEPARATOR))
        })
    }

    /// Final schema type.
    ///
    /// A declared primitive wins. An example decides when the declared type
    /// has no primitive mapping (`mixed`, class names) or is missing; other
    /// class-like names are objects.
    pub fn schema_type(&self) -> Option<SchemaType> {
        let declared = self.type_name.as_deref().map(|ty| (ty, known_schema_type(ty)));
        match (declared, &self.example) {
            (Some((_, Some(known))), _) => Some(known),
            (_, Some(example)) => Some(schema_type_of(example)),
            (Some((ty, None)), None) => Some(to_schema_type(ty)),
            (None, None) => None,
        }
    }

    /// Last segment of the name, used for name-based example rules
    pub fn leaf_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .and_then(|name| name.rsplit(PATH_SEPARATOR).next())
    }

    /// Convert to a schema fragment.
    ///
    /// Objects get `properties` described from the example (or empty), arrays
    /// get `items` (defaulting to `string`). When an example is required and
    /// none was given, one is synthesized from the type and name; binary
    /// formats get the `"binary"` marker instead. Exclusion rules run last.
    pub fn to_fragment(&self, ctx: &mut DescribeContext) -> Schema {
        let schema_type = self.schema_type();
        let mut schema = Schema {
            schema_type,
            format: self.format.clone(),
            name: self.name.clone(),
            required: self.required,
            example: self.example.clone(),
            description: self.description.clone(),
            ..Schema::default()
        };

        match schema_type {
            Some(SchemaType::Object) => {
                let properties = self
                    .example
                    .as_ref()
                    .map(|example| ctx.describer().properties_of(example))
                    .unwrap_or_default();
                schema.properties = Some(properties);
            }
            Some(SchemaType::Array) => {
                let items = self.items.as_deref().unwrap_or(DEFAULT_ITEMS);
                schema.items = Some(Box::new(Schema::new(to_schema_type(items))));
            }
            _ => {}
        }

        if self.example_required
            && schema.example.is_none()
            && let Some(ty) = self.example_type()
            && let Some(example) = ctx.synthesizer().synthesize(ty, self.leaf_name())
        {
            schema.example = Some(if schema.format.as_deref() == Some(FORMAT_BINARY) {
                Value::String(FORMAT_BINARY.to_string())
            } else {
                example
            });
        }

        for key in &self.exclude_keys {
            schema.remove_key(*key);
        }
        for key in &self.exclude_empty_keys {
            if schema.key_is_empty(*key) {
                schema.remove_key(*key);
            }
        }

        schema
    }

    /// Set this field's fragment into `tree` under its name.
    ///
    /// Dotted names walk into nested `properties`, creating intermediate
    /// object nodes; existing nodes are extended, never replaced.
    pub fn merge_into_tree(&self, tree: &mut SchemaTree, ctx: &mut DescribeContext) {
        let fragment = self.to_fragment(ctx);
        let name = self.name.as_deref().unwrap_or_default();
        if self.is_nested() {
            debug!(path = name, "merging nested field");
            let segments: Vec<&str> = name.split(PATH_SEPARATOR).collect();
            for end in 1..segments.len() {
                let parent = segments[..end].join(".");
                if let Some(node) = tree.get_path(&parent)
                    && node.schema_type != Some(SchemaType::Object)
                {
                    debug!(
                        path = name,
                        parent = %parent,
                        parent_type = ?node.schema_type,
                        "extending non-object node with properties"
                    );
                }
            }
            tree.insert_path(segments, fragment);
        } else {
            tree.insert(name, fragment);
        }
    }

    /// Type used for example synthesis. Date/time declarations keep their
    /// host type so the example is a formatted date.
    fn example_type(&self) -> Option<&str> {
        self.host_type
            .as_deref()
            .filter(|host| temporal_kind(host).is_some())
            .or(self.type_name.as_deref())
    }
}

impl fmt::Display for FieldAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}

/// Typed builder for [`FieldAnnotation`]
#[derive(Debug, Clone, Default)]
pub struct FieldAnnotationBuilder {
    name: Option<String>,
    type_name: Option<String>,
    format: Option<String>,
    description: Option<String>,
    example: Option<Value>,
    items: Option<String>,
    required: Option<bool>,
    example_required: bool,
    exclude_keys: Vec<SchemaKey>,
    exclude_empty_keys: Vec<SchemaKey>,
}

impl FieldAnnotationBuilder {
    /// Apply a configuration map.
    ///
    /// A bare `value` key is assigned to `default_param`. Unknown keys are
    /// rejected when `strict`, skipped otherwise. `null` leaves an option
    /// unset.
    pub fn from_config(
        config: &Map<String, Value>,
        default_param: &str,
        strict: bool,
    ) -> Result<Self> {
        if !OPTIONS.contains(&default_param) {
            return Err(Error::UnknownOption {
                option: default_param.to_string(),
            });
        }
        let mut builder = Self::default();
        if let Some(value) = config.get("value") {
            builder.apply(default_param, value)?;
        }
        for (key, value) in config {
            if key == "value" {
                continue;
            }
            if OPTIONS.contains(&key.as_str()) {
                builder.apply(key, value)?;
            } else if strict {
                return Err(Error::UnknownOption {
                    option: key.clone(),
                });
            } else {
                debug!(option = %key, "ignoring unknown field option");
            }
        }
        Ok(builder)
    }

    fn apply(&mut self, option: &str, value: &Value) -> Result<()> {
        if value.is_null() {
            return Ok(());
        }
        match option {
            "name" => self.name = Some(expect_string(option, value)?),
            "type" => self.type_name = Some(expect_string(option, value)?),
            "format" => self.format = Some(expect_string(option, value)?),
            "description" => self.description = Some(expect_string(option, value)?),
            "items" => self.items = Some(expect_string(option, value)?),
            "example" => self.example = Some(value.clone()),
            "required" => {
                self.required = Some(value.as_bool().ok_or_else(|| Error::InvalidOption {
                    option: option.to_string(),
                    reason: format!("expected a boolean, got {value}"),
                })?);
            }
            other => {
                return Err(Error::UnknownOption {
                    option: other.to_string(),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    #[must_use]
    pub fn items(mut self, items: impl Into<String>) -> Self {
        self.items = Some(items.into());
        self
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Synthesize an example when none is given
    #[must_use]
    pub fn example_required(mut self, example_required: bool) -> Self {
        self.example_required = example_required;
        self
    }

    /// Never emit `key`
    #[must_use]
    pub fn exclude_key(mut self, key: SchemaKey) -> Self {
        if !self.exclude_keys.contains(&key) {
            self.exclude_keys.push(key);
        }
        self
    }

    /// Omit `key` when its value is empty
    #[must_use]
    pub fn exclude_empty_key(mut self, key: SchemaKey) -> Self {
        if !self.exclude_empty_keys.contains(&key) {
            self.exclude_empty_keys.push(key);
        }
        self
    }

    /// Finish the field, processing its declared type.
    ///
    /// Array shorthands infer `items` from the element type unless set. Host
    /// primitives are replaced by their schema keyword; other names stay as
    /// given and are remembered normalized as the host type. Date/time types
    /// default `format` to `date` or `date-time`.
    pub fn build(self) -> FieldAnnotation {
        let mut field = FieldAnnotation {
            name: self.name,
            type_name: self.type_name,
            format: self.format,
            description: self.description,
            example: self.example,
            items: self.items,
            required: self.required,
            host_type: None,
            example_required: self.example_required,
            exclude_keys: self.exclude_keys,
            exclude_empty_keys: self.exclude_empty_keys,
            nested: OnceCell::new(),
        };

        let Some(raw) = field.type_name.as_deref().map(first_alternative).map(str::to_string) else {
            return field;
        };
        field.type_name = Some(raw.clone());
        field.host_type = Some(normalize(&raw));
        if is_array_shorthand(&raw) && field.items.is_none() {
            field.items = element_type(&raw);
        }
        if field.format.is_none()
            && let Some(temporal) = temporal_kind(&raw)
        {
            field.format = Some(temporal.format().to_string());
        }
        if is_host_primitive(&raw) {
            field.type_name = Some(to_schema_type(&raw).as_str().to_string());
        }
        field
    }
}

fn expect_string(option: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidOption {
            option: option.to_string(),
            reason: format!("expected a string, got {value}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DescribeConfig;
    use insta::assert_json_snapshot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn ctx() -> DescribeContext {
        DescribeContext::new(DescribeConfig {
            seed: Some(11),
            ..DescribeConfig::default()
        })
    }

    fn fragment_json(field: &FieldAnnotation) -> Value {
        serde_json::to_value(field.to_fragment(&mut ctx())).unwrap()
    }

    fn config(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected a map, got {other}"),
        }
    }

    #[test]
    fn from_config_assigns_known_options() {
        let field = FieldAnnotation::from_config(
            &config(json!({
                "name": "age",
                "type": "int",
                "description": "Age in years",
                "required": true
            })),
            &ctx(),
        )
        .unwrap();
        assert_eq!(field.name(), Some("age"));
        assert_eq!(field.type_name(), Some("integer"));
        assert_eq!(field.host_type(), Some("integer"));
        assert_eq!(field.description(), Some("Age in years"));
        assert_eq!(field.required(), Some(true));
    }

    #[test]
    fn from_config_moves_bare_value_to_default_param() {
        let field = FieldAnnotation::from_config(&config(json!({"value": "token"})), &ctx()).unwrap();
        assert_eq!(field.name(), Some("token"));
    }

    #[test]
    fn from_config_bare_value_to_custom_param() {
        let builder = FieldAnnotationBuilder::from_config(
            &config(json!({"value": "Login e-mail"})),
            "description",
            true,
        )
        .unwrap();
        assert_eq!(builder.build().description(), Some("Login e-mail"));
    }

    #[test]
    fn from_config_rejects_unknown_option_when_strict() {
        let err = FieldAnnotation::from_config(&config(json!({"name": "a", "colour": "red"})), &ctx())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownOption { option } if option == "colour"));
    }

    #[test]
    fn from_config_ignores_unknown_option_when_lenient() {
        let builder = FieldAnnotationBuilder::from_config(
            &config(json!({"name": "a", "colour": "red"})),
            DEFAULT_PARAM,
            false,
        )
        .unwrap();
        assert_eq!(builder.build().name(), Some("a"));
    }

    #[test]
    fn from_config_rejects_unknown_default_param() {
        let err = FieldAnnotationBuilder::from_config(&Map::new(), "content", true).unwrap_err();
        assert!(matches!(err, Error::UnknownOption { .. }));
    }

    #[rstest]
    #[case(json!({"name": 5}), "name")]
    #[case(json!({"required": "yes"}), "required")]
    #[case(json!({"type": ["int"]}), "type")]
    fn from_config_rejects_wrong_kinds(#[case] value: Value, #[case] expected: &str) {
        let err = FieldAnnotation::from_config(&config(value), &ctx()).unwrap_err();
        assert!(matches!(err, Error::InvalidOption { option, .. } if option == expected));
    }

    #[test]
    fn from_config_null_leaves_option_unset() {
        let field =
            FieldAnnotation::from_config(&config(json!({"name": "a", "format": null})), &ctx())
                .unwrap();
        assert_eq!(field.format(), None);
    }

    #[test]
    fn array_shorthand_infers_items() {
        let field = FieldAnnotation::builder().type_name("integer[]").build();
        assert_eq!(field.type_name(), Some("array"));
        assert_eq!(field.items(), Some("integer"));
        assert_eq!(
            fragment_json(&field),
            json!({"type": "array", "items": {"type": "integer"}})
        );
    }

    #[test]
    fn array_shorthand_keeps_explicit_items() {
        let field = FieldAnnotation::builder()
            .type_name("int[]")
            .items("string")
            .build();
        assert_eq!(field.items(), Some("string"));
    }

    #[test]
    fn array_without_items_defaults_to_string() {
        let field = FieldAnnotation::builder().type_name("array").build();
        assert_eq!(
            fragment_json(&field),
            json!({"type": "array", "items": {"type": "string"}})
        );
    }

    #[rstest]
    #[case("int", "integer")]
    #[case("bool", "boolean")]
    #[case("float", "number")]
    #[case("string", "string")]
    fn host_primitives_become_schema_keywords(#[case] raw: &str, #[case] expected: &str) {
        let field = FieldAnnotation::builder().type_name(raw).build();
        assert_eq!(field.type_name(), Some(expected));
    }

    #[test]
    fn union_type_keeps_first_alternative() {
        let field = FieldAnnotation::builder().type_name("int|null").build();
        assert_eq!(field.type_name(), Some("integer"));
        let class = FieldAnnotation::builder().type_name("App\\User | null").build();
        assert_eq!(class.type_name(), Some("App\\User"));
    }

    #[test]
    fn class_type_is_kept_and_normalized_as_host_type() {
        let field = FieldAnnotation::builder()
            .type_name("\\App\\Models\\User")
            .build();
        assert_eq!(field.type_name(), Some("\\App\\Models\\User"));
        assert_eq!(field.host_type(), Some("App\\Models\\User"));
        assert_eq!(field.schema_type(), Some(SchemaType::Object));
    }

    #[test]
    fn object_properties_come_from_example() {
        let field = FieldAnnotation::builder()
            .name("meta")
            .type_name("object")
            .example(json!({"page": 1}))
            .build();
        assert_json_snapshot!(field.to_fragment(&mut ctx()), @r#"
        {
          "type": "object",
          "name": "meta",
          "example": {
            "page": 1
          },
          "properties": {
            "page": {
              "type": "integer",
              "example": 1
            }
          }
        }
        "#);
    }

    #[test]
    fn object_without_example_has_empty_properties() {
        let field = FieldAnnotation::builder().type_name("object").build();
        assert_eq!(fragment_json(&field), json!({"type": "object", "properties": {}}));
    }

    #[test]
    fn type_is_guessed_from_example() {
        let field = FieldAnnotation::builder().example(json!(3)).build();
        assert_eq!(field.schema_type(), Some(SchemaType::Integer));
        assert_eq!(fragment_json(&field), json!({"type": "integer", "example": 3}));
    }

    #[rstest]
    #[case("mixed", json!("x"), json!({"type": "string", "example": "x"}))]
    #[case("App\\Meta", json!(5), json!({"type": "integer", "example": 5}))]
    #[case("integer", json!("7"), json!({"type": "integer", "example": "7"}))]
    fn example_decides_type_without_primitive_mapping(
        #[case] ty: &str,
        #[case] example: Value,
        #[case] expected: Value,
    ) {
        let field = FieldAnnotation::builder().type_name(ty).example(example).build();
        assert_eq!(fragment_json(&field), expected);
    }

    #[test]
    fn mixed_without_example_is_object() {
        let field = FieldAnnotation::builder().type_name("mixed").build();
        assert_eq!(fragment_json(&field), json!({"type": "object", "properties": {}}));
    }

    #[test]
    fn nested_field_extends_scalar_parent_with_properties() {
        let mut tree = SchemaTree::new();
        let mut ctx = ctx();
        for (name, ty) in [("tags", "string"), ("tags.name", "string")] {
            FieldAnnotation::builder()
                .name(name)
                .type_name(ty)
                .exclude_key(SchemaKey::Name)
                .build()
                .merge_into_tree(&mut tree, &mut ctx);
        }
        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!({"tags": {"type": "string", "properties": {"name": {"type": "string"}}}})
        );
    }

    #[test]
    fn no_type_and_no_example_omits_type() {
        let field = FieldAnnotation::builder().name("x").build();
        assert_eq!(fragment_json(&field), json!({"name": "x"}));
    }

    #[test]
    fn optional_keys_are_emitted_in_order() {
        let field = FieldAnnotation::builder()
            .name("email")
            .type_name("string")
            .format("email")
            .required(true)
            .description("Login")
            .example(json!("jane@example.com"))
            .build();
        let json = serde_json::to_string(&field.to_fragment(&mut ctx())).unwrap();
        assert_eq!(
            json,
            r#"{"type":"string","format":"email","name":"email","required":true,"example":"jane@example.com","description":"Login"}"#
        );
    }

    #[test]
    fn example_is_only_synthesized_when_required() {
        let plain = FieldAnnotation::builder().type_name("integer").build();
        assert!(plain.to_fragment(&mut ctx()).example.is_none());

        let required = FieldAnnotation::builder()
            .type_name("integer")
            .example_required(true)
            .build();
        let n = required.to_fragment(&mut ctx()).example.unwrap().as_i64().unwrap();
        assert!((1..=99).contains(&n));
    }

    #[test]
    fn explicit_example_wins_over_synthesis() {
        let field = FieldAnnotation::builder()
            .type_name("integer")
            .example(json!(1000))
            .example_required(true)
            .build();
        assert_eq!(field.to_fragment(&mut ctx()).example, Some(json!(1000)));
    }

    #[test]
    fn synthesis_uses_field_name() {
        let field = FieldAnnotation::builder()
            .name("password")
            .type_name("string")
            .example_required(true)
            .build();
        let example = field.to_fragment(&mut ctx()).example.unwrap();
        let len = example.as_str().unwrap().len();
        assert!((16..=36).contains(&len));
    }

    #[rstest]
    #[case("user.email")]
    #[case("account.owner.mail")]
    fn nested_names_use_leaf_for_email_rule(#[case] name: &str) {
        for seed in 0..20 {
            let mut ctx = DescribeContext::new(DescribeConfig {
                seed: Some(seed),
                ..DescribeConfig::default()
            });
            let field = FieldAnnotation::builder()
                .name(name)
                .type_name("string")
                .example_required(true)
                .build();
            let schema = field.to_fragment(&mut ctx);
            assert_eq!(schema.name.as_deref(), Some(name));
            let example = schema.example.unwrap();
            let (local, domain) = example.as_str().unwrap().split_once('@').unwrap();
            assert!(!local.is_empty());
            assert!(domain.contains('.'));
        }
    }

    #[test]
    fn nested_password_uses_leaf_name() {
        let field = FieldAnnotation::builder()
            .name("credentials.password")
            .type_name("string")
            .example_required(true)
            .build();
        assert_eq!(field.leaf_name(), Some("password"));
        let example = field.to_fragment(&mut ctx()).example.unwrap();
        assert!((16..=36).contains(&example.as_str().unwrap().len()));
    }

    #[test]
    fn binary_format_gets_marker_example() {
        let field = FieldAnnotation::builder()
            .name("avatar")
            .type_name("string")
            .format("binary")
            .example_required(true)
            .build();
        assert_eq!(field.to_fragment(&mut ctx()).example, Some(json!("binary")));
    }

    #[test]
    fn unresolvable_example_is_omitted() {
        let field = FieldAnnotation::builder()
            .name("owner")
            .type_name("App\\User")
            .example_required(true)
            .build();
        let schema = field.to_fragment(&mut ctx());
        assert!(schema.example.is_none());
        assert_eq!(schema.properties, Some(Default::default()));
    }

    #[test]
    fn date_types_get_format_and_date_example() {
        let field = FieldAnnotation::builder()
            .name("born_at")
            .type_name("date")
            .example_required(true)
            .build();
        let schema = field.to_fragment(&mut ctx());
        assert_eq!(schema.schema_type, Some(SchemaType::String));
        assert_eq!(schema.format.as_deref(), Some("date"));
        let example = schema.example.unwrap();
        chrono::NaiveDate::parse_from_str(example.as_str().unwrap(), "%Y-%m-%d").unwrap();
    }

    #[test]
    fn exclude_keys_removes_unconditionally() {
        let field = FieldAnnotation::builder()
            .name("id")
            .type_name("integer")
            .format("int64")
            .exclude_key(SchemaKey::Format)
            .exclude_key(SchemaKey::Name)
            .build();
        assert_eq!(fragment_json(&field), json!({"type": "integer"}));
    }

    #[rstest]
    #[case(None, json!({"type": "string"}))]
    #[case(Some(""), json!({"type": "string"}))]
    #[case(Some("Nickname"), json!({"type": "string", "description": "Nickname"}))]
    fn exclude_empty_keys_removes_only_empty(#[case] description: Option<&str>, #[case] expected: Value) {
        let mut builder = FieldAnnotation::builder()
            .type_name("string")
            .exclude_empty_key(SchemaKey::Description);
        if let Some(description) = description {
            builder = builder.description(description);
        }
        assert_eq!(fragment_json(&builder.build()), expected);
    }

    #[test]
    fn exclude_empty_required_false() {
        let field = FieldAnnotation::builder()
            .type_name("string")
            .required(false)
            .exclude_empty_key(SchemaKey::Required)
            .build();
        assert_eq!(fragment_json(&field), json!({"type": "string"}));
    }

    #[rstest]
    #[case(Some("address.city"), true)]
    #[case(Some("city"), false)]
    #[case(None, false)]
    fn is_nested_cases(#[case] name: Option<&str>, #[case] expected: bool) {
        let mut builder = FieldAnnotation::builder();
        if let Some(name) = name {
            builder = builder.name(name);
        }
        let field = builder.build();
        assert_eq!(field.is_nested(), expected);
        assert_eq!(field.is_nested(), expected);
    }

    #[test]
    fn merge_flat_field() {
        let mut tree = SchemaTree::new();
        FieldAnnotation::builder()
            .name("id")
            .type_name("int")
            .build()
            .merge_into_tree(&mut tree, &mut ctx());
        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!({"id": {"type": "integer", "name": "id"}})
        );
    }

    #[test]
    fn merge_nested_field_creates_parents() {
        let mut tree = SchemaTree::new();
        FieldAnnotation::builder()
            .name("user.address.city")
            .type_name("string")
            .exclude_key(SchemaKey::Name)
            .build()
            .merge_into_tree(&mut tree, &mut ctx());
        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!({"user": {"type": "object", "properties": {
                "address": {"type": "object", "properties": {
                    "city": {"type": "string"}
                }}
            }}})
        );
    }

    #[test]
    fn merge_nested_leaf_overwrites_previous_leaf() {
        let mut tree = SchemaTree::new();
        let mut ctx = ctx();
        for ty in ["string", "integer"] {
            FieldAnnotation::builder()
                .name("a.b")
                .type_name(ty)
                .exclude_key(SchemaKey::Name)
                .build()
                .merge_into_tree(&mut tree, &mut ctx);
        }
        assert_eq!(
            tree.get_path("a.b").and_then(|s| s.schema_type),
            Some(SchemaType::Integer)
        );
    }

    #[test]
    fn display_prints_name() {
        let field = FieldAnnotation::builder().name("email").build();
        assert_eq!(field.to_string(), "email");
        assert_eq!(FieldAnnotation::default().to_string(), "");
    }
}
