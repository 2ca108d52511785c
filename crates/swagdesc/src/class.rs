//! Whole-class response descriptions.
//!
//! [`ResponseClass`] names a registered class and optionally some of its
//! read-only members. Its content is an object schema with one property per
//! member, each described from the member's declared type and a synthesized
//! example.

use std::rc::Rc;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use swagdesc_core::schema::{Schema, SchemaType};
use tracing::{debug, warn};

use crate::context::DescribeContext;
use crate::error::{Error, Result};
use crate::registry::{Member, MemberDescriptor};
use crate::types::{element_type, first_alternative, is_array_shorthand, to_schema_type};

/// Options recognised in response class configuration maps
const OPTIONS: &[&str] = &["content", "with", "description"];

/// Members of one registered class
#[derive(Debug, Clone)]
pub struct ClassPropertyExtractor {
    class_name: String,
    members: Rc<[Member]>,
}

impl ClassPropertyExtractor {
    /// Look up `class_name` in the context registry
    pub fn new(class_name: &str, ctx: &mut DescribeContext) -> Result<Self> {
        let members = ctx.members_of(class_name)?;
        Ok(Self {
            class_name: class_name.to_string(),
            members,
        })
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Declared members
    pub fn properties(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|member| !member.read_only)
    }

    /// Read-only members among `selected`
    pub fn properties_read<'a>(&'a self, selected: &'a [String]) -> impl Iterator<Item = &'a Member> {
        self.members
            .iter()
            .filter(move |member| member.read_only && selected.contains(&member.name))
    }
}

/// Read-only member selectors: one name or a list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum With {
    One(String),
    Many(Vec<String>),
}

impl With {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(name) => vec![name],
            Self::Many(names) => names,
        }
    }
}

impl From<&str> for With {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl From<Vec<String>> for With {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

/// Response described by a registered class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseClass {
    pub content: Option<String>,
    pub with: Vec<String>,
    pub description: Option<String>,
}

impl ResponseClass {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with(mut self, with: impl Into<With>) -> Self {
        self.with = with.into().into_vec();
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Build from a configuration map; a bare `value` key names the class
    pub fn from_config(config: &Map<String, Value>, strict: bool) -> Result<Self> {
        let mut response = Self::default();
        for (key, value) in config {
            let option = if key == "value" { "content" } else { key.as_str() };
            if value.is_null() {
                continue;
            }
            match option {
                "content" | "description" => {
                    let text = value.as_str().map(str::to_string).ok_or_else(|| {
                        Error::InvalidOption {
                            option: option.to_string(),
                            reason: format!("expected a string, got {value}"),
                        }
                    })?;
                    if option == "content" {
                        response.content = Some(text);
                    } else {
                        response.description = Some(text);
                    }
                }
                "with" => {
                    let with = With::deserialize(value).map_err(|err| Error::InvalidOption {
                        option: option.to_string(),
                        reason: err.to_string(),
                    })?;
                    response.with = with.into_vec();
                }
                unknown if strict => {
                    return Err(Error::UnknownOption {
                        option: unknown.to_string(),
                    });
                }
                unknown => {
                    debug!(option = unknown, known = ?OPTIONS, "ignoring unknown response option");
                }
            }
        }
        Ok(response)
    }

    /// Object schema of the named class.
    ///
    /// Declared members come first, then the selected read-only members,
    /// which replace declared members of the same name. Fails with
    /// [`Error::ClassNotFound`] when the class is missing or unregistered.
    pub fn resolve_content(&self, ctx: &mut DescribeContext) -> Result<Schema> {
        let class_name = self.content.as_deref().unwrap_or_default();
        if class_name.is_empty() {
            return Err(Error::ClassNotFound {
                name: class_name.to_string(),
            });
        }
        let extractor = ClassPropertyExtractor::new(class_name, ctx)?;

        let mut members: IndexMap<&str, &MemberDescriptor> = IndexMap::new();
        for member in extractor
            .properties()
            .chain(extractor.properties_read(&self.with))
        {
            members.insert(member.name.as_str(), &member.descriptor);
        }

        let properties = members
            .into_iter()
            .map(|(name, descriptor)| (name.to_string(), describe_member(name, descriptor, ctx, 1)))
            .collect();
        Ok(Schema::object_with(properties))
    }

    /// Content schema with the response description attached
    pub fn to_fragment(&self, ctx: &mut DescribeContext) -> Result<Schema> {
        let mut schema = self.resolve_content(ctx)?;
        schema.description.clone_from(&self.description);
        Ok(schema)
    }
}

fn describe_member(
    name: &str,
    descriptor: &MemberDescriptor,
    ctx: &mut DescribeContext,
    depth: usize,
) -> Schema {
    let max_depth = ctx.config().max_depth;
    if depth >= max_depth {
        warn!(member = name, depth, "class members nest too deep, truncating to object");
        return Schema::new(SchemaType::Object);
    }

    let mut schema = Schema {
        description: descriptor.description.clone(),
        ..Schema::default()
    };

    if let Some(nested) = &descriptor.properties {
        schema.schema_type = Some(
            descriptor
                .type_name
                .as_deref()
                .map_or(SchemaType::Object, to_schema_type),
        );
        schema.properties = Some(
            nested
                .iter()
                .map(|(key, child)| (key.clone(), describe_member(key, child, ctx, depth + 1)))
                .collect(),
        );
        return schema;
    }

    let Some(type_name) = descriptor.type_name.as_deref() else {
        return schema;
    };
    let ty = first_alternative(type_name);
    schema.schema_type = Some(to_schema_type(ty));

    let example = ctx.synthesizer().synthesize(ty, Some(name));
    match example {
        Some(example) => {
            let described = ctx.describer().describe(&example, true);
            schema.schema_type = described.schema_type.or(schema.schema_type);
            schema.example = described.example;
            schema.properties = described.properties;
            schema.items = described.items;
        }
        None if is_array_shorthand(ty) => {
            let items = element_type(ty).map_or(SchemaType::String, |el| to_schema_type(&el));
            schema.items = Some(Box::new(Schema::new(items)));
        }
        None => {}
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DescribeConfig;
    use crate::registry::StaticRegistry;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn registry() -> StaticRegistry {
        StaticRegistry::new().with_class(
            "App\\Models\\User",
            [
                Member::declared("id", MemberDescriptor::typed("int")),
                Member::declared("email", MemberDescriptor::typed("string").with_description("Login")),
                Member::declared("nickname", MemberDescriptor::typed("string|null")),
                Member::declared("tags", MemberDescriptor::typed("string[]")),
                Member::declared(
                    "address",
                    MemberDescriptor::nested([
                        ("city", MemberDescriptor::typed("string")),
                        ("zip", MemberDescriptor::typed("int")),
                    ]),
                ),
                Member::read_only("posts_count", MemberDescriptor::typed("int")),
                Member::read_only("avatar_url", MemberDescriptor::typed("string")),
            ],
        )
    }

    fn ctx() -> DescribeContext {
        DescribeContext::new(DescribeConfig {
            seed: Some(5),
            ..DescribeConfig::default()
        })
        .with_registry(registry())
    }

    fn property_names(schema: &Schema) -> Vec<String> {
        schema.properties.as_ref().unwrap().keys().cloned().collect()
    }

    #[test]
    fn extractor_splits_declared_and_read_only() {
        let extractor = ClassPropertyExtractor::new("App\\Models\\User", &mut ctx()).unwrap();
        assert_eq!(extractor.properties().count(), 5);
        let selected = vec!["posts_count".to_string(), "missing".to_string()];
        let read: Vec<_> = extractor.properties_read(&selected).map(|m| m.name.as_str()).collect();
        assert_eq!(read, vec!["posts_count"]);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("App\\Models\\Ghost"))]
    fn missing_class_is_fatal(#[case] content: Option<&str>) {
        let response = ResponseClass {
            content: content.map(str::to_string),
            ..ResponseClass::default()
        };
        let err = response.resolve_content(&mut ctx()).unwrap_err();
        assert!(matches!(err, Error::ClassNotFound { .. }));
    }

    #[test]
    fn content_is_object_of_declared_members() {
        let schema = ResponseClass::new("\\App\\Models\\User")
            .resolve_content(&mut ctx())
            .unwrap();
        assert_eq!(schema.schema_type, Some(SchemaType::Object));
        assert_eq!(
            property_names(&schema),
            vec!["id", "email", "nickname", "tags", "address"]
        );
    }

    #[test]
    fn selected_read_only_members_come_last() {
        let schema = ResponseClass::new("App\\Models\\User")
            .with("posts_count")
            .resolve_content(&mut ctx())
            .unwrap();
        assert_eq!(property_names(&schema).last().map(String::as_str), Some("posts_count"));
        assert_eq!(property_names(&schema).len(), 6);
    }

    #[test]
    fn members_are_described_with_examples() {
        let schema = ResponseClass::new("App\\Models\\User")
            .resolve_content(&mut ctx())
            .unwrap();
        let properties = schema.properties.unwrap();

        let id = &properties["id"];
        assert_eq!(id.schema_type, Some(SchemaType::Integer));
        assert!(id.example.as_ref().is_some_and(Value::is_i64));

        let email = &properties["email"];
        assert_eq!(email.description.as_deref(), Some("Login"));
        assert!(email.example.as_ref().and_then(Value::as_str).is_some_and(|e| e.contains('@')));

        let nickname = &properties["nickname"];
        assert_eq!(nickname.schema_type, Some(SchemaType::String));
    }

    #[test]
    fn array_members_get_items_from_element_type() {
        let schema = ResponseClass::new("App\\Models\\User")
            .resolve_content(&mut ctx())
            .unwrap();
        let tags = &schema.properties.unwrap()["tags"];
        assert_eq!(tags.schema_type, Some(SchemaType::Array));
        assert_eq!(tags.items.as_deref(), Some(&Schema::string()));
        assert!(tags.example.is_none());
    }

    #[test]
    fn nested_members_recurse() {
        let schema = ResponseClass::new("App\\Models\\User")
            .resolve_content(&mut ctx())
            .unwrap();
        let address = &schema.properties.unwrap()["address"];
        assert_eq!(address.schema_type, Some(SchemaType::Object));
        let nested = address.properties.as_ref().unwrap();
        assert_eq!(nested["city"].schema_type, Some(SchemaType::String));
        assert_eq!(nested["zip"].schema_type, Some(SchemaType::Integer));
        assert!(nested["zip"].example.is_some());
    }

    #[test]
    fn depth_guard_truncates_nested_members() {
        let mut ctx = DescribeContext::new(DescribeConfig {
            max_depth: 2,
            ..DescribeConfig::default()
        })
        .with_registry(registry());
        let schema = ResponseClass::new("App\\Models\\User")
            .resolve_content(&mut ctx)
            .unwrap();
        let address = &schema.properties.unwrap()["address"];
        assert_eq!(
            address.properties.as_ref().unwrap()["city"],
            Schema::new(SchemaType::Object)
        );
    }

    #[test]
    fn from_config_accepts_single_or_list_selectors() {
        let single = ResponseClass::from_config(
            json!({"value": "App\\User", "with": "posts"}).as_object().unwrap(),
            true,
        )
        .unwrap();
        assert_eq!(single.content.as_deref(), Some("App\\User"));
        assert_eq!(single.with, vec!["posts"]);

        let many = ResponseClass::from_config(
            json!({"content": "App\\User", "with": ["posts", "likes"]}).as_object().unwrap(),
            true,
        )
        .unwrap();
        assert_eq!(many.with, vec!["posts", "likes"]);
    }

    #[test]
    fn from_config_rejects_bad_options() {
        let unknown =
            ResponseClass::from_config(json!({"value": "User", "status": 200}).as_object().unwrap(), true);
        assert!(matches!(unknown, Err(Error::UnknownOption { option }) if option == "status"));

        let lenient =
            ResponseClass::from_config(json!({"value": "User", "status": 200}).as_object().unwrap(), false);
        assert!(lenient.is_ok());

        let invalid = ResponseClass::from_config(json!({"with": 3}).as_object().unwrap(), true);
        assert!(matches!(invalid, Err(Error::InvalidOption { option, .. }) if option == "with"));
    }

    #[test]
    fn fragment_carries_description() {
        let schema = ResponseClass::new("App\\Models\\User")
            .description("The user")
            .to_fragment(&mut ctx())
            .unwrap();
        assert_eq!(schema.description.as_deref(), Some("The user"));
    }
}
