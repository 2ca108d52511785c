//! Type registry contract and an in-memory implementation

use indexmap::IndexMap;
use serde::Deserialize;

use crate::types::strip_namespace_prefix;

/// Declared shape of one class member as reported by the host.
///
/// Either a plain type annotation (`int`, `string|null`, `App\Address`) or a
/// pre-built tree of nested members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MemberDescriptor {
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub description: Option<String>,
    pub properties: Option<IndexMap<String, MemberDescriptor>>,
}

impl MemberDescriptor {
    pub fn typed(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    pub fn nested<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, MemberDescriptor)>,
        K: Into<String>,
    {
        Self {
            type_name: Some("object".to_string()),
            description: None,
            properties: Some(
                properties
                    .into_iter()
                    .map(|(name, descriptor)| (name.into(), descriptor))
                    .collect(),
            ),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One member of a registered class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub descriptor: MemberDescriptor,
    /// Read-only (computed) members are only described on request
    pub read_only: bool,
}

impl Member {
    pub fn declared(name: impl Into<String>, descriptor: MemberDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
            read_only: false,
        }
    }

    pub fn read_only(name: impl Into<String>, descriptor: MemberDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
            read_only: true,
        }
    }
}

/// Lookup of describable host types
pub trait TypeRegistry {
    /// Whether `name` resolves to a known type
    fn resolve(&self, name: &str) -> bool;

    /// Members of `name`, declared members first. Unknown types yield nothing.
    fn members_of(&self, name: &str) -> Vec<Member>;
}

/// Registry backed by an explicit class list.
///
/// Lookups ignore case and leading namespace separators, so `\App\User`,
/// `App\User` and `app\user` name the same class.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    classes: IndexMap<String, Vec<Member>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a class
    pub fn register<I>(&mut self, name: &str, members: I)
    where
        I: IntoIterator<Item = Member>,
    {
        self.classes
            .insert(registry_key(name), members.into_iter().collect());
    }

    #[must_use]
    pub fn with_class<I>(mut self, name: &str, members: I) -> Self
    where
        I: IntoIterator<Item = Member>,
    {
        self.register(name, members);
        self
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl TypeRegistry for StaticRegistry {
    fn resolve(&self, name: &str) -> bool {
        self.classes.contains_key(&registry_key(name))
    }

    fn members_of(&self, name: &str) -> Vec<Member> {
        self.classes
            .get(&registry_key(name))
            .cloned()
            .unwrap_or_default()
    }
}

fn registry_key(name: &str) -> String {
    strip_namespace_prefix(name.trim()).to_lowercase()
}
