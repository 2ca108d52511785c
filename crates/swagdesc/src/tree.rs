//! Assembly of field fragments into one schema tree

use swagdesc_core::schema::SchemaTree;
use tracing::debug;

use crate::context::DescribeContext;
use crate::field::FieldAnnotation;

/// Incrementally merges fields into a [`SchemaTree`].
///
/// Sibling keys keep the order in which fields were added. Intermediate
/// object nodes of dotted names are created once and only extended.
#[derive(Debug, Default)]
pub struct SchemaTreeBuilder {
    tree: SchemaTree,
}

impl SchemaTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue building on an existing tree
    pub fn from_tree(tree: SchemaTree) -> Self {
        Self { tree }
    }

    pub fn add(&mut self, field: &FieldAnnotation, ctx: &mut DescribeContext) -> &mut Self {
        debug!(field = %field, nested = field.is_nested(), "adding field to schema tree");
        field.merge_into_tree(&mut self.tree, ctx);
        self
    }

    pub fn extend<'a, I>(&mut self, fields: I, ctx: &mut DescribeContext) -> &mut Self
    where
        I: IntoIterator<Item = &'a FieldAnnotation>,
    {
        for field in fields {
            self.add(field, ctx);
        }
        self
    }

    pub fn finish(self) -> SchemaTree {
        self.tree
    }
}

/// Fold all fields into a fresh tree, in input order
pub fn build<'a, I>(fields: I, ctx: &mut DescribeContext) -> SchemaTree
where
    I: IntoIterator<Item = &'a FieldAnnotation>,
{
    let mut builder = SchemaTreeBuilder::new();
    builder.extend(fields, ctx);
    builder.finish()
}
