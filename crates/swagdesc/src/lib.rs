//! Swagdesc - OpenAPI schema fragments from values and type annotations
//!
//! This crate turns runtime sample values, declared field annotations and
//! registered classes into OpenAPI/Swagger schema fragments with synthesized
//! examples, and assembles them into nested schema trees.
//!
//! ```
//! use swagdesc::{DescribeContext, FieldAnnotation, tree};
//!
//! let mut ctx = DescribeContext::default();
//! let fields = [
//!     FieldAnnotation::builder().name("address.city").type_name("string").build(),
//!     FieldAnnotation::builder().name("address.zip").type_name("int").build(),
//! ];
//! let schema = tree::build(&fields, &mut ctx);
//! assert_eq!(schema.get("address").and_then(|a| a.properties.as_ref()).map(|p| p.len()), Some(2));
//! ```

// Re-export swagdesc_core types so users don't need to depend on swagdesc_core directly
pub mod schema {
    pub use swagdesc_core::schema::*;
}

pub mod class;
pub mod config;
pub mod context;
pub mod describe;
pub mod error;
pub mod example;
pub mod fabricate;
pub mod field;
pub mod registry;
pub mod tree;
pub mod types;

pub use class::{ClassPropertyExtractor, ResponseClass, With};
pub use config::DescribeConfig;
pub use context::DescribeContext;
pub use describe::{Describable, RequestContext, ValueDescriber};
pub use error::{Error, Result};
pub use example::ExampleSynthesizer;
pub use fabricate::SampleFabricator;
pub use field::{FieldAnnotation, FieldAnnotationBuilder};
pub use registry::{Member, MemberDescriptor, StaticRegistry, TypeRegistry};
pub use tree::SchemaTreeBuilder;
