//! Schema fragment types shared by the swagdesc engine and document assemblers.

pub mod schema;

pub use schema::{FORMAT_BINARY, Schema, SchemaKey, SchemaTree, SchemaType};
