//! Sample object fabrication

use serde_json::Value;

use crate::error::Result;

/// Produces sample instances of host types, e.g. by loading an existing
/// record or creating and persisting a new one.
pub trait SampleFabricator {
    fn sample_of(&mut self, type_name: &str) -> Result<Value>;
}

impl<F> SampleFabricator for F
where
    F: FnMut(&str) -> Result<Value>,
{
    fn sample_of(&mut self, type_name: &str) -> Result<Value> {
        self(type_name)
    }
}
