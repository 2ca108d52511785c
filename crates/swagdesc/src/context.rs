//! Per-build state: configuration, example generator and lookup caches

use std::collections::HashMap;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;
use swagdesc_core::schema::Schema;
use tracing::debug;

use crate::config::DescribeConfig;
use crate::describe::ValueDescriber;
use crate::error::{Error, Result};
use crate::example::ExampleSynthesizer;
use crate::fabricate::SampleFabricator;
use crate::registry::{Member, StaticRegistry, TypeRegistry};
use crate::types::normalize;

/// State scoped to one document build.
///
/// Holds the lazily created example generator, the type registry with a
/// member cache keyed by normalized class name, and an optional sample
/// fabricator whose results are cached by type name. Caches are filled once
/// and never invalidated.
pub struct DescribeContext {
    config: DescribeConfig,
    rng: Option<StdRng>,
    registry: Box<dyn TypeRegistry>,
    members: HashMap<String, Rc<[Member]>>,
    fabricator: Option<Box<dyn SampleFabricator>>,
    samples: HashMap<String, Value>,
}

impl Default for DescribeContext {
    fn default() -> Self {
        Self::new(DescribeConfig::default())
    }
}

impl std::fmt::Debug for DescribeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescribeContext")
            .field("config", &self.config)
            .field("cached_members", &self.members.len())
            .field("cached_samples", &self.samples.len())
            .finish_non_exhaustive()
    }
}

impl DescribeContext {
    pub fn new(config: DescribeConfig) -> Self {
        Self {
            config,
            rng: None,
            registry: Box::new(StaticRegistry::new()),
            members: HashMap::new(),
            fabricator: None,
            samples: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_registry<R>(mut self, registry: R) -> Self
    where
        R: TypeRegistry + 'static,
    {
        self.registry = Box::new(registry);
        self.members.clear();
        self
    }

    #[must_use]
    pub fn with_fabricator<F>(mut self, fabricator: F) -> Self
    where
        F: SampleFabricator + 'static,
    {
        self.fabricator = Some(Box::new(fabricator));
        self.samples.clear();
        self
    }

    pub fn config(&self) -> &DescribeConfig {
        &self.config
    }

    pub fn registry(&self) -> &dyn TypeRegistry {
        self.registry.as_ref()
    }

    /// Example generator, seeded from the config on first use
    pub fn synthesizer(&mut self) -> ExampleSynthesizer<'_> {
        let seed = self.config.seed;
        let rng = self.rng.get_or_insert_with(|| match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        });
        ExampleSynthesizer::new(rng, &self.config)
    }

    pub fn describer(&self) -> ValueDescriber {
        ValueDescriber::new(self.config.max_depth)
    }

    /// Whether `name` resolves to a registered type
    pub fn resolves(&self, name: &str) -> bool {
        self.registry.resolve(&normalize(name))
    }

    /// Members of a registered class, cached per normalized name
    pub fn members_of(&mut self, class_name: &str) -> Result<Rc<[Member]>> {
        let key = normalize(class_name);
        if let Some(members) = self.members.get(&key) {
            return Ok(Rc::clone(members));
        }
        if !self.registry.resolve(&key) {
            return Err(Error::ClassNotFound {
                name: class_name.to_string(),
            });
        }
        let members: Rc<[Member]> = self.registry.members_of(&key).into();
        debug!(class = %key, count = members.len(), "cached class members");
        self.members.insert(key, Rc::clone(&members));
        Ok(members)
    }

    /// Sample instance of `type_name`, fabricated once per build
    pub fn sample_of(&mut self, type_name: &str) -> Result<&Value> {
        let key = normalize(type_name);
        if !self.samples.contains_key(&key) {
            let fabricator = self.fabricator.as_mut().ok_or_else(|| Error::Fabrication {
                type_name: type_name.to_string(),
                reason: "no sample fabricator configured".to_string(),
            })?;
            let sample = fabricator.sample_of(&key)?;
            debug!(type_name = %key, "fabricated sample");
            self.samples.insert(key.clone(), sample);
        }
        self.samples.get(&key).ok_or_else(|| Error::Fabrication {
            type_name: type_name.to_string(),
            reason: "sample cache miss".to_string(),
        })
    }

    /// Describe the fabricated sample of `type_name` as an object
    pub fn describe_sample(&mut self, type_name: &str) -> Result<Schema> {
        let describer = self.describer();
        let sample = self.sample_of(type_name)?;
        describer.describe_serialize(sample)
    }
}
