//! Engine configuration

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default password bounds of the `password` example rule
pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 16;
pub const DEFAULT_PASSWORD_MAX_LENGTH: usize = 36;
/// Default nesting limit for value and member description
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Settings for one document build.
///
/// Every field is optional in a config document; missing fields take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct DescribeConfig {
    /// Seed for the example generator. `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub password_min_length: usize,
    pub password_max_length: usize,
    /// Nesting depth after which values are truncated to `{type: object}`
    pub max_depth: usize,
    /// Reject unknown keys when building field models from config maps
    pub strict_options: bool,
}

impl Default for DescribeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            password_min_length: DEFAULT_PASSWORD_MIN_LENGTH,
            password_max_length: DEFAULT_PASSWORD_MAX_LENGTH,
            max_depth: DEFAULT_MAX_DEPTH,
            strict_options: true,
        }
    }
}

impl DescribeConfig {
    /// Defaults overridden by `SWAGDESC_*` environment variables.
    ///
    /// Recognised: `SWAGDESC_SEED`, `SWAGDESC_PASSWORD_MIN`,
    /// `SWAGDESC_PASSWORD_MAX`, `SWAGDESC_MAX_DEPTH`, `SWAGDESC_STRICT_OPTIONS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an explicit variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(seed) = lookup("SWAGDESC_SEED") {
            config.seed = Some(parse_var("SWAGDESC_SEED", &seed)?);
        }
        if let Some(min) = lookup("SWAGDESC_PASSWORD_MIN") {
            config.password_min_length = parse_var("SWAGDESC_PASSWORD_MIN", &min)?;
        }
        if let Some(max) = lookup("SWAGDESC_PASSWORD_MAX") {
            config.password_max_length = parse_var("SWAGDESC_PASSWORD_MAX", &max)?;
        }
        if let Some(depth) = lookup("SWAGDESC_MAX_DEPTH") {
            config.max_depth = parse_var("SWAGDESC_MAX_DEPTH", &depth)?;
        }
        if let Some(strict) = lookup("SWAGDESC_STRICT_OPTIONS") {
            config.strict_options = parse_var("SWAGDESC_STRICT_OPTIONS", &strict)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.password_min_length == 0 {
            return Err(Error::Config {
                reason: "password_min_length must be positive".to_string(),
            });
        }
        if self.password_min_length > self.password_max_length {
            return Err(Error::Config {
                reason: format!(
                    "password_min_length ({}) exceeds password_max_length ({})",
                    self.password_min_length, self.password_max_length
                ),
            });
        }
        if self.max_depth == 0 {
            return Err(Error::Config {
                reason: "max_depth must be positive".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| Error::Config {
        reason: format!("{key}={raw}: {e}"),
    })
}
