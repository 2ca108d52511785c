//! Example value synthesis.
//!
//! Resolution is two-tier: a field name from a well-known vocabulary
//! (`email`, `password`, ...) picks a semantic rule when the declared type is
//! generic, otherwise the type alone picks a generator. Names match exactly
//! and are English-only.

use chrono::{Duration, Utc};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde_json::Value;
use tracing::debug;

use crate::config::DescribeConfig;
use crate::types::{Temporal, strip_namespace_prefix, temporal_kind};

/// Types that carry no semantic hint and defer to the field name
const GENERAL_TYPES: &[&str] = &["string", "mixed", "null"];

/// Field names mapped to the rule that generates their examples
const NAME_RULES: &[(&str, &[&str])] = &[
    ("url", &["url"]),
    ("email", &["email", "mail"]),
    ("password", &["password", "pass", "remember_token", "email_token"]),
    ("domainName", &["domain", "domainName"]),
];

const STRING_POOL: &[&str] = &["string", "value", "str value"];
const ALPHA_NUM_POOL: &[&str] = &["string35", "value90", "str20value"];
const ALPHA_DASH_POOL: &[&str] = &["string_35", "value-90", "str_20-value"];

const DOMAIN_WORDS: &[&str] = &[
    "example", "acme", "globex", "initech", "northwind", "umbrella", "hooli", "vandelay",
];
const TLDS: &[&str] = &["com", "net", "org", "io", "info", "biz"];
const FIRST_NAMES: &[&str] = &["jane", "john", "alice", "bob", "maria", "omar", "li", "sara"];
const LAST_NAMES: &[&str] = &["doe", "smith", "jones", "garcia", "chen", "novak", "khan"];
const PATH_WORDS: &[&str] = &["about", "docs", "blog", "products", "help", "news"];
const PASSWORD_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()-_=+";

/// Date examples are drawn from this many days back to now
const DATE_WINDOW_DAYS: i64 = 30;

/// Generates example values for types, field names and validation rules
pub struct ExampleSynthesizer<'a> {
    rng: &'a mut StdRng,
    config: &'a DescribeConfig,
}

impl<'a> ExampleSynthesizer<'a> {
    pub fn new(rng: &'a mut StdRng, config: &'a DescribeConfig) -> Self {
        Self { rng, config }
    }

    /// Example for `ty`, optionally refined by `field_name`.
    ///
    /// Returns `None` when no rule applies; callers omit the example then.
    pub fn synthesize(&mut self, ty: &str, field_name: Option<&str>) -> Option<Value> {
        let ty = strip_namespace_prefix(ty);
        if GENERAL_TYPES.contains(&ty)
            && let Some(name) = field_name
            && let Some(value) = self.synthesize_by_name(name)
        {
            return Some(value);
        }
        let value = match ty {
            "int" | "integer" => self.integer(),
            "float" | "double" | "number" => self.float(),
            "string" => self.pick(STRING_POOL),
            "bool" | "boolean" => self.boolean(),
            "array" => Value::Array(Vec::new()),
            other => match temporal_kind(other) {
                Some(Temporal::Date) => self.date("%Y-%m-%d"),
                Some(Temporal::DateTime) => self.date("%Y-%m-%d %H:%M:%S"),
                None => {
                    debug!(ty = other, "no example generator for type");
                    return None;
                }
            },
        };
        Some(value)
    }

    /// Example for a validation rule (`email`, `alpha_dash`, `ipv6`, ...)
    pub fn synthesize_by_rule(&mut self, rule: &str) -> Option<Value> {
        let value = match rule {
            "url" => Value::String(self.url()),
            "email" => Value::String(self.email()),
            "password" => Value::String(self.password()),
            "domainName" => Value::String(self.domain_name()),
            "alpha" | "string" => self.pick(STRING_POOL),
            "alpha_num" => self.pick(ALPHA_NUM_POOL),
            "alpha_dash" => self.pick(ALPHA_DASH_POOL),
            "ip" | "ipv4" => Value::String(self.ipv4()),
            "ipv6" => Value::String(self.ipv6()),
            "float" => self.float(),
            "date" => self.date("%Y-%m-%d"),
            "numeric" | "integer" => self.integer(),
            "boolean" => self.boolean(),
            _ => {
                debug!(rule, "no example generator for rule");
                return None;
            }
        };
        Some(value)
    }

    fn synthesize_by_name(&mut self, name: &str) -> Option<Value> {
        let (rule, _) = NAME_RULES
            .iter()
            .find(|(_, names)| names.contains(&name))?;
        self.synthesize_by_rule(rule)
    }

    fn integer(&mut self) -> Value {
        Value::from(self.rng.random_range(1..=99_i64))
    }

    fn float(&mut self) -> Value {
        let cents = self.rng.random_range(0..100_000_u32);
        Value::from(f64::from(cents) / 100.0)
    }

    fn boolean(&mut self) -> Value {
        Value::Bool(self.rng.random_bool(0.5))
    }

    fn pick(&mut self, pool: &[&str]) -> Value {
        let picked = pool.choose(&mut *self.rng).copied().unwrap_or_default();
        Value::String(picked.to_string())
    }

    fn word(&mut self, pool: &[&'static str]) -> &'static str {
        pool.choose(&mut *self.rng).copied().unwrap_or_default()
    }

    fn date(&mut self, format: &str) -> Value {
        let seconds_back = self.rng.random_range(0..DATE_WINDOW_DAYS * 24 * 60 * 60);
        let at = Utc::now() - Duration::seconds(seconds_back);
        Value::String(at.format(format).to_string())
    }

    fn domain_name(&mut self) -> String {
        format!("{}.{}", self.word(DOMAIN_WORDS), self.word(TLDS))
    }

    fn url(&mut self) -> String {
        let domain = self.domain_name();
        if self.rng.random_bool(0.5) {
            format!("https://www.{domain}/")
        } else {
            format!("https://www.{domain}/{}", self.word(PATH_WORDS))
        }
    }

    fn email(&mut self) -> String {
        let first = self.word(FIRST_NAMES);
        let last = self.word(LAST_NAMES);
        let domain = self.domain_name();
        format!("{first}.{last}@{domain}")
    }

    fn password(&mut self) -> String {
        let min = self.config.password_min_length;
        let max = self.config.password_max_length.max(min);
        let len = self.rng.random_range(min..=max);
        (0..len)
            .map(|_| {
                let idx = self.rng.random_range(0..PASSWORD_CHARSET.len());
                char::from(PASSWORD_CHARSET[idx])
            })
            .collect()
    }

    fn ipv4(&mut self) -> String {
        let first = self.rng.random_range(1..=223_u8);
        let [b, c, d]: [u8; 3] = self.rng.random();
        format!("{first}.{b}.{c}.{d}")
    }

    fn ipv6(&mut self) -> String {
        let groups: [u16; 8] = self.rng.random();
        groups
            .iter()
            .map(|g| format!("{g:x}"))
            .collect::<Vec<_>>()
            .join(":")
    }
}
