//! Errors raised while building schema fragments

/// Engine error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A class-backed field names a type the registry does not know
    #[error("Class '{name}' not found")]
    ClassNotFound { name: String },
    /// A configuration map carries a key no field model recognises
    #[error("unknown option: `{option}`")]
    UnknownOption { option: String },
    /// A recognised option holds a value of the wrong kind
    #[error("invalid value for option `{option}`: {reason}")]
    InvalidOption { option: String, reason: String },
    /// The sample fabricator failed to produce an instance
    #[error("failed to fabricate sample of `{type_name}`: {reason}")]
    Fabrication { type_name: String, reason: String },
    /// Engine configuration is inconsistent
    #[error("invalid configuration: {reason}")]
    Config { reason: String },
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
