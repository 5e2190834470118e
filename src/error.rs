use thiserror::Error;

/// Errors returned at the fallible edges of the playground: configuration and dataset lookup.
///
/// The algorithms themselves never fail; degenerate inputs resolve to no-ops.
#[derive(Debug, Error)]
pub enum PlaygroundError {
    /// A configuration value is outside the range the playground supports.
    #[error("invalid parameter {name}: {value} is outside {range}")]
    OutOfRange {
        /// Parameter name, as it appears in the config file.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Human-readable accepted range.
        range: &'static str,
    },

    /// The config file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The config file could not be read.
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    /// No bundled dataset has this id.
    #[error("unknown dataset: {0}")]
    UnknownDataset(String),

    /// A dataset was loaded into a demo that cannot use it.
    #[error("dataset {id} is a {category} dataset, expected {expected}")]
    WrongCategory {
        id: &'static str,
        category: &'static str,
        expected: &'static str,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, PlaygroundError>;
