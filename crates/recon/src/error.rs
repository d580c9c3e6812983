use std::fmt;

use serde::Serialize;

/// One of the two inputs of a comparison run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    A,
    B,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "source A"),
            Self::B => write!(f, "source B"),
        }
    }
}

#[derive(Debug)]
pub enum ReconError {
    /// A source input was not supplied before the run was requested.
    MissingInput(Source),
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad column, empty filter, etc.).
    ConfigValidation(String),
    /// An aggregation worker panicked before producing its mapping.
    Worker(Source),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput(source) => write!(f, "missing {source} input"),
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Worker(source) => write!(f, "aggregation of {source} did not complete"),
        }
    }
}

impl std::error::Error for ReconError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_message() {
        assert_eq!(
            ReconError::MissingInput(Source::A).to_string(),
            "missing source A input"
        );
        assert_eq!(
            ReconError::MissingInput(Source::B).to_string(),
            "missing source B input"
        );
    }
}
