//! Configuration errors reported by the builder.

use std::fmt;
use thiserror::Error;

/// A single configuration problem.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("expected exactly one child element, found {found}")]
    ChildCount { found: usize },

    #[error("icon size override must be a positive length, got '{value}'")]
    InvalidIconSize { value: String },

    #[error("icon color override is empty")]
    EmptyIconColor,

    #[error("no Tokio runtime available. Build inside a runtime or call .runtime(handle)")]
    NoRuntime,

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Every problem found while validating a builder.
#[derive(Debug, Clone, PartialEq, Error)]
pub struct ConfigErrors {
    errors: Vec<ConfigError>,
}

impl ConfigErrors {
    pub(crate) fn new(errors: Vec<ConfigError>) -> Self {
        Self { errors }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn contains(&self, error: &ConfigError) -> bool {
        self.errors.contains(error)
    }

    pub fn into_vec(self) -> Vec<ConfigError> {
        self.errors
    }
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid wrapper configuration")?;
        for (i, error) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{error}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_every_error() {
        let errors = ConfigErrors::new(vec![
            ConfigError::ChildCount { found: 2 },
            ConfigError::EmptyIconColor,
        ]);
        assert_eq!(
            errors.to_string(),
            "invalid wrapper configuration: expected exactly one child element, found 2; icon color override is empty"
        );
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ConfigError::EmptyIconColor));
    }
}
