//! Shared types for dependency extraction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved dependency extracted from a lockfile.
///
/// Equality and hashing cover both fields, so two descriptors resolving to
/// the same package at the same version collapse into one record.
///
/// # Example
///
/// ```
/// use lockscope::parser::Dependency;
///
/// let dep = Dependency::new("accepts", Some("1.3.7"));
/// assert_eq!(dep.to_string(), "accepts@1.3.7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    /// The package name (e.g., "accepts", "@babel/core").
    pub name: String,

    /// The resolved version, if the lockfile entry declares one.
    pub version: Option<String>,
}

impl Dependency {
    /// Creates a new Dependency instance.
    pub fn new(name: impl Into<String>, version: Option<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            version: version.map(Into::into),
        }
    }

    /// Returns the version, or an empty string when none was declared.
    pub fn version_str(&self) -> &str {
        self.version.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}
