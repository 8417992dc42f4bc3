//! Model line — the product identifier that partitions every table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A product line such as `Porsche_Cayenne`, or the aggregate pseudo-line.
///
/// Equality is exact and case-sensitive: `Porsche_Macan` and `porsche_macan`
/// are different lines.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelLine(String);

impl ModelLine {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ModelLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelLine {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ModelLine {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for ModelLine {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ModelLine {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_case_sensitive() {
        let line = ModelLine::from("Porsche_Macan");
        assert_eq!(line, "Porsche_Macan");
        assert_ne!(line, ModelLine::from("porsche_macan"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&ModelLine::from("All_Models")).unwrap();
        assert_eq!(json, "\"All_Models\"");
    }
}
