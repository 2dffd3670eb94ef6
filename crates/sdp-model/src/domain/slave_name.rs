use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Unique key of a slave in the slave map (e.g. `"lts"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlaveName(String);

impl SlaveName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SlaveName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SlaveName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for SlaveName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SlaveName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlaveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::SlaveName;

    #[test]
    fn lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(SlaveName::from("lts"), 1);
        assert_eq!(map.get("lts"), Some(&1));
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&SlaveName::new("lts")).unwrap();
        assert_eq!(json, r#""lts""#);
    }
}
