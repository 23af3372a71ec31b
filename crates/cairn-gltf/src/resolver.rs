use std::fmt;

/// Identifies an asset as `module:name`. The module half scopes where
/// external binary payloads referenced by the asset are looked up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey {
    module: String,
    name: String,
}

impl AssetKey {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// Parse a `module:name` string. Both halves must be non-empty.
    pub fn parse(key: &str) -> Option<Self> {
        let (module, name) = key.split_once(':')?;
        if module.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self::new(module, name))
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A key for another resource in the same module.
    pub fn sibling(&self, name: impl Into<String>) -> AssetKey {
        AssetKey::new(self.module.clone(), name)
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.name)
    }
}

/// Looks up raw byte resources by key. Buffer resolution inside the decoder
/// goes through this trait; implementations decide where the bytes actually
/// come from (filesystem, archive, memory).
pub trait ResourceResolver: Send + Sync {
    /// The bytes stored under `key`, or `None` if no such resource exists.
    fn resolve(&self, key: &AssetKey) -> Option<Vec<u8>>;
}
