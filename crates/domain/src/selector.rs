use std::fmt;

/// Caller-supplied path suffix naming the upstream resolver.
///
/// Everything after the leading `/` of the path below the mount point, kept
/// verbatim. It may itself contain `/` (`example.org/custom-path`), and the
/// empty selector is valid and means the default provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Selector(String);

impl Selector {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Takes the selector from a request path relative to the route root.
    pub fn from_path(path: &str) -> Self {
        Self(path.strip_prefix('/').unwrap_or(path).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
