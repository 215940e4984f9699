//! Configurable decoding limits.

use serde::Deserialize;

/// Default for [`Limits::object_size_limit`]: 16 MiB.
pub const DEFAULT_OBJECT_SIZE_LIMIT: u64 = 16 << 20;

/// Limits applied when decoding untrusted data.
///
/// Usually embedded into an application's configuration file:
///
/// ```toml
/// object_size_limit = 65536
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// The maximum number of bytes a single object graph may claim.
    ///
    /// Defaults to [`DEFAULT_OBJECT_SIZE_LIMIT`]. `None` means unbounded and
    /// is only sound for trusted input, since the object format allocates
    /// according to length prefixes before reading the data.
    pub object_size_limit: Option<u64>,
}

impl Limits {
    /// Limits with the default values.
    pub const DEFAULT: Self = Self {
        object_size_limit: Some(DEFAULT_OBJECT_SIZE_LIMIT),
    };

    /// Parses limits from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `text` is not valid TOML or has unknown keys.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::DEFAULT
    }
}
