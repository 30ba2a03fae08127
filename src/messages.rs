//! Message catalog for user-facing error text.
//!
//! Errors carry a stable key; the catalog turns the key into text. The
//! built-in entries cover every key the crate emits, and a JSON file of
//! `{"key": "text"}` pairs can override or extend them.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Key for the error raised when server cipher-suite order is unavailable.
pub const NO_SERVER_CIPHER_SUITE_ORDER: &str = "compat.noServerCipherSuiteOrder";

const BUILTIN_MESSAGES: &[(&str, &str)] = &[(
    NO_SERVER_CIPHER_SUITE_ORDER,
    "Enforcing the server's cipher suite order requires capability level 8 or later",
)];

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MessageCatalog {
    messages: BTreeMap<String, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MessageCatalog {
    pub fn builtin() -> Self {
        let messages = BUILTIN_MESSAGES
            .iter()
            .map(|(key, text)| (key.to_string(), text.to_string()))
            .collect();
        Self { messages }
    }

    /// Built-in catalog overlaid with the entries from a JSON file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading message catalog {}", path.display()))?;
        let overrides: BTreeMap<String, String> = serde_json::from_str(&data)
            .with_context(|| format!("parsing message catalog {}", path.display()))?;
        let mut catalog = Self::builtin();
        catalog.messages.extend(overrides);
        Ok(catalog)
    }

    /// Text for `key`, or the key itself when the catalog has no entry.
    pub fn get(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
