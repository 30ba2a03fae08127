//! Selector configuration.
//!
//! Configuration comes from an optional JSON file (`HOSTCOMPAT_CONFIG`) with
//! environment overrides layered on top. Every field has a default, so an
//! empty environment yields the built-in marker ladder.

use crate::level::CapabilityLevel;
use crate::messages::MessageCatalog;
use crate::probe::Probe;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "HOSTCOMPAT_CONFIG";
pub const MAX_LEVEL_ENV: &str = "HOSTCOMPAT_MAX_LEVEL";
pub const MESSAGES_ENV: &str = "HOSTCOMPAT_MESSAGES";

/// Marker symbols per level.
///
/// The defaults follow the order in which the C runtime gained each call, so
/// a host exporting a later marker normally exports the earlier ones too.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerTable {
    pub level6: Vec<String>,
    pub level7: Vec<String>,
    pub level8: Vec<String>,
    pub level9: Vec<String>,
}

impl Default for MarkerTable {
    fn default() -> Self {
        Self {
            level6: vec!["posix_spawn".to_string()],
            level7: vec!["pipe2".to_string()],
            level8: vec!["getrandom".to_string()],
            level9: vec!["close_range".to_string()],
        }
    }
}

impl MarkerTable {
    pub fn markers(&self, level: CapabilityLevel) -> &[String] {
        match level {
            CapabilityLevel::Base => &[],
            CapabilityLevel::Level6 => &self.level6,
            CapabilityLevel::Level7 => &self.level7,
            CapabilityLevel::Level8 => &self.level8,
            CapabilityLevel::Level9 => &self.level9,
        }
    }

    /// Probes in evaluation order, most capable first.
    pub fn probes(&self) -> Vec<Probe> {
        CapabilityLevel::PROBE_ORDER
            .into_iter()
            .map(|level| Probe::new(level, self.markers(level).iter().cloned()))
            .collect()
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompatConfig {
    pub markers: MarkerTable,
    /// Highest level the selector may pick, regardless of what the host offers.
    pub max_level: Option<CapabilityLevel>,
    pub messages_path: Option<PathBuf>,
}

impl CompatConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading compat config {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("parsing compat config {}", path.display()))
    }

    /// Read the config file named by `HOSTCOMPAT_CONFIG`, then apply the
    /// `HOSTCOMPAT_MAX_LEVEL` and `HOSTCOMPAT_MESSAGES` overrides.
    ///
    /// Fails on the first unusable source.
    pub fn from_env() -> Result<Self> {
        let (config, problems) = Self::from_vars(env_non_empty);
        match problems.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(config),
        }
    }

    /// Environment config with each unusable source skipped.
    ///
    /// A bad config file falls back to defaults and a bad level is dropped,
    /// but every other override still applies.
    pub fn from_env_or_default() -> Self {
        let (config, problems) = Self::from_vars(env_non_empty);
        for err in problems {
            let detail = format!("{err:#}");
            tracing::warn!(error = %detail, "ignoring unusable compat configuration");
        }
        config
    }

    fn from_vars<F>(var: F) -> (Self, Vec<anyhow::Error>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut problems = Vec::new();
        let mut config = match var(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)).unwrap_or_else(|err| {
                problems.push(err);
                Self::default()
            }),
            None => Self::default(),
        };

        if let Some(raw) = var(MAX_LEVEL_ENV) {
            match raw
                .parse::<CapabilityLevel>()
                .with_context(|| format!("invalid {MAX_LEVEL_ENV}"))
            {
                Ok(level) => config.max_level = Some(level),
                Err(err) => problems.push(err),
            }
        }

        if let Some(path) = var(MESSAGES_ENV) {
            config.messages_path = Some(PathBuf::from(path));
        }

        (config, problems)
    }

    pub fn load_messages(&self) -> Result<MessageCatalog> {
        match &self.messages_path {
            Some(path) => MessageCatalog::load_from_path(path),
            None => Ok(MessageCatalog::builtin()),
        }
    }

    /// Catalog for the adapter; falls back to the built-in entries on error.
    pub fn messages_or_builtin(&self) -> MessageCatalog {
        self.load_messages().unwrap_or_else(|err| {
            let detail = format!("{err:#}");
            tracing::warn!(error = %detail, "using built-in message catalog");
            MessageCatalog::builtin()
        })
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}
