use std::collections::BTreeMap;
use std::sync::OnceLock;

use tracing::debug;

use super::config::{parse_phonetic_toml, TableError};
use super::invert::invert_phonetic_map;

pub const DEFAULT_TABLE_TOML: &str = include_str!("default_table.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Forward and reverse phonetic lookups plus the window bounds derived
/// from the table content. Built once; both directions of greedy
/// segmentation take their window from here instead of a hard-coded
/// constant, so extending the table cannot silently truncate matches.
pub struct PhoneticTable {
    forward: BTreeMap<String, String>,
    inverted: BTreeMap<String, String>,
    max_key_chars: usize,
    max_cluster_points: usize,
}

impl PhoneticTable {
    pub fn from_toml(toml_str: &str) -> Result<Self, TableError> {
        let forward = parse_phonetic_toml(toml_str)?;
        Self::from_map(forward)
    }

    pub fn from_map(forward: BTreeMap<String, String>) -> Result<Self, TableError> {
        let inverted = invert_phonetic_map(&forward)?;
        let max_key_chars = forward.keys().map(|k| k.chars().count()).max().unwrap_or(1);
        let max_cluster_points = forward
            .values()
            .map(|v| v.chars().count())
            .max()
            .unwrap_or(1);
        debug!(
            entries = forward.len(),
            max_key_chars, max_cluster_points, "phonetic table built"
        );
        Ok(Self {
            forward,
            inverted,
            max_key_chars,
            max_cluster_points,
        })
    }

    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), TableError> {
        // Validate eagerly
        parse_phonetic_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| TableError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static PhoneticTable {
        static INSTANCE: OnceLock<PhoneticTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TABLE_TOML);
            PhoneticTable::from_toml(toml_str).expect("phonetic TOML must be valid")
        })
    }

    /// Romanized keys -> Tamil cluster.
    pub fn cluster_for(&self, keys: &str) -> Option<&str> {
        self.forward.get(keys).map(|s| s.as_str())
    }

    /// Tamil cluster -> canonical romanized keys.
    pub fn keys_for(&self, cluster: &str) -> Option<&str> {
        self.inverted.get(cluster).map(|s| s.as_str())
    }

    pub fn forward(&self) -> &BTreeMap<String, String> {
        &self.forward
    }

    pub fn inverted(&self) -> &BTreeMap<String, String> {
        &self.inverted
    }

    /// Longest romanized key, in chars. Window bound for forward conversion.
    pub fn max_key_chars(&self) -> usize {
        self.max_key_chars
    }

    /// Longest Tamil cluster, in code points. Window bound for target
    /// segmentation.
    pub fn max_cluster_points(&self) -> usize {
        self.max_cluster_points
    }
}
