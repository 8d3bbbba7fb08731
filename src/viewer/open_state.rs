//! Persisted expand/collapse flags of sidebar sections

use std::collections::BTreeMap;

use anyhow::Result;

use crate::core::storage::KeyValueStore;

/// Store key holding the serialized flags
pub const STATE_KEY: &str = "sidebarState";

/// `"<name>-<depth>"` to expanded flag; a missing key means expanded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenState {
    flags: BTreeMap<String, bool>,
}

impl OpenState {
    /// Read the flags once at startup
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let flags = store
            .get(STATE_KEY)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(flags) => Some(flags),
                Err(e) => {
                    tracing::warn!("Discarding unreadable sidebar state: {}", e);
                    None
                }
            })
            .unwrap_or_default();
        Self { flags }
    }

    pub fn key(name: &str, depth: usize) -> String {
        format!("{name}-{depth}")
    }

    pub fn is_open(&self, name: &str, depth: usize) -> bool {
        self.flags
            .get(&Self::key(name, depth))
            .copied()
            .unwrap_or(true)
    }

    /// Record a flag and write the whole map back immediately
    pub fn set(
        &mut self,
        name: &str,
        depth: usize,
        open: bool,
        store: &mut dyn KeyValueStore,
    ) -> Result<()> {
        self.flags.insert(Self::key(name, depth), open);
        store.set(STATE_KEY, serde_json::to_string(&self.flags)?)
    }
}
