//! Plugin configuration (`plugins/MultiWorld/config.json`).

use std::collections::BTreeMap;

use mw_rules::{RuleStore, RuleValue};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiWorldConfig {
    /// world name → rule name → value.
    #[serde(default)]
    pub worlds: BTreeMap<String, BTreeMap<String, RuleValue>>,
    /// Locale used when a player's login locale is unknown.
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_max_snapshots")]
    pub max_snapshots: usize,
    /// Snapshots older than this many ticks are dropped. 0 = never.
    #[serde(default = "default_snapshot_ttl_ticks")]
    pub snapshot_ttl_ticks: u64,
    #[serde(default = "default_sweep_interval_ticks")]
    pub sweep_interval_ticks: u64,
}

fn default_locale() -> String {
    "en_US".into()
}

fn default_max_snapshots() -> usize {
    mw_rules::snapshot::DEFAULT_CAPACITY
}

fn default_snapshot_ttl_ticks() -> u64 {
    // One hour at 20 TPS.
    72_000
}

fn default_sweep_interval_ticks() -> u64 {
    1_200
}

impl Default for MultiWorldConfig {
    fn default() -> Self {
        Self {
            worlds: BTreeMap::new(),
            default_locale: default_locale(),
            max_snapshots: default_max_snapshots(),
            snapshot_ttl_ticks: default_snapshot_ttl_ticks(),
            sweep_interval_ticks: default_sweep_interval_ticks(),
        }
    }
}

impl MultiWorldConfig {
    /// Parse a config value, falling back to defaults if it is malformed.
    pub fn from_json(value: serde_json::Value) -> Self {
        match serde_json::from_value(value) {
            Ok(config) => config,
            Err(e) => {
                warn!("Invalid MultiWorld config, using defaults: {e}");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Build a rule store from the `worlds` table. Worlds with an invalid
    /// entry are skipped as a whole.
    pub fn build_rule_store(&self) -> RuleStore {
        let mut store = RuleStore::new();
        for (world, rules) in &self.worlds {
            let entries = rules
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()));
            if let Err(e) = store.update(world, entries) {
                warn!("Skipping rules for world {world}: {e}");
            }
        }
        store
    }
}
