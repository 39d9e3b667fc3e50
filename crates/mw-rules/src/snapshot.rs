//! Inventory snapshots taken on death and restored on respawn.

use std::collections::HashMap;

use mw_plugin_api::{PluginInventory, PluginItem};
use tracing::debug;

use crate::error::RuleError;

/// Default number of snapshots kept before the oldest is evicted.
pub const DEFAULT_CAPACITY: usize = 256;

/// A player's containers at the moment of death.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySnapshot {
    pub main: Vec<PluginItem>,
    pub armor: Vec<PluginItem>,
    pub cursor: Vec<PluginItem>,
    /// World the player died in. Its keepInventory decides the restore.
    pub world: String,
    /// Server tick the snapshot was taken at.
    pub taken_at: u64,
}

impl InventorySnapshot {
    pub fn capture(inventory: PluginInventory, world: &str, tick: u64) -> Self {
        Self {
            main: inventory.main,
            armor: inventory.armor,
            cursor: inventory.cursor,
            world: world.to_string(),
            taken_at: tick,
        }
    }

    pub fn into_inventory(self) -> PluginInventory {
        PluginInventory {
            main: self.main,
            armor: self.armor,
            cursor: self.cursor,
        }
    }
}

/// Snapshots keyed by player identity, bounded by a capacity and a TTL sweep.
#[derive(Debug)]
pub struct SnapshotStore {
    entries: HashMap<String, InventorySnapshot>,
    capacity: usize,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl SnapshotStore {
    /// A capacity of 0 is treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.entries.contains_key(identity)
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.entries.len() > self.capacity {
            self.evict_oldest();
        }
    }

    /// Store `snapshot` for `identity`, replacing any older one.
    pub fn insert(&mut self, identity: &str, snapshot: InventorySnapshot) {
        if !self.entries.contains_key(identity) && self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        self.entries.insert(identity.to_string(), snapshot);
    }

    /// Remove and return the snapshot for `identity`.
    pub fn take(&mut self, identity: &str) -> Result<InventorySnapshot, RuleError> {
        self.entries
            .remove(identity)
            .ok_or_else(|| RuleError::SnapshotNotFound(identity.to_string()))
    }

    /// Remove the snapshot for `identity` without restoring it. Returns
    /// whether there was one.
    pub fn discard(&mut self, identity: &str) -> bool {
        let found = self.entries.remove(identity).is_some();
        if found {
            debug!("Discarding inventory snapshot of {identity}");
        }
        found
    }

    /// Drop snapshots older than `ttl_ticks`. Returns how many were dropped.
    pub fn sweep(&mut self, now: u64, ttl_ticks: u64) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, snap| now.saturating_sub(snap.taken_at) < ttl_ticks);
        before - self.entries.len()
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, snap)| snap.taken_at)
            .map(|(name, _)| name.clone());
        if let Some(name) = oldest {
            debug!("Evicting inventory snapshot of {name}");
            self.entries.remove(&name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(tick: u64) -> InventorySnapshot {
        InventorySnapshot {
            main: vec![PluginItem::new(1, 1)],
            armor: Vec::new(),
            cursor: Vec::new(),
            world: "w".into(),
            taken_at: tick,
        }
    }

    #[test]
    fn take_consumes_once() {
        let mut store = SnapshotStore::default();
        store.insert("Alice", snap(5));
        assert_eq!(store.take("Alice").unwrap().taken_at, 5);
        assert_eq!(
            store.take("Alice"),
            Err(RuleError::SnapshotNotFound("Alice".into()))
        );
        assert!(!store.take("Alice").unwrap_err().is_validation());
    }

    #[test]
    fn discard_reports_presence() {
        let mut store = SnapshotStore::default();
        store.insert("Alice", snap(1));
        assert!(store.discard("Alice"));
        assert!(!store.discard("Alice"));
        assert!(store.is_empty());
    }

    #[test]
    fn insert_overwrites_same_identity() {
        let mut store = SnapshotStore::with_capacity(1);
        store.insert("Alice", snap(1));
        store.insert("Alice", snap(2));
        assert_eq!(store.len(), 1);
        assert_eq!(store.take("Alice").unwrap().taken_at, 2);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut store = SnapshotStore::with_capacity(2);
        store.insert("Alice", snap(10));
        store.insert("Bob", snap(5));
        store.insert("Carol", snap(20));
        assert_eq!(store.len(), 2);
        assert!(!store.contains("Bob"));
        assert!(store.contains("Alice"));
        assert!(store.contains("Carol"));
    }

    #[test]
    fn shrinking_capacity_evicts() {
        let mut store = SnapshotStore::with_capacity(3);
        store.insert("Alice", snap(1));
        store.insert("Bob", snap(2));
        store.insert("Carol", snap(3));
        store.set_capacity(1);
        assert_eq!(store.len(), 1);
        assert!(store.contains("Carol"));
    }

    #[test]
    fn sweep_drops_expired() {
        let mut store = SnapshotStore::default();
        store.insert("Alice", snap(0));
        store.insert("Bob", snap(90));
        assert_eq!(store.sweep(100, 50), 1);
        assert!(!store.contains("Alice"));
        assert!(store.contains("Bob"));
        assert_eq!(store.sweep(100, 50), 0);
    }

    #[test]
    fn capture_and_restore_keep_order() {
        let inv = PluginInventory {
            main: vec![PluginItem::new(1, 2), PluginItem::new(3, 4)],
            armor: vec![PluginItem::new(5, 1)],
            cursor: Vec::new(),
        };
        let snapshot = InventorySnapshot::capture(inv.clone(), "arena", 7);
        assert_eq!(snapshot.taken_at, 7);
        assert_eq!(snapshot.world, "arena");
        assert_eq!(snapshot.into_inventory(), inv);
    }
}
