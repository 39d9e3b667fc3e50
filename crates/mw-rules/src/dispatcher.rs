//! Event-to-rule dispatch.
//!
//! Each event kind has one decision function. A decision function reads a
//! single rule for the event's world and either lets the host proceed or
//! returns the outcome the host must apply. Only an explicit `false` ever
//! suppresses anything; an unset rule always defers to the host.

use mw_plugin_api::PluginInventory;
use tracing::{debug, warn};

use crate::rule::GameRule;
use crate::snapshot::{InventorySnapshot, SnapshotStore};
use crate::store::{RuleStore, WorldRules};

/// A game event, reduced to what rule decisions need.
#[derive(Debug, Clone)]
pub enum GameEvent<'a> {
    /// A non-player entity died.
    EntityDeath { world: &'a str },
    PlayerDeath {
        identity: &'a str,
        world: &'a str,
        /// `None` when the host could not provide the player's inventory.
        inventory: Option<PluginInventory>,
        tick: u64,
    },
    /// Decided by the world of the death, not the respawn position.
    PlayerRespawn { identity: &'a str },
    BlockBreak { world: &'a str },
    RegainHealth {
        world: &'a str,
        /// The entity has an active regeneration effect.
        has_regeneration: bool,
    },
    Damage { world: &'a str },
    /// An explosion caused by an entity (primed TNT, creeper, ...).
    Explode { world: &'a str },
    LevelChange { identity: &'a str, to_world: &'a str },
    Join { identity: &'a str, world: &'a str },
}

/// What the host should do with the event.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Default host behaviour.
    Allow,
    Cancel,
    /// Proceed, but with an empty drop list.
    ClearDrops,
    /// Replace the player's main, armor and cursor contents, in that order.
    Restore {
        identity: String,
        inventory: PluginInventory,
    },
    /// Send `rules` to the player's client.
    PushRules { identity: String, rules: WorldRules },
}

#[derive(Debug, Default)]
pub struct RuleDispatcher {
    rules: RuleStore,
    snapshots: SnapshotStore,
}

impl RuleDispatcher {
    pub fn new(rules: RuleStore, snapshots: SnapshotStore) -> Self {
        Self { rules, snapshots }
    }

    pub fn rules(&self) -> &RuleStore {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleStore {
        &mut self.rules
    }

    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    pub fn snapshots_mut(&mut self) -> &mut SnapshotStore {
        &mut self.snapshots
    }

    /// Decide the outcome of `event`.
    pub fn dispatch(&mut self, event: GameEvent<'_>) -> Outcome {
        match event {
            GameEvent::EntityDeath { world } => self.on_entity_death(world),
            GameEvent::PlayerDeath {
                identity,
                world,
                inventory,
                tick,
            } => self.on_player_death(identity, world, inventory, tick),
            GameEvent::PlayerRespawn { identity } => self.on_player_respawn(identity),
            GameEvent::BlockBreak { world } => self.on_block_break(world),
            GameEvent::RegainHealth {
                world,
                has_regeneration,
            } => self.on_regenerate(world, has_regeneration),
            GameEvent::Damage { world } => self.on_damage(world),
            GameEvent::Explode { world } => self.on_explode(world),
            GameEvent::LevelChange { identity, to_world } => self.push_rules(identity, to_world),
            GameEvent::Join { identity, world } => self.push_rules(identity, world),
        }
    }

    fn on_entity_death(&self, world: &str) -> Outcome {
        if self.rules.is_disabled(world, GameRule::DoMobLoot) {
            debug!("doMobLoot off in {world}, clearing mob drops");
            return Outcome::ClearDrops;
        }
        Outcome::Allow
    }

    fn on_player_death(
        &mut self,
        identity: &str,
        world: &str,
        inventory: Option<PluginInventory>,
        tick: u64,
    ) -> Outcome {
        // A leftover snapshot must not survive into a later respawn.
        self.snapshots.discard(identity);
        if !self.rules.is_disabled(world, GameRule::KeepInventory) {
            return Outcome::Allow;
        }
        let Some(inventory) = inventory else {
            warn!("No inventory for {identity}, leaving drops to the host");
            return Outcome::Allow;
        };
        debug!("keepInventory off in {world}, saving inventory of {identity}");
        self.snapshots.insert(identity, InventorySnapshot::capture(inventory, world, tick));
        Outcome::ClearDrops
    }

    fn on_player_respawn(&mut self, identity: &str) -> Outcome {
        let snapshot = match self.snapshots.take(identity) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                debug!("{e}, nothing to restore");
                return Outcome::Allow;
            }
        };
        if !self.rules.is_disabled(&snapshot.world, GameRule::KeepInventory) {
            debug!(
                "keepInventory no longer off in {}, dropping snapshot of {identity}",
                snapshot.world
            );
            return Outcome::Allow;
        }
        debug!("Restoring inventory of {identity}");
        Outcome::Restore {
            identity: identity.to_string(),
            inventory: snapshot.into_inventory(),
        }
    }

    fn on_block_break(&self, world: &str) -> Outcome {
        if self.rules.is_disabled(world, GameRule::DoTileDrops) {
            return Outcome::ClearDrops;
        }
        Outcome::Allow
    }

    fn on_regenerate(&self, world: &str, has_regeneration: bool) -> Outcome {
        if has_regeneration {
            return Outcome::Allow;
        }
        if self.rules.is_disabled(world, GameRule::NaturalRegeneration) {
            return Outcome::Cancel;
        }
        Outcome::Allow
    }

    fn on_damage(&self, world: &str) -> Outcome {
        if self.rules.is_disabled(world, GameRule::Pvp) {
            return Outcome::Cancel;
        }
        Outcome::Allow
    }

    fn on_explode(&self, world: &str) -> Outcome {
        if self.rules.is_disabled(world, GameRule::TntExplodes) {
            debug!("tntExplodes off in {world}, cancelling explosion");
            return Outcome::Cancel;
        }
        Outcome::Allow
    }

    fn push_rules(&self, identity: &str, world: &str) -> Outcome {
        Outcome::PushRules {
            identity: identity.to_string(),
            rules: self.rules.all_rules_for(world),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::RuleValue;
    use mw_plugin_api::PluginItem;

    fn dispatcher_with(world: &str, rules: &[(GameRule, RuleValue)]) -> RuleDispatcher {
        let mut store = RuleStore::new();
        for (rule, value) in rules {
            store.set(world, *rule, value.clone()).unwrap();
        }
        RuleDispatcher::new(store, SnapshotStore::default())
    }

    fn off(rule: GameRule) -> (GameRule, RuleValue) {
        (rule, RuleValue::Bool(false))
    }

    fn on(rule: GameRule) -> (GameRule, RuleValue) {
        (rule, RuleValue::Bool(true))
    }

    fn sample_inventory() -> PluginInventory {
        PluginInventory {
            main: vec![PluginItem::new(1, 64), PluginItem::new(2, 3)],
            armor: vec![PluginItem::new(3, 1)],
            cursor: Vec::new(),
        }
    }

    #[test]
    fn mob_loot_cleared_only_when_disabled() {
        let mut d = dispatcher_with("w", &[off(GameRule::DoMobLoot)]);
        assert_eq!(
            d.dispatch(GameEvent::EntityDeath { world: "w" }),
            Outcome::ClearDrops
        );
        assert_eq!(
            d.dispatch(GameEvent::EntityDeath { world: "other" }),
            Outcome::Allow
        );

        let mut d = dispatcher_with("w", &[on(GameRule::DoMobLoot)]);
        assert_eq!(
            d.dispatch(GameEvent::EntityDeath { world: "w" }),
            Outcome::Allow
        );
    }

    #[test]
    fn player_death_ignores_mob_loot() {
        let mut d = dispatcher_with("w", &[off(GameRule::DoMobLoot)]);
        let outcome = d.dispatch(GameEvent::PlayerDeath {
            identity: "Alice",
            world: "w",
            inventory: Some(sample_inventory()),
            tick: 1,
        });
        assert_eq!(outcome, Outcome::Allow);
        assert!(d.snapshots().is_empty());
    }

    #[test]
    fn death_respawn_round_trip() {
        let mut d = dispatcher_with("w", &[off(GameRule::KeepInventory)]);
        let outcome = d.dispatch(GameEvent::PlayerDeath {
            identity: "Alice",
            world: "w",
            inventory: Some(sample_inventory()),
            tick: 40,
        });
        assert_eq!(outcome, Outcome::ClearDrops);
        assert!(d.snapshots().contains("Alice"));

        let outcome = d.dispatch(GameEvent::PlayerRespawn { identity: "Alice" });
        assert_eq!(
            outcome,
            Outcome::Restore {
                identity: "Alice".into(),
                inventory: sample_inventory(),
            }
        );
        assert!(d.snapshots().is_empty());

        // Consumed exactly once.
        let outcome = d.dispatch(GameEvent::PlayerRespawn { identity: "Alice" });
        assert_eq!(outcome, Outcome::Allow);
    }

    #[test]
    fn respawn_does_not_restore_foreign_snapshot() {
        let mut d = dispatcher_with("w", &[off(GameRule::KeepInventory)]);
        d.dispatch(GameEvent::PlayerDeath {
            identity: "Alice",
            world: "w",
            inventory: Some(sample_inventory()),
            tick: 1,
        });
        let outcome = d.dispatch(GameEvent::PlayerRespawn { identity: "Bob" });
        assert_eq!(outcome, Outcome::Allow);
        assert!(d.snapshots().contains("Alice"));
    }

    #[test]
    fn respawn_uses_death_world_rule() {
        // Died in "arena"; the respawn world "hub" has no rules at all.
        let mut d = dispatcher_with("arena", &[off(GameRule::KeepInventory)]);
        d.dispatch(GameEvent::PlayerDeath {
            identity: "Alice",
            world: "arena",
            inventory: Some(sample_inventory()),
            tick: 1,
        });
        assert_eq!(d.snapshots().len(), 1);
        let outcome = d.dispatch(GameEvent::PlayerRespawn { identity: "Alice" });
        assert_eq!(
            outcome,
            Outcome::Restore {
                identity: "Alice".into(),
                inventory: sample_inventory(),
            }
        );
        assert!(d.snapshots().is_empty());
    }

    #[test]
    fn rule_enabled_before_respawn_drops_snapshot() {
        let mut d = dispatcher_with("w", &[off(GameRule::KeepInventory)]);
        d.dispatch(GameEvent::PlayerDeath {
            identity: "Alice",
            world: "w",
            inventory: Some(sample_inventory()),
            tick: 1,
        });
        d.rules_mut()
            .set("w", GameRule::KeepInventory, RuleValue::Bool(true))
            .unwrap();
        let outcome = d.dispatch(GameEvent::PlayerRespawn { identity: "Alice" });
        assert_eq!(outcome, Outcome::Allow);
        assert!(d.snapshots().is_empty());
    }

    #[test]
    fn death_without_inventory_keeps_drops() {
        let mut d = dispatcher_with("w", &[off(GameRule::KeepInventory)]);
        let outcome = d.dispatch(GameEvent::PlayerDeath {
            identity: "Alice",
            world: "w",
            inventory: None,
            tick: 1,
        });
        assert_eq!(outcome, Outcome::Allow);
        assert!(d.snapshots().is_empty());
    }

    #[test]
    fn death_in_unruled_world_discards_old_snapshot() {
        let mut d = dispatcher_with("w", &[off(GameRule::KeepInventory)]);
        d.dispatch(GameEvent::PlayerDeath {
            identity: "Alice",
            world: "w",
            inventory: Some(sample_inventory()),
            tick: 1,
        });
        let outcome = d.dispatch(GameEvent::PlayerDeath {
            identity: "Alice",
            world: "hub",
            inventory: Some(sample_inventory()),
            tick: 2,
        });
        assert_eq!(outcome, Outcome::Allow);
        assert!(d.snapshots().is_empty());
    }

    #[test]
    fn keep_inventory_unset_or_true_allows_death() {
        let mut d = dispatcher_with("w", &[on(GameRule::KeepInventory)]);
        let outcome = d.dispatch(GameEvent::PlayerDeath {
            identity: "Alice",
            world: "w",
            inventory: Some(sample_inventory()),
            tick: 1,
        });
        assert_eq!(outcome, Outcome::Allow);
        let outcome = d.dispatch(GameEvent::PlayerDeath {
            identity: "Alice",
            world: "unset",
            inventory: Some(sample_inventory()),
            tick: 1,
        });
        assert_eq!(outcome, Outcome::Allow);
        assert!(d.snapshots().is_empty());
    }

    #[test]
    fn tile_drops() {
        let mut d = dispatcher_with("w", &[off(GameRule::DoTileDrops)]);
        assert_eq!(
            d.dispatch(GameEvent::BlockBreak { world: "w" }),
            Outcome::ClearDrops
        );
        assert_eq!(
            d.dispatch(GameEvent::BlockBreak { world: "x" }),
            Outcome::Allow
        );
    }

    #[test]
    fn regeneration_effect_always_heals() {
        let mut d = dispatcher_with("w", &[off(GameRule::NaturalRegeneration)]);
        assert_eq!(
            d.dispatch(GameEvent::RegainHealth {
                world: "w",
                has_regeneration: false,
            }),
            Outcome::Cancel
        );
        assert_eq!(
            d.dispatch(GameEvent::RegainHealth {
                world: "w",
                has_regeneration: true,
            }),
            Outcome::Allow
        );
    }

    #[test]
    fn natural_regeneration_unset_allows() {
        let mut d = RuleDispatcher::default();
        assert_eq!(
            d.dispatch(GameEvent::RegainHealth {
                world: "w",
                has_regeneration: false,
            }),
            Outcome::Allow
        );
    }

    #[test]
    fn pvp() {
        let mut d = dispatcher_with("w", &[off(GameRule::Pvp)]);
        assert_eq!(d.dispatch(GameEvent::Damage { world: "w" }), Outcome::Cancel);

        let mut d = dispatcher_with("w", &[on(GameRule::Pvp)]);
        assert_eq!(d.dispatch(GameEvent::Damage { world: "w" }), Outcome::Allow);

        let mut d = RuleDispatcher::default();
        assert_eq!(d.dispatch(GameEvent::Damage { world: "w" }), Outcome::Allow);
    }

    #[test]
    fn tnt() {
        let mut d = dispatcher_with("w", &[off(GameRule::TntExplodes)]);
        assert_eq!(d.dispatch(GameEvent::Explode { world: "w" }), Outcome::Cancel);
        assert_eq!(d.dispatch(GameEvent::Explode { world: "v" }), Outcome::Allow);
    }

    #[test]
    fn join_is_idempotent() {
        let mut d = dispatcher_with("w", &[off(GameRule::Pvp), on(GameRule::DoMobLoot)]);
        let first = d.dispatch(GameEvent::Join {
            identity: "Alice",
            world: "w",
        });
        let second = d.dispatch(GameEvent::Join {
            identity: "Alice",
            world: "w",
        });
        assert_eq!(first, second);
        match first {
            Outcome::PushRules { identity, rules } => {
                assert_eq!(identity, "Alice");
                assert_eq!(rules.len(), 2);
                assert_eq!(rules.get(&GameRule::Pvp), Some(&RuleValue::Bool(false)));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(d.rules().all_rules_for("w").len(), 2);
        assert_eq!(d.rules().worlds(), vec!["w"]);
    }

    #[test]
    fn level_change_pushes_destination_rules() {
        let mut d = dispatcher_with("nether", &[off(GameRule::DoTileDrops)]);
        let outcome = d.dispatch(GameEvent::LevelChange {
            identity: "Alice",
            to_world: "nether",
        });
        let Outcome::PushRules { rules, .. } = outcome else {
            panic!("expected PushRules");
        };
        assert_eq!(
            rules.get(&GameRule::DoTileDrops),
            Some(&RuleValue::Bool(false))
        );
    }
}
