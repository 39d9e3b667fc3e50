//! MultiWorld: per-world game rules for the plugin host.
//!
//! Translates host events into rule decisions and applies the outcome through
//! the [`ServerApi`]. The `/mw` command layer lives in [`commands`].

pub mod commands;
pub mod config;
pub mod manifest;

use mw_plugin_api::{
    effect_id, EventResult, LogLevel, Plugin, PluginEvent, PluginGameRule, PluginInfo, ServerApi,
};
use mw_rules::{GameEvent, LocaleRegistry, Outcome, RuleDispatcher, SnapshotStore, WorldRules};
use tracing::{debug, info};

use crate::config::MultiWorldConfig;
use crate::manifest::PluginManifest;

/// Task ID of the repeating snapshot sweep.
pub const SWEEP_TASK_ID: u32 = 1;

pub struct MultiWorldPlugin {
    manifest: PluginManifest,
    config: MultiWorldConfig,
    dispatcher: RuleDispatcher,
    locales: LocaleRegistry,
}

impl MultiWorldPlugin {
    /// Create the plugin from the bundled manifest.
    pub fn new() -> Result<Self, String> {
        Ok(Self::with_manifest(PluginManifest::bundled()?))
    }

    pub fn with_manifest(manifest: PluginManifest) -> Self {
        Self {
            manifest,
            config: MultiWorldConfig::default(),
            dispatcher: RuleDispatcher::default(),
            locales: LocaleRegistry::new(),
        }
    }

    pub fn dispatcher(&self) -> &RuleDispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut RuleDispatcher {
        &mut self.dispatcher
    }

    pub fn locales(&self) -> &LocaleRegistry {
        &self.locales
    }

    pub fn config(&self) -> &MultiWorldConfig {
        &self.config
    }

    /// Locale to translate messages for `player` into.
    pub fn locale_of(&self, player: &str) -> &str {
        self.locales.locale_or(player, &self.config.default_locale)
    }

    fn decide(&mut self, event: &PluginEvent, api: &dyn ServerApi) -> Option<Outcome> {
        let game_event = match event {
            PluginEvent::PlayerJoin { player } => GameEvent::Join {
                identity: &player.name,
                world: &player.world,
            },
            PluginEvent::PlayerLevelChange { player, to_world } => GameEvent::LevelChange {
                identity: &player.name,
                to_world,
            },
            PluginEvent::PlayerDeath { player, .. } => GameEvent::PlayerDeath {
                identity: &player.name,
                world: &player.world,
                inventory: api.inventory(&player.name),
                tick: api.get_tick(),
            },
            PluginEvent::PlayerRespawn { player } => GameEvent::PlayerRespawn {
                identity: &player.name,
            },
            PluginEvent::BlockBreak { player, .. } => GameEvent::BlockBreak {
                world: &player.world,
            },
            PluginEvent::EntityDeath { world, .. } => GameEvent::EntityDeath { world },
            PluginEvent::EntityDamage { world, .. } => GameEvent::Damage { world },
            PluginEvent::EntityRegainHealth {
                runtime_id, world, ..
            } => GameEvent::RegainHealth {
                world,
                has_regeneration: api.has_effect(*runtime_id, effect_id::REGENERATION),
            },
            PluginEvent::EntityExplode { world, .. } => GameEvent::Explode { world },
            PluginEvent::PlayerLogin { .. } | PluginEvent::PlayerQuit { .. } => return None,
        };
        Some(self.dispatcher.dispatch(game_event))
    }

    fn track_connection(&mut self, event: &PluginEvent) {
        match event {
            PluginEvent::PlayerLogin { name, locale } => {
                debug!("Locale of {name}: {locale}");
                self.locales.record(name, locale);
            }
            PluginEvent::PlayerQuit { player } => {
                self.locales.remove(&player.name);
            }
            _ => {}
        }
    }
}

/// Apply `outcome` to the host and turn it into the event result.
fn apply(outcome: Outcome, event: &PluginEvent, api: &mut dyn ServerApi) -> EventResult {
    match outcome {
        Outcome::Allow => EventResult::Continue,
        Outcome::Cancel if event.is_cancellable() => EventResult::Cancelled,
        Outcome::ClearDrops if event.has_drops() => EventResult::ClearDrops,
        Outcome::Cancel | Outcome::ClearDrops => EventResult::Continue,
        Outcome::Restore {
            identity,
            inventory,
        } => {
            api.set_inventory(&identity, inventory);
            EventResult::Continue
        }
        Outcome::PushRules { identity, rules } => {
            if !rules.is_empty() {
                api.send_game_rules(&identity, &wire_rules(&rules));
            }
            EventResult::Continue
        }
    }
}

/// Client-facing form of a world's rules. Rules with no wire form are left out.
pub fn wire_rules(rules: &WorldRules) -> Vec<PluginGameRule> {
    rules
        .iter()
        .filter_map(|(rule, value)| {
            value.to_wire().map(|value| PluginGameRule {
                name: rule.wire_name(),
                editable: false,
                value,
            })
        })
        .collect()
}

impl Plugin for MultiWorldPlugin {
    fn info(&self) -> PluginInfo {
        self.manifest.info()
    }

    fn on_enable(&mut self, api: &mut dyn ServerApi) {
        api.register_command("mw", "Manage per-world game rules", &self.manifest.name);
        if self.config.snapshot_ttl_ticks > 0 && self.config.sweep_interval_ticks > 0 {
            api.schedule_repeating(
                &self.manifest.name,
                self.config.sweep_interval_ticks,
                self.config.sweep_interval_ticks,
                SWEEP_TASK_ID,
            );
        }
        let worlds = self.dispatcher.rules().worlds().len();
        info!("MultiWorld enabled, rules configured for {worlds} world(s)");
        api.log(
            LogLevel::Info,
            &format!("{} v{} enabled", self.manifest.name, self.manifest.version),
        );
    }

    fn on_disable(&mut self) {
        info!(
            "MultiWorld disabled, dropping {} inventory snapshot(s)",
            self.dispatcher.snapshots().len()
        );
    }

    fn on_event(&mut self, event: &PluginEvent, api: &mut dyn ServerApi) -> EventResult {
        self.track_connection(event);
        match self.decide(event, &*api) {
            Some(outcome) => apply(outcome, event, api),
            None => EventResult::Continue,
        }
    }

    fn on_task(&mut self, task_id: u32, api: &mut dyn ServerApi) {
        if task_id != SWEEP_TASK_ID {
            return;
        }
        let dropped = self
            .dispatcher
            .snapshots_mut()
            .sweep(api.get_tick(), self.config.snapshot_ttl_ticks);
        if dropped > 0 {
            debug!("Dropped {dropped} expired inventory snapshot(s)");
        }
    }

    fn on_command(
        &mut self,
        command: &str,
        args: &[String],
        sender: &str,
        api: &mut dyn ServerApi,
    ) -> Option<String> {
        if command != "mw" {
            return None;
        }
        Some(self.run_command(args, sender, api).into_message())
    }

    fn default_config(&self) -> Option<serde_json::Value> {
        Some(MultiWorldConfig::default().to_json())
    }

    fn load_config(&mut self, config: serde_json::Value) {
        let config = MultiWorldConfig::from_json(config);
        let snapshots = SnapshotStore::with_capacity(config.max_snapshots);
        self.dispatcher = RuleDispatcher::new(config.build_rule_store(), snapshots);
        self.config = config;
    }
}
