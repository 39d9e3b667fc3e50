//! Plugin API: traits, events, and host access for per-world plugins.
//!
//! This crate is the boundary between a plugin and the server that hosts it.
//! It knows nothing about game rules beyond their wire shape.

// ─── Types ───────────────────────────────────────────────────────────────────

/// Information about an online player, passed to plugins in events.
#[derive(Debug, Clone)]
pub struct PluginPlayer {
    pub name: String,
    pub uuid: String,
    pub runtime_id: u64,
    /// Name of the world (level) the player is currently in.
    pub world: String,
    pub position: (f32, f32, f32),
    pub gamemode: i32,
    pub health: f32,
}

/// Block position for plugin events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginBlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Cause of damage for EntityDamage events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageCause {
    Attack,
    Projectile,
    Fall,
    Drowning,
    Lava,
    Fire,
    Explosion,
    Suffocation,
    Starvation,
    Void,
    Other,
}

/// Log level for plugin logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

/// Result of dispatching an event to a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue normal handling.
    Continue,
    /// Event was cancelled by this plugin.
    Cancelled,
    /// Event proceeds, but its drop list must be emptied first.
    ClearDrops,
}

/// Status effect IDs, as used by `ServerApi::has_effect`.
pub mod effect_id {
    pub const SPEED: i32 = 1;
    pub const INSTANT_HEALTH: i32 = 6;
    pub const REGENERATION: i32 = 10;
    pub const RESISTANCE: i32 = 11;
    pub const FIRE_RESISTANCE: i32 = 12;
    pub const POISON: i32 = 19;
    pub const WITHER: i32 = 20;
    pub const ABSORPTION: i32 = 22;
    pub const SATURATION: i32 = 23;
}

/// A single item stack. `runtime_id == 0` is an empty slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginItem {
    pub runtime_id: i32,
    pub count: u16,
    pub metadata: u16,
    /// Raw NBT in network format (enchantments, custom names, ...).
    pub nbt_data: Vec<u8>,
}

impl PluginItem {
    /// An empty slot (air).
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    /// A plain stack with no metadata or NBT.
    pub fn new(runtime_id: i32, count: u16) -> Self {
        Self {
            runtime_id,
            count,
            metadata: 0,
            nbt_data: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.runtime_id == 0 || self.count == 0
    }
}

/// The three player containers a plugin may read and replace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginInventory {
    /// Main inventory slots (hotbar first).
    pub main: Vec<PluginItem>,
    /// Armor slots (helmet, chestplate, leggings, boots).
    pub armor: Vec<PluginItem>,
    /// Item held on the cursor.
    pub cursor: Vec<PluginItem>,
}

/// A game rule value (bool, int, or float), as sent to clients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameRuleValue {
    Bool(bool),
    Int(i32),
    Float(f32),
}

/// A game rule entry for `ServerApi::send_game_rules`.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginGameRule {
    /// Lowercase wire name, e.g. `dodaylightcycle`.
    pub name: String,
    pub editable: bool,
    pub value: GameRuleValue,
}

// ─── Events ──────────────────────────────────────────────────────────────────

/// All events that plugins can listen to.
#[derive(Debug, Clone)]
pub enum PluginEvent {
    // --- Connection events (3) ---
    /// Login packet received; the player is not in a world yet.
    PlayerLogin {
        name: String,
        locale: String,
    },
    PlayerJoin {
        player: PluginPlayer,
    },
    PlayerQuit {
        player: PluginPlayer,
    },

    // --- Player events (3) ---
    PlayerDeath {
        player: PluginPlayer,
        message: String,
    },
    PlayerRespawn {
        player: PluginPlayer,
    },
    /// `player.world` is still the world being left.
    PlayerLevelChange {
        player: PluginPlayer,
        to_world: String,
    },

    // --- Block events (1) ---
    BlockBreak {
        player: PluginPlayer,
        position: PluginBlockPos,
        block_id: u32,
    },

    // --- Entity events (4) ---
    /// Death of a non-player entity. Players fire `PlayerDeath` instead.
    EntityDeath {
        entity_type: String,
        runtime_id: u64,
        world: String,
    },
    EntityDamage {
        runtime_id: u64,
        world: String,
        damage: f32,
        cause: DamageCause,
        attacker_runtime_id: Option<u64>,
    },
    EntityRegainHealth {
        runtime_id: u64,
        world: String,
        amount: f32,
    },
    EntityExplode {
        runtime_id: u64,
        world: String,
        position: (f32, f32, f32),
    },
}

impl PluginEvent {
    /// Whether this event type can be cancelled by a plugin.
    pub fn is_cancellable(&self) -> bool {
        matches!(
            self,
            PluginEvent::BlockBreak { .. }
                | PluginEvent::EntityDamage { .. }
                | PluginEvent::EntityRegainHealth { .. }
                | PluginEvent::EntityExplode { .. }
        )
    }

    /// Whether this event carries a drop list a plugin may clear.
    pub fn has_drops(&self) -> bool {
        matches!(
            self,
            PluginEvent::PlayerDeath { .. }
                | PluginEvent::EntityDeath { .. }
                | PluginEvent::BlockBreak { .. }
        )
    }
}

// ─── Plugin trait ────────────────────────────────────────────────────────────

/// Metadata about a plugin.
#[derive(Debug, Clone)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
}

/// The Plugin trait: implemented by every plugin the host loads.
pub trait Plugin: Send {
    /// Return plugin metadata.
    fn info(&self) -> PluginInfo;

    /// Called when the plugin is loaded. Use `api` to register commands, schedule tasks.
    fn on_enable(&mut self, api: &mut dyn ServerApi);

    /// Called when the plugin is unloaded.
    fn on_disable(&mut self) {}

    /// Called for every dispatched event.
    ///
    /// `Cancelled` is honoured only for cancellable events, `ClearDrops` only
    /// for events that carry drops.
    fn on_event(&mut self, event: &PluginEvent, api: &mut dyn ServerApi) -> EventResult {
        let _ = (event, api);
        EventResult::Continue
    }

    /// Called when a scheduled task fires.
    fn on_task(&mut self, task_id: u32, api: &mut dyn ServerApi) {
        let _ = (task_id, api);
    }

    /// Called when a plugin-registered command is executed. Return a response message.
    fn on_command(
        &mut self,
        command: &str,
        args: &[String],
        sender: &str,
        api: &mut dyn ServerApi,
    ) -> Option<String> {
        let _ = (command, args, sender, api);
        None
    }

    /// Return a default config as JSON. If `Some`, the plugin gets a config file.
    fn default_config(&self) -> Option<serde_json::Value> {
        None
    }

    /// Called with the loaded config (from `plugins/<name>/config.json`).
    fn load_config(&mut self, _config: serde_json::Value) {}
}

// ─── Server API ──────────────────────────────────────────────────────────────

/// Access to host state, passed to plugins during callbacks.
///
/// Read methods return data immediately. Write methods may be deferred by the
/// host until the callback returns.
pub trait ServerApi {
    // --- Players ---
    fn online_players(&self) -> Vec<PluginPlayer>;
    fn get_player(&self, name: &str) -> Option<PluginPlayer>;
    fn send_message(&mut self, player_name: &str, message: &str);

    // --- Inventories ---
    fn inventory(&self, player_name: &str) -> Option<PluginInventory>;
    fn set_inventory(&mut self, player_name: &str, inventory: PluginInventory);

    // --- Entities ---
    fn has_effect(&self, runtime_id: u64, effect_id: i32) -> bool;

    // --- World ---
    /// Send a game-rule update to one player's client.
    fn send_game_rules(&mut self, player_name: &str, rules: &[PluginGameRule]);

    // --- Server ---
    fn get_tick(&self) -> u64;
    fn log(&self, level: LogLevel, message: &str);

    // --- Scheduler ---
    fn schedule_repeating(
        &mut self,
        plugin_name: &str,
        delay_ticks: u64,
        interval_ticks: u64,
        task_id: u32,
    );
    fn cancel_task(&mut self, plugin_name: &str, task_id: u32);

    // --- Commands ---
    fn register_command(&mut self, name: &str, description: &str, plugin_name: &str);
}

// ─── Tests ───────────────────────────────────────────────────────────────────
