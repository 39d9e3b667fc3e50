//! The catalogue of known game rules.

use std::fmt;
use std::str::FromStr;

use crate::error::RuleError;
use crate::value::{RuleValue, ValueKind};

/// A game rule a world can configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GameRule {
    CommandBlockOutput,
    DoDaylightCycle,
    DoEntityDrops,
    DoFireTick,
    DoImmediateRespawn,
    DoInsomnia,
    DoMobLoot,
    DoMobSpawning,
    DoTileDrops,
    DoWeatherCycle,
    DrowningDamage,
    FallDamage,
    FireDamage,
    KeepInventory,
    MobGriefing,
    NaturalRegeneration,
    Pvp,
    SendCommandFeedback,
    ShowCoordinates,
    ShowDeathMessages,
    TntExplodes,
    FunctionCommandLimit,
    MaxCommandChainLength,
    RandomTickSpeed,
    SpawnRadius,
}

impl GameRule {
    pub const ALL: [GameRule; 25] = [
        GameRule::CommandBlockOutput,
        GameRule::DoDaylightCycle,
        GameRule::DoEntityDrops,
        GameRule::DoFireTick,
        GameRule::DoImmediateRespawn,
        GameRule::DoInsomnia,
        GameRule::DoMobLoot,
        GameRule::DoMobSpawning,
        GameRule::DoTileDrops,
        GameRule::DoWeatherCycle,
        GameRule::DrowningDamage,
        GameRule::FallDamage,
        GameRule::FireDamage,
        GameRule::KeepInventory,
        GameRule::MobGriefing,
        GameRule::NaturalRegeneration,
        GameRule::Pvp,
        GameRule::SendCommandFeedback,
        GameRule::ShowCoordinates,
        GameRule::ShowDeathMessages,
        GameRule::TntExplodes,
        GameRule::FunctionCommandLimit,
        GameRule::MaxCommandChainLength,
        GameRule::RandomTickSpeed,
        GameRule::SpawnRadius,
    ];

    /// Display name, as players type it.
    pub fn name(self) -> &'static str {
        match self {
            GameRule::CommandBlockOutput => "commandBlockOutput",
            GameRule::DoDaylightCycle => "doDaylightCycle",
            GameRule::DoEntityDrops => "doEntityDrops",
            GameRule::DoFireTick => "doFireTick",
            GameRule::DoImmediateRespawn => "doImmediateRespawn",
            GameRule::DoInsomnia => "doInsomnia",
            GameRule::DoMobLoot => "doMobLoot",
            GameRule::DoMobSpawning => "doMobSpawning",
            GameRule::DoTileDrops => "doTileDrops",
            GameRule::DoWeatherCycle => "doWeatherCycle",
            GameRule::DrowningDamage => "drowningDamage",
            GameRule::FallDamage => "fallDamage",
            GameRule::FireDamage => "fireDamage",
            GameRule::KeepInventory => "keepInventory",
            GameRule::MobGriefing => "mobGriefing",
            GameRule::NaturalRegeneration => "naturalRegeneration",
            GameRule::Pvp => "pvp",
            GameRule::SendCommandFeedback => "sendCommandFeedback",
            GameRule::ShowCoordinates => "showCoordinates",
            GameRule::ShowDeathMessages => "showDeathMessages",
            GameRule::TntExplodes => "tntExplodes",
            GameRule::FunctionCommandLimit => "functionCommandLimit",
            GameRule::MaxCommandChainLength => "maxCommandChainLength",
            GameRule::RandomTickSpeed => "randomTickSpeed",
            GameRule::SpawnRadius => "spawnRadius",
        }
    }

    /// Lowercase name used in GameRulesChanged packets.
    pub fn wire_name(self) -> String {
        self.name().to_lowercase()
    }

    pub fn kind(self) -> ValueKind {
        match self {
            GameRule::FunctionCommandLimit
            | GameRule::MaxCommandChainLength
            | GameRule::RandomTickSpeed
            | GameRule::SpawnRadius => ValueKind::Int,
            _ => ValueKind::Bool,
        }
    }

    /// Vanilla value, used for display only. An unset rule is left to the host.
    pub fn vanilla_default(self) -> RuleValue {
        match self {
            GameRule::FunctionCommandLimit => RuleValue::Int(10000),
            GameRule::MaxCommandChainLength => RuleValue::Int(65535),
            GameRule::RandomTickSpeed => RuleValue::Int(1),
            GameRule::SpawnRadius => RuleValue::Int(5),
            GameRule::DoImmediateRespawn | GameRule::KeepInventory => RuleValue::Bool(false),
            _ => RuleValue::Bool(true),
        }
    }

    /// Check that `value` has this rule's kind.
    pub fn validate(self, value: &RuleValue) -> Result<(), RuleError> {
        if value.kind() == self.kind() {
            Ok(())
        } else {
            Err(RuleError::WrongValueKind {
                rule: self.name(),
                expected: self.kind(),
                got: value.kind(),
            })
        }
    }

    /// Parse command input into a value for this rule.
    pub fn parse_value(self, input: &str) -> Result<RuleValue, RuleError> {
        RuleValue::parse(self.kind(), input).ok_or_else(|| RuleError::InvalidValue {
            rule: self.name(),
            input: input.to_string(),
        })
    }
}

impl FromStr for GameRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameRule::ALL
            .iter()
            .copied()
            .find(|rule| rule.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| RuleError::UnknownRule(s.to_string()))
    }
}

impl fmt::Display for GameRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
