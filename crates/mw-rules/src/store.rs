//! Per-world game rule store.
//!
//! A rule that was never set for a world is absent, which means "use the
//! host's default". Absent and `false` are never the same thing here.

use std::collections::{BTreeMap, HashMap};

use crate::error::RuleError;
use crate::rule::GameRule;
use crate::value::RuleValue;

/// Rules configured for one world, ordered by rule.
pub type WorldRules = BTreeMap<GameRule, RuleValue>;

#[derive(Debug, Default)]
pub struct RuleStore {
    worlds: HashMap<String, WorldRules>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value explicitly set for `rule` in `world`, if any.
    pub fn get(&self, world: &str, rule: GameRule) -> Option<&RuleValue> {
        self.worlds.get(world).and_then(|rules| rules.get(&rule))
    }

    /// Whether `rule` is explicitly set to `false` in `world`.
    pub fn is_disabled(&self, world: &str, rule: GameRule) -> bool {
        self.get(world, rule).and_then(RuleValue::as_bool) == Some(false)
    }

    /// Set `rule` for `world`, overwriting any previous value.
    pub fn set(&mut self, world: &str, rule: GameRule, value: RuleValue) -> Result<(), RuleError> {
        rule.validate(&value)?;
        self.worlds
            .entry(world.to_string())
            .or_default()
            .insert(rule, value);
        Ok(())
    }

    /// Like [`RuleStore::set`], but takes the rule by name.
    pub fn set_named(
        &mut self,
        world: &str,
        name: &str,
        value: RuleValue,
    ) -> Result<(), RuleError> {
        let rule: GameRule = name.parse()?;
        self.set(world, rule, value)
    }

    /// Set several rules at once. Nothing is applied unless every entry is valid.
    pub fn update<I>(&mut self, world: &str, rules: I) -> Result<(), RuleError>
    where
        I: IntoIterator<Item = (String, RuleValue)>,
    {
        let mut parsed = Vec::new();
        for (name, value) in rules {
            let rule: GameRule = name.parse()?;
            rule.validate(&value)?;
            parsed.push((rule, value));
        }
        if parsed.is_empty() {
            return Ok(());
        }
        let entry = self.worlds.entry(world.to_string()).or_default();
        entry.extend(parsed);
        Ok(())
    }

    /// Return `rule` to the host default. Returns the value that was set.
    pub fn unset(&mut self, world: &str, rule: GameRule) -> Option<RuleValue> {
        let rules = self.worlds.get_mut(world)?;
        let old = rules.remove(&rule);
        if rules.is_empty() {
            self.worlds.remove(world);
        }
        old
    }

    /// Copy of every rule set for `world`.
    pub fn all_rules_for(&self, world: &str) -> WorldRules {
        self.worlds.get(world).cloned().unwrap_or_default()
    }

    /// Worlds with at least one rule set, sorted.
    pub fn worlds(&self) -> Vec<&str> {
        let mut worlds: Vec<&str> = self.worlds.keys().map(String::as_str).collect();
        worlds.sort_unstable();
        worlds
    }
}
