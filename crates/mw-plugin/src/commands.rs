//! The `/mw` command: query and change per-world game rules.
//!
//! ```text
//! /mw gamerule <rule>                    show the rule in your world
//! /mw gamerule <rule> <value> [world]    set it
//! /mw gamerule <rule> reset [world]      return it to the server default
//! /mw gamerules [world]                  list configured rules
//! /mw locale [player]                    show a player's client locale
//! ```

use mw_plugin_api::{PluginGameRule, ServerApi};
use mw_rules::{GameRule, RuleError};
use tracing::info;

use crate::{wire_rules, MultiWorldPlugin};

const USAGE: &str = "Usage: /mw gamerule <rule> [value|reset] [world] | /mw gamerules [world] | /mw locale [player]";

/// Result returned by a `/mw` subcommand.
#[derive(Debug)]
pub struct CommandResult {
    pub success: bool,
    pub messages: Vec<String>,
}

impl CommandResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            messages: vec![message.into()],
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            messages: vec![message.into()],
        }
    }

    pub fn into_message(self) -> String {
        self.messages.join("\n")
    }
}

impl From<RuleError> for CommandResult {
    fn from(e: RuleError) -> Self {
        CommandResult::err(e.to_string())
    }
}

impl MultiWorldPlugin {
    pub fn run_command(
        &mut self,
        args: &[String],
        sender: &str,
        api: &mut dyn ServerApi,
    ) -> CommandResult {
        let Some(sub) = args.first() else {
            return CommandResult::err(USAGE);
        };
        match sub.to_lowercase().as_str() {
            "gamerule" | "gr" => self.cmd_gamerule(&args[1..], sender, api),
            "gamerules" | "rules" => self.cmd_gamerules(&args[1..], sender, &*api),
            "locale" => self.cmd_locale(&args[1..], sender),
            _ => CommandResult::err(USAGE),
        }
    }

    // -----------------------------------------------------------------------
    // /mw gamerule
    // -----------------------------------------------------------------------

    fn cmd_gamerule(
        &mut self,
        args: &[String],
        sender: &str,
        api: &mut dyn ServerApi,
    ) -> CommandResult {
        let Some(rule_name) = args.first() else {
            return CommandResult::err("Usage: /mw gamerule <rule> [value|reset] [world]");
        };
        let rule: GameRule = match rule_name.parse() {
            Ok(rule) => rule,
            Err(e) => return e.into(),
        };
        let world = match resolve_world(args.get(2), sender, &*api) {
            Ok(world) => world,
            Err(result) => return result,
        };

        let Some(value_str) = args.get(1) else {
            // Query mode
            return match self.dispatcher.rules().get(&world, rule) {
                Some(value) => CommandResult::ok(format!("{rule} = {value} in {world}")),
                None => CommandResult::ok(format!(
                    "{rule} = {} in {world} (default)",
                    rule.vanilla_default()
                )),
            };
        };

        if value_str.eq_ignore_ascii_case("reset") {
            self.dispatcher.rules_mut().unset(&world, rule);
            info!("{sender} reset {rule} in {world}");
            // The host default is unknown here, so only the remaining rules are pushed.
            let rules = wire_rules(&self.dispatcher.rules().all_rules_for(&world));
            if !rules.is_empty() {
                broadcast_to_world(api, &world, &rules);
            }
            return CommandResult::ok(format!("{rule} reset in {world}"));
        }

        let value = match rule.parse_value(value_str) {
            Ok(value) => value,
            Err(e) => return e.into(),
        };
        if let Err(e) = self.dispatcher.rules_mut().set(&world, rule, value.clone()) {
            return e.into();
        }
        info!("{sender} set {rule} = {value} in {world}");
        let rules = wire_rules(&self.dispatcher.rules().all_rules_for(&world));
        broadcast_to_world(api, &world, &rules);
        CommandResult::ok(format!("Game rule {rule} set to {value} in {world}"))
    }

    // -----------------------------------------------------------------------
    // /mw gamerules
    // -----------------------------------------------------------------------

    fn cmd_gamerules(&self, args: &[String], sender: &str, api: &dyn ServerApi) -> CommandResult {
        let world = match resolve_world(args.first(), sender, api) {
            Ok(world) => world,
            Err(result) => return result,
        };
        let rules = self.dispatcher.rules().all_rules_for(&world);
        if rules.is_empty() {
            return CommandResult::ok(format!("No game rules set in {world}"));
        }
        let mut messages = vec![format!("Game rules in {world}:")];
        messages.extend(
            rules
                .iter()
                .map(|(rule, value)| format!("- {rule}: {value}")),
        );
        CommandResult {
            success: true,
            messages,
        }
    }

    // -----------------------------------------------------------------------
    // /mw locale
    // -----------------------------------------------------------------------

    fn cmd_locale(&self, args: &[String], sender: &str) -> CommandResult {
        let target = args.first().map(String::as_str).unwrap_or(sender);
        match self.locales.lookup(target) {
            Some(locale) => CommandResult::ok(format!("{target}: {locale}")),
            None => CommandResult::ok(format!(
                "{target}: {} (default)",
                self.config.default_locale
            )),
        }
    }
}

/// The explicit world argument, or the sender's current world.
fn resolve_world(
    arg: Option<&String>,
    sender: &str,
    api: &dyn ServerApi,
) -> Result<String, CommandResult> {
    if let Some(world) = arg {
        return Ok(world.clone());
    }
    api.get_player(sender)
        .map(|p| p.world)
        .ok_or_else(|| CommandResult::err("You must specify a world"))
}

fn broadcast_to_world(api: &mut dyn ServerApi, world: &str, rules: &[PluginGameRule]) {
    let names: Vec<String> = api
        .online_players()
        .into_iter()
        .filter(|p| p.world == world)
        .map(|p| p.name)
        .collect();
    for name in names {
        api.send_game_rules(&name, rules);
    }
}
