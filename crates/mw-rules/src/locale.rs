//! Client locale per connected player.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct LocaleRegistry {
    locales: HashMap<String, String>,
}

impl LocaleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the locale sent in a player's login packet.
    pub fn record(&mut self, identity: &str, locale: &str) {
        self.locales
            .insert(identity.to_string(), locale.to_string());
    }

    pub fn lookup(&self, identity: &str) -> Option<&str> {
        self.locales.get(identity).map(String::as_str)
    }

    pub fn locale_or<'a>(&'a self, identity: &str, fallback: &'a str) -> &'a str {
        self.lookup(identity).unwrap_or(fallback)
    }

    /// Forget a player on disconnect.
    pub fn remove(&mut self, identity: &str) -> Option<String> {
        self.locales.remove(identity)
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}
