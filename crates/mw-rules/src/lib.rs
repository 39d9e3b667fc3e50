//! Per-world game rules and the policy that applies them to game events.

pub mod dispatcher;
pub mod error;
pub mod locale;
pub mod rule;
pub mod snapshot;
pub mod store;
pub mod value;

pub use dispatcher::{GameEvent, Outcome, RuleDispatcher};
pub use error::RuleError;
pub use locale::LocaleRegistry;
pub use rule::GameRule;
pub use snapshot::{InventorySnapshot, SnapshotStore};
pub use store::{RuleStore, WorldRules};
pub use value::{RuleValue, ValueKind};
