//! Per-match state.
//!
//! Everything that survives from one tick to the next lives in a
//! [`MatchContext`] owned by the caller. There is no global state, so a
//! fresh context (or [`MatchContext::reset`]) is a fresh match.

use arena_agents::{ProductionScheduler, RoleTable};
use arena_types::BodyCatalog;

use crate::config::BotConfig;
use crate::telemetry::CombatTracker;

/// State carried across ticks for one match.
#[derive(Debug, Clone)]
pub struct MatchContext {
    pub(crate) config: BotConfig,
    pub(crate) roles: RoleTable,
    pub(crate) tracker: CombatTracker,
    pub(crate) scheduler: ProductionScheduler,
    pub(crate) last_tick: Option<u64>,
}

impl MatchContext {
    /// Create a context using the standard body catalog.
    pub fn new(config: BotConfig) -> Self {
        Self::with_catalog(config, BodyCatalog::standard())
    }

    /// Create a context producing from a custom body catalog.
    pub fn with_catalog(config: BotConfig, catalog: BodyCatalog) -> Self {
        let scheduler = ProductionScheduler::new(catalog, config.roles, config.production);
        Self {
            config,
            roles: RoleTable::new(),
            tracker: CombatTracker::new(),
            scheduler,
            last_tick: None,
        }
    }

    /// The configuration this match runs with.
    pub const fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Current role assignments.
    pub const fn roles(&self) -> &RoleTable {
        &self.roles
    }

    /// The combat tracker.
    pub const fn tracker(&self) -> &CombatTracker {
        &self.tracker
    }

    /// The last tick processed, if any.
    pub const fn last_tick(&self) -> Option<u64> {
        self.last_tick
    }

    /// Whether `tick` starts a new match relative to what was processed.
    ///
    /// A tick of 1 after any processed tick, or a tick number lower than
    /// the last one, means the host restarted.
    pub const fn is_cold_start(&self, tick: u64) -> bool {
        match self.last_tick {
            Some(last) => tick == 1 || tick < last,
            None => false,
        }
    }

    /// Forget all roles, telemetry, and the last tick.
    pub fn reset(&mut self) {
        self.roles.clear();
        self.tracker.reset();
        self.last_tick = None;
    }
}

impl Default for MatchContext {
    fn default() -> Self {
        Self::new(BotConfig::default())
    }
}
