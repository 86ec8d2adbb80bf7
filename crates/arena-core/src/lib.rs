//! Match orchestration for the arena decision core.
//!
//! This crate owns the state that lives across ticks and the pipeline that
//! runs once per tick. The decisions themselves come from `arena-agents`;
//! the host is reached only through its [`arena_agents::Host`] trait.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration ([`BotConfig`])
//! - [`context`] -- Per-match state ([`MatchContext`])
//! - [`telemetry`] -- Damage and death attribution ([`CombatTracker`])
//! - [`tick`] -- The per-tick pipeline ([`run_tick`])

pub mod config;
pub mod context;
pub mod telemetry;
pub mod tick;

// Re-export primary types at crate root for convenience.
pub use config::{BotConfig, ConfigError, LOG_LEVEL_ENV, LoggingConfig, TelemetryConfig};
pub use context::MatchContext;
pub use telemetry::{CombatTickDelta, CombatTotals, CombatTracker, PrevEntityState};
pub use tick::{TickSummary, run_tick};
