//! Decision logic for controlled units in the arena.
//!
//! This crate holds everything that decides what the agent does in a tick
//! without owning the tick loop itself. It sits between `arena-types` (the
//! data model) and `arena-core` (per-match state and orchestration).
//!
//! # Modules
//!
//! - [`behavior`] -- Per-role unit behavior and the dispatch pass ([`dispatch_all`])
//! - [`config`] -- Role quotas and production tunables ([`RoleConfig`], [`ProductionConfig`])
//! - [`error`] -- Refused-command errors ([`DispatchError`], [`ProductionError`])
//! - [`host`] -- The [`Host`] capability trait
//! - [`production`] -- Two-stage production scheduler ([`ProductionScheduler`])
//! - [`roles`] -- Role assignment state machine ([`RoleTable`])
//! - `testing` -- A scripted host for tests (`test-support` feature)

pub mod behavior;
pub mod config;
pub mod error;
pub mod host;
pub mod production;
pub mod roles;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

// Re-export primary types at crate root for convenience.
pub use behavior::{BehaviorContext, DispatchSummary, Dispatched, dispatch_all, dispatch_unit};
pub use config::{ProductionConfig, RoleConfig, RoleQuotas};
pub use error::{DispatchError, ProductionError};
pub use host::Host;
pub use production::{
    ProductionOrder, ProductionPlan, ProductionReport, ProductionScheduler, ProductionStage,
};
pub use roles::{RolePopulation, RoleSync, RoleTable, choose_role};
