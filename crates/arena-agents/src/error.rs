//! Error types for the arena-agents crate.
//!
//! Nothing here is fatal. A command the host refuses costs one unit one
//! tick; the error value is logged and reported in the tick summary, and the
//! unit is simply considered again next tick.

use arena_types::{ActionOutcome, EntityId, Role, UnitAction};

/// A unit command the host did not accept.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// A targeted action failed for a reason other than range.
    #[error("{unit}: {action} on {target} failed: {outcome}")]
    ActionFailed {
        /// The acting unit.
        unit: EntityId,
        /// The attempted action.
        action: UnitAction,
        /// The action's target.
        target: EntityId,
        /// What the host reported.
        outcome: ActionOutcome,
    },

    /// The fallback movement toward a target failed.
    #[error("{unit}: move toward {target} failed: {outcome}")]
    MoveFailed {
        /// The moving unit.
        unit: EntityId,
        /// The movement target.
        target: EntityId,
        /// What the host reported.
        outcome: ActionOutcome,
    },
}

impl DispatchError {
    /// The unit the failed command was issued for.
    pub const fn unit(&self) -> &EntityId {
        match self {
            Self::ActionFailed { unit, .. } | Self::MoveFailed { unit, .. } => unit,
        }
    }
}

/// A production request the host did not accept.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductionError {
    /// The facility refused the template.
    #[error("production of {role} (cost {cost}) at {facility} rejected: {outcome}")]
    Rejected {
        /// The producing facility.
        facility: EntityId,
        /// Role the template was built for.
        role: Role,
        /// Template cost.
        cost: u32,
        /// What the host reported.
        outcome: ActionOutcome,
    },
}
