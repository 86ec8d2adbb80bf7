//! Commands issued to the host and the outcomes it reports back.
//!
//! The host signals action results with integer codes. They are translated
//! into [`ActionOutcome`] exactly once, at the host boundary, so decision
//! logic only ever matches on named outcomes.

use serde::{Deserialize, Serialize};

use crate::enums::Role;
use crate::ids::EntityId;

/// Integer result codes used by the arena host.
pub mod codes {
    /// The action was accepted.
    pub const OK: i32 = 0;
    /// The actor is busy (e.g. the facility is already producing).
    pub const ERR_BUSY: i32 = -4;
    /// The referenced object was not found.
    pub const ERR_NOT_FOUND: i32 = -5;
    /// Not enough resource to perform the action.
    pub const ERR_NOT_ENOUGH_RESOURCES: i32 = -6;
    /// The target is not valid for this action.
    pub const ERR_INVALID_TARGET: i32 = -7;
    /// The target is too far away.
    pub const ERR_NOT_IN_RANGE: i32 = -9;
}

/// Closed classification of a host action result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The action was accepted.
    Success,
    /// The target is out of range; the caller may move toward it.
    NotInRange,
    /// Not enough resource (production cost, empty store on transfer).
    NotEnoughResource,
    /// The target does not exist or is not valid for the action.
    InvalidTarget,
    /// The actor cannot act right now.
    Busy,
    /// Any other host failure, carrying the raw code.
    Other(i32),
}

impl ActionOutcome {
    /// Translate a raw host result code.
    pub const fn from_code(code: i32) -> Self {
        match code {
            codes::OK => Self::Success,
            codes::ERR_NOT_IN_RANGE => Self::NotInRange,
            codes::ERR_NOT_ENOUGH_RESOURCES => Self::NotEnoughResource,
            codes::ERR_INVALID_TARGET | codes::ERR_NOT_FOUND => Self::InvalidTarget,
            codes::ERR_BUSY => Self::Busy,
            other => Self::Other(other),
        }
    }

    /// Whether the host accepted the action.
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl core::fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::NotInRange => write!(f, "not in range"),
            Self::NotEnoughResource => write!(f, "not enough resource"),
            Self::InvalidTarget => write!(f, "invalid target"),
            Self::Busy => write!(f, "busy"),
            Self::Other(code) => write!(f, "host error {code}"),
        }
    }
}

/// A targeted unit action. Movement is issued separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitAction {
    /// Harvest a resource node.
    Harvest,
    /// Transfer carried resource into a store.
    Transfer,
    /// Melee attack.
    Attack,
    /// Ranged attack.
    RangedAttack,
    /// Heal a friendly unit.
    Heal,
}

impl UnitAction {
    /// Maximum distance (Chebyshev) at which the action can be performed.
    pub const fn range(self) -> u32 {
        match self {
            Self::RangedAttack => 3,
            Self::Harvest | Self::Transfer | Self::Attack | Self::Heal => 1,
        }
    }
}

impl core::fmt::Display for UnitAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Harvest => write!(f, "harvest"),
            Self::Transfer => write!(f, "transfer"),
            Self::Attack => write!(f, "attack"),
            Self::RangedAttack => write!(f, "ranged_attack"),
            Self::Heal => write!(f, "heal"),
        }
    }
}

/// Result of a production request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProduceResult {
    /// Translated outcome of the request.
    pub outcome: ActionOutcome,
    /// Id of the newly produced unit, when the host reports one.
    pub unit_id: Option<EntityId>,
}

impl ProduceResult {
    /// Translate the host's `{ error?, object? }` production response.
    ///
    /// An absent error code means success.
    pub fn from_raw(error: Option<i32>, unit_id: Option<String>) -> Self {
        let outcome = error.map_or(ActionOutcome::Success, ActionOutcome::from_code);
        Self {
            outcome,
            unit_id: unit_id.filter(|id| !id.is_empty()).map(EntityId::from),
        }
    }

    /// A successful production that yielded the given unit.
    pub const fn produced(unit_id: EntityId) -> Self {
        Self {
            outcome: ActionOutcome::Success,
            unit_id: Some(unit_id),
        }
    }

    /// A failed production.
    pub const fn failed(outcome: ActionOutcome) -> Self {
        Self {
            outcome,
            unit_id: None,
        }
    }
}

/// A command as issued to the host, recorded for logs and replays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// A targeted unit action.
    Act {
        /// Acting unit.
        unit: EntityId,
        /// Action performed.
        action: UnitAction,
        /// Target entity.
        target: EntityId,
    },
    /// Movement toward a target.
    Move {
        /// Moving unit.
        unit: EntityId,
        /// Entity moved toward.
        target: EntityId,
    },
    /// A production request at the facility.
    Produce {
        /// Producing facility.
        facility: EntityId,
        /// Role the template was built for.
        role: Role,
        /// Template cost.
        cost: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_translate_to_named_outcomes() {
        assert_eq!(ActionOutcome::from_code(codes::OK), ActionOutcome::Success);
        assert_eq!(
            ActionOutcome::from_code(codes::ERR_NOT_IN_RANGE),
            ActionOutcome::NotInRange
        );
        assert_eq!(
            ActionOutcome::from_code(codes::ERR_NOT_ENOUGH_RESOURCES),
            ActionOutcome::NotEnoughResource
        );
        assert_eq!(
            ActionOutcome::from_code(codes::ERR_INVALID_TARGET),
            ActionOutcome::InvalidTarget
        );
        assert_eq!(ActionOutcome::from_code(codes::ERR_BUSY), ActionOutcome::Busy);
        assert_eq!(
            ActionOutcome::from_code(-11),
            ActionOutcome::Other(-11)
        );
    }

    #[test]
    fn produce_without_error_is_success() {
        let result = ProduceResult::from_raw(None, Some("c9".to_owned()));
        assert!(result.outcome.is_success());
        assert_eq!(result.unit_id, Some(EntityId::from("c9")));
    }

    #[test]
    fn produce_with_error_keeps_code() {
        let result = ProduceResult::from_raw(Some(codes::ERR_BUSY), None);
        assert_eq!(result.outcome, ActionOutcome::Busy);
        assert_eq!(result.unit_id, None);
    }

    #[test]
    fn empty_unit_id_is_dropped() {
        let result = ProduceResult::from_raw(None, Some(String::new()));
        assert_eq!(result.unit_id, None);
    }

    #[test]
    fn ranged_attack_reaches_further() {
        assert!(UnitAction::RangedAttack.range() > UnitAction::Attack.range());
        assert_eq!(UnitAction::Heal.range(), 1);
    }
}
