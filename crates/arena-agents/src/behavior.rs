//! Per-role behavior dispatch.
//!
//! Each controlled unit gets a single decision per tick, made from its role
//! and the current snapshot:
//!
//! - **Gatherer** -- harvest the primary resource node while it has free
//!   capacity, otherwise deliver to the facility.
//! - **Melee / Ranged** -- attack the opponent unit nearest by path; with no
//!   opponent visible, head back to the facility.
//! - **Support** -- heal the first other friendly unit known to be damaged;
//!   otherwise stay put.
//!
//! Every targeted action is attempted before any movement, so a unit that
//! is already in range acts without losing a tick. Only
//! [`ActionOutcome::NotInRange`] triggers the follow-up move toward the
//! target, and that move happens in the same tick. Other failures end the
//! unit's turn.

use arena_types::{
    ActionOutcome, EntityId, Facility, ResourceNode, Role, Unit, UnitAction, WorldSnapshot,
};
use tracing::{debug, warn};

use crate::error::DispatchError;
use crate::host::Host;
use crate::roles::RoleTable;

/// What a unit did this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// The targeted action was accepted.
    Acted {
        /// Action performed.
        action: UnitAction,
        /// Its target.
        target: EntityId,
    },
    /// The unit moved toward a target instead.
    Moved {
        /// Entity moved toward.
        target: EntityId,
    },
    /// No command was issued.
    Idle,
}

/// Targets shared by every unit's decision this tick.
#[derive(Debug, Clone)]
pub struct BehaviorContext<'w> {
    world: &'w WorldSnapshot,
    facility: Option<&'w Facility>,
    resource_node: Option<&'w ResourceNode>,
    opponents: Vec<EntityId>,
}

impl<'w> BehaviorContext<'w> {
    /// Gather the facility, resource node, and opponent list once per tick.
    pub fn new(world: &'w WorldSnapshot) -> Self {
        Self {
            world,
            facility: world.own_facility(),
            resource_node: world.primary_resource_node(),
            opponents: world.opponent_units().map(|u| u.id.clone()).collect(),
        }
    }
}

/// Decide and issue one unit's command for this tick.
///
/// A unit without a role does nothing.
pub fn dispatch_unit<H: Host + ?Sized>(
    host: &mut H,
    ctx: &BehaviorContext<'_>,
    unit: &Unit,
    role: Option<Role>,
) -> Result<Dispatched, DispatchError> {
    match role {
        Some(Role::Gatherer) => gather(host, ctx, unit),
        Some(Role::Melee) => fight(host, ctx, unit, UnitAction::Attack),
        Some(Role::Ranged) => fight(host, ctx, unit, UnitAction::RangedAttack),
        Some(Role::Support) => support(host, ctx, unit),
        None => {
            warn!(unit = %unit.id, "unit has no role");
            Ok(Dispatched::Idle)
        }
    }
}

fn gather<H: Host + ?Sized>(
    host: &mut H,
    ctx: &BehaviorContext<'_>,
    unit: &Unit,
) -> Result<Dispatched, DispatchError> {
    if unit.free_capacity() > 0 {
        match ctx.resource_node {
            Some(node) => act_or_approach(host, unit, UnitAction::Harvest, &node.id),
            None => Ok(Dispatched::Idle),
        }
    } else {
        match ctx.facility {
            Some(facility) => act_or_approach(host, unit, UnitAction::Transfer, &facility.id),
            None => Ok(Dispatched::Idle),
        }
    }
}

fn fight<H: Host + ?Sized>(
    host: &mut H,
    ctx: &BehaviorContext<'_>,
    unit: &Unit,
    action: UnitAction,
) -> Result<Dispatched, DispatchError> {
    if let Some(target) = host.find_nearest_by_path(&unit.id, &ctx.opponents) {
        return act_or_approach(host, unit, action, &target);
    }
    match ctx.facility {
        Some(facility) => approach(host, unit, &facility.id),
        None => Ok(Dispatched::Idle),
    }
}

fn support<H: Host + ?Sized>(
    host: &mut H,
    ctx: &BehaviorContext<'_>,
    unit: &Unit,
) -> Result<Dispatched, DispatchError> {
    let damaged = ctx
        .world
        .own_units()
        .find(|other| other.id != unit.id && other.is_damaged());
    match damaged {
        Some(patient) => act_or_approach(host, unit, UnitAction::Heal, &patient.id),
        None => Ok(Dispatched::Idle),
    }
}

/// Attempt an action; if the target is out of range, move toward it.
fn act_or_approach<H: Host + ?Sized>(
    host: &mut H,
    unit: &Unit,
    action: UnitAction,
    target: &EntityId,
) -> Result<Dispatched, DispatchError> {
    match host.act(&unit.id, action, target) {
        ActionOutcome::Success => {
            debug!(unit = %unit.id, %action, %target, "acted");
            Ok(Dispatched::Acted {
                action,
                target: target.clone(),
            })
        }
        ActionOutcome::NotInRange => approach(host, unit, target),
        outcome => Err(DispatchError::ActionFailed {
            unit: unit.id.clone(),
            action,
            target: target.clone(),
            outcome,
        }),
    }
}

fn approach<H: Host + ?Sized>(
    host: &mut H,
    unit: &Unit,
    target: &EntityId,
) -> Result<Dispatched, DispatchError> {
    let outcome = host.move_toward(&unit.id, target);
    if outcome.is_success() {
        debug!(unit = %unit.id, %target, "moving");
        Ok(Dispatched::Moved {
            target: target.clone(),
        })
    } else {
        Err(DispatchError::MoveFailed {
            unit: unit.id.clone(),
            target: target.clone(),
            outcome,
        })
    }
}

/// Outcome counts for one tick's dispatch pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Units whose action was accepted.
    pub acted: u32,
    /// Units that moved instead.
    pub moved: u32,
    /// Units that issued nothing.
    pub idle: u32,
    /// Refused commands.
    pub failures: Vec<DispatchError>,
}

/// Dispatch every controlled unit in snapshot order.
pub fn dispatch_all<H: Host + ?Sized>(
    host: &mut H,
    world: &WorldSnapshot,
    roles: &RoleTable,
) -> DispatchSummary {
    let ctx = BehaviorContext::new(world);
    let mut summary = DispatchSummary::default();

    for unit in world.own_units() {
        match dispatch_unit(host, &ctx, unit, roles.role_of(&unit.id)) {
            Ok(Dispatched::Acted { .. }) => summary.acted = summary.acted.saturating_add(1),
            Ok(Dispatched::Moved { .. }) => summary.moved = summary.moved.saturating_add(1),
            Ok(Dispatched::Idle) => summary.idle = summary.idle.saturating_add(1),
            Err(err) => {
                warn!(error = %err, "command refused");
                summary.failures.push(err);
            }
        }
    }

    summary
}
