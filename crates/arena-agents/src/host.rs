//! The host boundary.
//!
//! The arena itself (entity listing, pathfinding, and the unit and facility
//! primitives) lives outside this workspace. [`Host`] is the capability set
//! the decision core consumes. Implementations translate the host's integer
//! result codes with [`ActionOutcome::from_code`] and
//! [`ProduceResult::from_raw`], so nothing past this trait sees a raw code.
//!
//! Every method is synchronous. One tick's decision pass calls them from a
//! single thread and expects each call to return immediately.
//!
//! [`ActionOutcome::from_code`]: arena_types::ActionOutcome::from_code
//! [`ProduceResult::from_raw`]: arena_types::ProduceResult::from_raw

use arena_types::{ActionOutcome, BodyTemplate, EntityId, ProduceResult, RawEntity, UnitAction};

/// Primitives supplied by the arena host.
pub trait Host {
    /// The current tick number.
    fn tick(&self) -> u64;

    /// Every visible entity for this tick, unfiltered and unvalidated.
    ///
    /// The list is a full snapshot; no incremental diff is provided.
    fn list_entities(&self) -> Vec<RawEntity>;

    /// The candidate nearest to `origin` by path, or `None` when no
    /// candidate is reachable.
    fn find_nearest_by_path(&self, origin: &EntityId, candidates: &[EntityId])
    -> Option<EntityId>;

    /// Perform a targeted action with a unit.
    fn act(&mut self, unit: &EntityId, action: UnitAction, target: &EntityId) -> ActionOutcome;

    /// Move a unit one step toward a target.
    fn move_toward(&mut self, unit: &EntityId, target: &EntityId) -> ActionOutcome;

    /// Ask a facility to produce a unit from a template.
    fn produce(&mut self, facility: &EntityId, template: &BodyTemplate) -> ProduceResult;
}
