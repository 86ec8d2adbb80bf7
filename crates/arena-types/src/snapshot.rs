//! World snapshot records: the host's raw form and the validated model.
//!
//! The host reports every visible object once per tick as a loosely typed
//! [`RawEntity`]. [`WorldSnapshot::ingest`] validates each record exactly
//! once and turns it into a tagged [`Entity`]; everything downstream works
//! on the typed model only.
//!
//! Missing data stays missing. Health the host did not report (or reported
//! as something that is not a valid hit count) becomes `None`, never zero,
//! so the combat tracker cannot mistake a gap in the data for damage. A
//! numeric field of the wrong shape reads as absent rather than failing the
//! frame.
//!
//! A record that fails validation but carries an id is reported as rejected
//! and kept as [`Entity::Other`]. Its identity, side, and health still reach
//! the combat tracker, so a unit that briefly loses its coordinates is not
//! counted as a death.

use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, Side};
use crate::ids::EntityId;

// ---------------------------------------------------------------------------
// Raw host records
// ---------------------------------------------------------------------------

/// A host record as received, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntity {
    /// Host identity. Records without one are rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Kind tag (`unit`, `facility`, `resource_node`, or a native alias).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Ownership flag; absent means neutral.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my: Option<bool>,
    /// Existence flag; only an explicit `false` marks the entity gone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
    /// Current hit points.
    #[serde(
        default,
        deserialize_with = "crate::lenient::int",
        skip_serializing_if = "Option::is_none"
    )]
    pub hits: Option<i64>,
    /// Maximum hit points.
    #[serde(
        default,
        deserialize_with = "crate::lenient::int",
        skip_serializing_if = "Option::is_none"
    )]
    pub hits_max: Option<i64>,
    /// Grid column.
    #[serde(
        default,
        deserialize_with = "crate::lenient::int",
        skip_serializing_if = "Option::is_none"
    )]
    pub x: Option<i32>,
    /// Grid row.
    #[serde(
        default,
        deserialize_with = "crate::lenient::int",
        skip_serializing_if = "Option::is_none"
    )]
    pub y: Option<i32>,
    /// Resource store, for entities that carry or hold resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<RawStore>,
    /// Remaining resource at a resource node.
    #[serde(
        default,
        deserialize_with = "crate::lenient::int",
        skip_serializing_if = "Option::is_none"
    )]
    pub energy: Option<u32>,
}

/// Raw resource store of a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStore {
    /// Resource currently held.
    #[serde(default, deserialize_with = "crate::lenient::int")]
    pub energy: Option<u32>,
    /// Total capacity.
    #[serde(default, deserialize_with = "crate::lenient::int")]
    pub capacity: Option<u32>,
}

impl RawEntity {
    /// A bare record with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// A unit record with the given ownership flag.
    pub fn unit(id: impl Into<String>, my: Option<bool>) -> Self {
        Self {
            kind: Some("unit".to_owned()),
            my,
            ..Self::new(id)
        }
    }

    /// A facility record with the given ownership flag.
    pub fn facility(id: impl Into<String>, my: Option<bool>) -> Self {
        Self {
            kind: Some("facility".to_owned()),
            my,
            ..Self::new(id)
        }
    }

    /// An unowned resource node record.
    pub fn resource_node(id: impl Into<String>) -> Self {
        Self {
            kind: Some("resource_node".to_owned()),
            ..Self::new(id)
        }
    }

    /// Set the ownership flag.
    #[must_use]
    pub const fn owned(mut self, my: Option<bool>) -> Self {
        self.my = my;
        self
    }

    /// Set current hit points.
    #[must_use]
    pub const fn with_hits(mut self, hits: i64) -> Self {
        self.hits = Some(hits);
        self
    }

    /// Set current and maximum hit points.
    #[must_use]
    pub const fn with_health(mut self, hits: i64, hits_max: i64) -> Self {
        self.hits = Some(hits);
        self.hits_max = Some(hits_max);
        self
    }

    /// Set the grid position.
    #[must_use]
    pub const fn at(mut self, x: i32, y: i32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Set the resource store.
    #[must_use]
    pub const fn with_store(mut self, energy: u32, capacity: u32) -> Self {
        self.store = Some(RawStore {
            energy: Some(energy),
            capacity: Some(capacity),
        });
        self
    }

    /// Mark the record as explicitly not existing.
    #[must_use]
    pub const fn gone(mut self) -> Self {
        self.exists = Some(false);
        self
    }
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// A host record that could not be turned into an [`Entity`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// The record has no id, or an empty one.
    #[error("record without id (kind: {kind:?})")]
    MissingId {
        /// The record's kind tag, if any.
        kind: Option<String>,
    },

    /// The kind tag is not one the core understands.
    #[error("record {id} has unknown kind tag {tag:?}")]
    UnknownKind {
        /// The record's id.
        id: EntityId,
        /// The unrecognized tag.
        tag: String,
    },

    /// A positioned kind was reported without coordinates.
    #[error("{kind:?} record {id} has no position")]
    MissingPosition {
        /// The record's id.
        id: EntityId,
        /// The record's kind.
        kind: EntityKind,
    },
}

// ---------------------------------------------------------------------------
// Typed model
// ---------------------------------------------------------------------------

/// A grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Position {
    /// Create a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance (diagonal steps count as one).
    pub const fn range_to(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        if dx > dy { dx } else { dy }
    }
}

/// Known health of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Current hit points.
    pub current: u32,
    /// Maximum hit points, when reported.
    pub max: Option<u32>,
}

impl Health {
    /// Whether current health is known to be below the known maximum.
    pub const fn is_damaged(self) -> bool {
        match self.max {
            Some(max) => self.current < max,
            None => false,
        }
    }
}

/// Resource store of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Resource currently held.
    pub energy: u32,
    /// Total capacity, when reported.
    pub capacity: Option<u32>,
}

impl Store {
    /// Remaining room. An unknown capacity has no room.
    pub const fn free_capacity(self) -> u32 {
        match self.capacity {
            Some(capacity) => capacity.saturating_sub(self.energy),
            None => 0,
        }
    }
}

/// A mobile unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Identity.
    pub id: EntityId,
    /// Ownership.
    pub side: Side,
    /// Existence flag.
    pub exists: bool,
    /// Position.
    pub position: Position,
    /// Health, when reported.
    pub health: Option<Health>,
    /// Carried resource, when reported.
    pub store: Option<Store>,
}

impl Unit {
    /// Room left for carried resource; zero when the store is unknown.
    pub fn free_capacity(&self) -> u32 {
        self.store.map_or(0, Store::free_capacity)
    }

    /// Whether the unit is known to be below its maximum health.
    pub fn is_damaged(&self) -> bool {
        self.health.is_some_and(Health::is_damaged)
    }
}

/// A production facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    /// Identity.
    pub id: EntityId,
    /// Ownership.
    pub side: Side,
    /// Existence flag.
    pub exists: bool,
    /// Position.
    pub position: Position,
    /// Health, when reported.
    pub health: Option<Health>,
    /// Stored resource, when reported.
    pub store: Option<Store>,
}

impl Facility {
    /// Resource available for production; zero when the store is unknown.
    pub fn stored_resource(&self) -> u32 {
        self.store.map_or(0, |s| s.energy)
    }
}

/// A harvestable resource node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNode {
    /// Identity.
    pub id: EntityId,
    /// Existence flag.
    pub exists: bool,
    /// Position.
    pub position: Position,
    /// Remaining resource, when reported.
    pub energy: Option<u32>,
}

/// Any other reported object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherEntity {
    /// Identity.
    pub id: EntityId,
    /// Ownership.
    pub side: Side,
    /// Existence flag.
    pub exists: bool,
    /// Position, when reported.
    pub position: Option<Position>,
    /// Health, when reported.
    pub health: Option<Health>,
    /// The kind the host declared, for a unit, facility, or resource node
    /// that arrived without coordinates.
    pub declared: Option<EntityKind>,
}

/// A validated snapshot record, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    /// A mobile unit.
    Unit(Unit),
    /// A production facility.
    Facility(Facility),
    /// A resource node.
    ResourceNode(ResourceNode),
    /// Anything else.
    Other(OtherEntity),
}

impl Entity {
    /// Identity of the entity.
    pub const fn id(&self) -> &EntityId {
        match self {
            Self::Unit(u) => &u.id,
            Self::Facility(f) => &f.id,
            Self::ResourceNode(n) => &n.id,
            Self::Other(o) => &o.id,
        }
    }

    /// Ownership of the entity. Resource nodes are always neutral.
    pub const fn side(&self) -> Side {
        match self {
            Self::Unit(u) => u.side,
            Self::Facility(f) => f.side,
            Self::ResourceNode(_) => Side::Neutral,
            Self::Other(o) => o.side,
        }
    }

    /// Existence flag.
    pub const fn exists(&self) -> bool {
        match self {
            Self::Unit(u) => u.exists,
            Self::Facility(f) => f.exists,
            Self::ResourceNode(n) => n.exists,
            Self::Other(o) => o.exists,
        }
    }

    /// Health, when reported.
    pub const fn health(&self) -> Option<Health> {
        match self {
            Self::Unit(u) => u.health,
            Self::Facility(f) => f.health,
            Self::ResourceNode(_) => None,
            Self::Other(o) => o.health,
        }
    }

    /// Position, when known.
    pub const fn position(&self) -> Option<Position> {
        match self {
            Self::Unit(u) => Some(u.position),
            Self::Facility(f) => Some(f.position),
            Self::ResourceNode(n) => Some(n.position),
            Self::Other(o) => o.position,
        }
    }

    /// The combat tracker's view of this entity.
    pub fn combat_sample(&self) -> CombatSample {
        CombatSample {
            id: self.id().clone(),
            side: self.side(),
            exists: self.exists(),
            hits: self.health().map(|h| h.current),
        }
    }
}

/// Convert a raw hit count, treating negative or oversized values as unknown.
fn hit_points(raw: Option<i64>) -> Option<u32> {
    raw.and_then(|h| u32::try_from(h).ok())
}

impl TryFrom<RawEntity> for Entity {
    type Error = SnapshotError;

    fn try_from(raw: RawEntity) -> Result<Self, Self::Error> {
        validate(raw).map_err(|rejected| rejected.error)
    }
}

/// A record that failed validation, with whatever could be kept of it.
struct Rejected {
    error: SnapshotError,
    /// The record as an [`Entity::Other`], when it carried an id.
    partial: Option<Entity>,
}

fn validate(raw: RawEntity) -> Result<Entity, Box<Rejected>> {
    let Some(id) = raw.id.filter(|id| !id.is_empty()).map(EntityId::from) else {
        return Err(Box::new(Rejected {
            error: SnapshotError::MissingId { kind: raw.kind },
            partial: None,
        }));
    };

    let side = Side::from_ownership(raw.my);
    let exists = raw.exists != Some(false);
    let health = hit_points(raw.hits).map(|current| Health {
        current,
        max: hit_points(raw.hits_max),
    });
    let store = raw.store.map(|s| Store {
        energy: s.energy.unwrap_or(0),
        capacity: s.capacity,
    });
    let position = match (raw.x, raw.y) {
        (Some(x), Some(y)) => Some(Position::new(x, y)),
        _ => None,
    };
    let other = |id: EntityId, declared: Option<EntityKind>| {
        Entity::Other(OtherEntity {
            id,
            side,
            exists,
            position,
            health,
            declared,
        })
    };

    let kind = match raw.kind.as_deref() {
        None => EntityKind::Other,
        Some(tag) => match EntityKind::from_tag(tag) {
            Some(kind) => kind,
            None => {
                return Err(Box::new(Rejected {
                    error: SnapshotError::UnknownKind {
                        id: id.clone(),
                        tag: tag.to_owned(),
                    },
                    partial: Some(other(id, None)),
                }));
            }
        },
    };

    if kind == EntityKind::Other {
        return Ok(other(id, None));
    }

    let Some(position) = position else {
        return Err(Box::new(Rejected {
            error: SnapshotError::MissingPosition {
                id: id.clone(),
                kind,
            },
            partial: Some(other(id, Some(kind))),
        }));
    };

    Ok(match kind {
        EntityKind::Unit => Entity::Unit(Unit {
            id,
            side,
            exists,
            position,
            health,
            store,
        }),
        EntityKind::Facility => Entity::Facility(Facility {
            id,
            side,
            exists,
            position,
            health,
            store,
        }),
        EntityKind::ResourceNode | EntityKind::Other => Entity::ResourceNode(ResourceNode {
            id,
            exists,
            position,
            energy: raw.energy,
        }),
    })
}

// ---------------------------------------------------------------------------
// Combat sample
// ---------------------------------------------------------------------------

/// Per-tick combat-relevant view of one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSample {
    /// Identity.
    pub id: EntityId,
    /// Ownership.
    pub side: Side,
    /// Existence flag.
    pub exists: bool,
    /// Current hit points, when known.
    pub hits: Option<u32>,
}

impl CombatSample {
    /// An existing entity with the given ownership flag and health.
    pub fn new(id: impl Into<EntityId>, my: Option<bool>, hits: Option<u32>) -> Self {
        Self {
            id: id.into(),
            side: Side::from_ownership(my),
            exists: true,
            hits,
        }
    }

    /// Mark the sample as explicitly not existing.
    #[must_use]
    pub const fn not_existing(mut self) -> Self {
        self.exists = false;
        self
    }
}

// ---------------------------------------------------------------------------
// World snapshot
// ---------------------------------------------------------------------------

/// The full, validated set of visible entities for one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldSnapshot {
    /// Tick the snapshot belongs to.
    pub tick: u64,
    entities: Vec<Entity>,
}

/// Output of [`WorldSnapshot::ingest`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ingested {
    /// The validated snapshot.
    pub snapshot: WorldSnapshot,
    /// Records that failed validation, in input order.
    pub rejected: Vec<SnapshotError>,
}

impl WorldSnapshot {
    /// Validate a tick's raw records. Invalid records are collected, not
    /// dropped silently, so the caller can log them. A rejected record that
    /// carried an id stays in the snapshot as [`Entity::Other`], so its
    /// identity is still observed this tick.
    pub fn ingest(tick: u64, raw: Vec<RawEntity>) -> Ingested {
        let mut entities = Vec::with_capacity(raw.len());
        let mut rejected = Vec::new();
        for record in raw {
            match validate(record) {
                Ok(entity) => entities.push(entity),
                Err(rejection) => {
                    let Rejected { error, partial } = *rejection;
                    rejected.push(error);
                    entities.extend(partial);
                }
            }
        }
        Ingested {
            snapshot: Self { tick, entities },
            rejected,
        }
    }

    /// Ids of every existing unit this agent controls, in host order. This
    /// includes own units that arrived without coordinates, which cannot be
    /// dispatched but still hold their role.
    pub fn controlled_ids(&self) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter_map(|e| match e {
                Entity::Unit(u) if u.side == Side::Own && u.exists => Some(u.id.clone()),
                Entity::Other(o)
                    if o.side == Side::Own
                        && o.exists
                        && o.declared == Some(EntityKind::Unit) =>
                {
                    Some(o.id.clone())
                }
                _ => None,
            })
            .collect()
    }

    /// Existing units of the given side, in host order.
    pub fn units_of(&self, side: Side) -> impl Iterator<Item = &Unit> {
        self.entities.iter().filter_map(move |e| match e {
            Entity::Unit(u) if u.side == side && u.exists => Some(u),
            _ => None,
        })
    }

    /// Existing units controlled by this agent.
    pub fn own_units(&self) -> impl Iterator<Item = &Unit> {
        self.units_of(Side::Own)
    }

    /// Existing opponent units.
    pub fn opponent_units(&self) -> impl Iterator<Item = &Unit> {
        self.units_of(Side::Opponent)
    }

    /// The first existing facility owned by this agent.
    pub fn own_facility(&self) -> Option<&Facility> {
        self.entities.iter().find_map(|e| match e {
            Entity::Facility(f) if f.side == Side::Own && f.exists => Some(f),
            _ => None,
        })
    }

    /// The first existing resource node.
    pub fn primary_resource_node(&self) -> Option<&ResourceNode> {
        self.entities.iter().find_map(|e| match e {
            Entity::ResourceNode(n) if n.exists => Some(n),
            _ => None,
        })
    }

    /// Look up an entity by id.
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    /// Combat samples for every entity in the snapshot.
    pub fn combat_samples(&self) -> Vec<CombatSample> {
        self.entities.iter().map(Entity::combat_sample).collect()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the snapshot holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn unit_record_becomes_typed_unit() {
        let raw = RawEntity::unit("c1", Some(true))
            .with_health(80, 100)
            .at(3, 4)
            .with_store(10, 50);
        let entity = Entity::try_from(raw).unwrap();

        let Entity::Unit(unit) = entity else {
            panic!("expected a unit");
        };
        assert_eq!(unit.side, Side::Own);
        assert!(unit.exists);
        assert_eq!(unit.position, Position::new(3, 4));
        assert_eq!(unit.health.map(|h| h.current), Some(80));
        assert!(unit.is_damaged());
        assert_eq!(unit.free_capacity(), 40);
    }

    #[test]
    fn missing_id_is_rejected() {
        let raw = RawEntity {
            kind: Some("unit".to_owned()),
            ..RawEntity::default()
        };
        assert!(matches!(
            Entity::try_from(raw),
            Err(SnapshotError::MissingId { .. })
        ));

        let empty = RawEntity::new("");
        assert!(matches!(
            Entity::try_from(empty),
            Err(SnapshotError::MissingId { .. })
        ));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let mut raw = RawEntity::new("x").at(0, 0);
        raw.kind = Some("dragon".to_owned());
        assert!(matches!(
            Entity::try_from(raw),
            Err(SnapshotError::UnknownKind { .. })
        ));
    }

    #[test]
    fn positioned_kind_without_coordinates_is_rejected() {
        let raw = RawEntity::facility("s1", Some(true));
        assert!(matches!(
            Entity::try_from(raw),
            Err(SnapshotError::MissingPosition {
                kind: EntityKind::Facility,
                ..
            })
        ));
    }

    #[test]
    fn untagged_record_is_other_without_position() {
        let raw = RawEntity::new("a").owned(Some(true)).with_hits(100);
        let entity = Entity::try_from(raw).unwrap();
        assert!(matches!(entity, Entity::Other(_)));
        assert_eq!(entity.side(), Side::Own);
        assert_eq!(entity.position(), None);
        assert_eq!(entity.combat_sample().hits, Some(100));
    }

    #[test]
    fn absent_or_invalid_hits_are_unknown_not_zero() {
        let none = Entity::try_from(RawEntity::new("a")).unwrap();
        assert_eq!(none.health(), None);

        let negative = Entity::try_from(RawEntity::new("b").with_hits(-5)).unwrap();
        assert_eq!(negative.health(), None);
    }

    #[test]
    fn only_explicit_false_means_gone() {
        let present = Entity::try_from(RawEntity::new("a")).unwrap();
        assert!(present.exists());

        let gone = Entity::try_from(RawEntity::new("a").gone()).unwrap();
        assert!(!gone.exists());
    }

    #[test]
    fn ingest_keeps_valid_and_reports_rejects() {
        let raws = vec![
            RawEntity::unit("c1", Some(true)).at(1, 1),
            RawEntity::default(),
            RawEntity::unit("e1", Some(false)).at(5, 5),
            RawEntity::facility("s1", Some(true)).at(0, 0).with_store(300, 1000),
            RawEntity::resource_node("src").at(9, 9),
        ];
        let ingested = WorldSnapshot::ingest(7, raws);

        assert_eq!(ingested.snapshot.tick, 7);
        assert_eq!(ingested.snapshot.len(), 4);
        assert_eq!(ingested.rejected.len(), 1);

        let snapshot = ingested.snapshot;
        let own: Vec<&str> = snapshot.own_units().map(|u| u.id.as_str()).collect();
        assert_eq!(own, vec!["c1"]);
        let enemy: Vec<&str> = snapshot.opponent_units().map(|u| u.id.as_str()).collect();
        assert_eq!(enemy, vec!["e1"]);
        assert_eq!(snapshot.own_facility().map(Facility::stored_resource), Some(300));
        assert_eq!(
            snapshot.primary_resource_node().map(|n| n.id.as_str()),
            Some("src")
        );
    }

    #[test]
    fn rejected_record_with_id_stays_observable() {
        let raws = vec![
            RawEntity::unit("c1", Some(true)).with_hits(70),
            RawEntity {
                kind: Some("dragon".to_owned()),
                ..RawEntity::new("d1").owned(Some(false)).with_hits(40)
            },
        ];
        let ingested = WorldSnapshot::ingest(3, raws);
        assert_eq!(ingested.rejected.len(), 2);
        assert_eq!(ingested.snapshot.len(), 2);

        let snapshot = ingested.snapshot;
        assert_eq!(snapshot.own_units().count(), 0);
        let Some(Entity::Other(kept)) = snapshot.get(&EntityId::from("c1")) else {
            panic!("expected c1 kept as other");
        };
        assert_eq!(kept.declared, Some(EntityKind::Unit));
        assert_eq!(kept.position, None);

        let samples = snapshot.combat_samples();
        let hits: Vec<(&str, Option<u32>)> =
            samples.iter().map(|s| (s.id.as_str(), s.hits)).collect();
        assert_eq!(hits, vec![("c1", Some(70)), ("d1", Some(40))]);
    }

    #[test]
    fn controlled_ids_include_own_units_without_coordinates() {
        let raws = vec![
            RawEntity::unit("c1", Some(true)).at(1, 1),
            RawEntity::unit("c2", Some(true)),
            RawEntity::unit("c3", Some(true)).gone(),
            RawEntity::unit("e1", Some(false)),
            RawEntity::facility("s1", Some(true)),
            RawEntity::new("x").owned(Some(true)),
        ];
        let snapshot = WorldSnapshot::ingest(1, raws).snapshot;
        let ids: Vec<String> = snapshot
            .controlled_ids()
            .into_iter()
            .map(|id| id.as_str().to_owned())
            .collect();
        assert_eq!(ids, vec!["c1", "c2"]);
        assert_eq!(snapshot.own_units().count(), 1);
    }

    #[test]
    fn gone_units_are_not_listed_as_controlled() {
        let raws = vec![
            RawEntity::unit("c1", Some(true)).at(1, 1).gone(),
            RawEntity::unit("c2", Some(true)).at(1, 2),
        ];
        let snapshot = WorldSnapshot::ingest(1, raws).snapshot;
        let own: Vec<&str> = snapshot.own_units().map(|u| u.id.as_str()).collect();
        assert_eq!(own, vec!["c2"]);
    }

    #[test]
    fn raw_record_reads_camel_case_json() {
        let json = r#"{"id":"c1","kind":"creep","my":true,"hits":90,"hitsMax":100,"x":2,"y":3}"#;
        let raw: RawEntity = serde_json::from_str(json).unwrap();
        assert_eq!(raw.hits_max, Some(100));
        assert!(matches!(Entity::try_from(raw).unwrap(), Entity::Unit(_)));
    }

    #[test]
    fn chebyshev_range() {
        let a = Position::new(0, 0);
        assert_eq!(a.range_to(Position::new(3, 1)), 3);
        assert_eq!(a.range_to(Position::new(-2, -2)), 2);
        assert_eq!(a.range_to(a), 0);
    }
}
