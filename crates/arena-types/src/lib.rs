//! Shared type definitions for the arena decision core.
//!
//! This crate is the single source of truth for the data model exchanged
//! between the host adapter and the decision logic.
//!
//! # Modules
//!
//! - [`ids`] -- Opaque [`EntityId`] wrapper for host identities
//! - [`enums`] -- Sides, roles, body parts, and record kind tags
//! - [`actions`] -- Host result codes, [`ActionOutcome`], and issued commands
//! - [`body`] -- Body templates and the build-time production catalog
//! - [`snapshot`] -- Raw host records, validation, and the typed [`WorldSnapshot`]

pub mod actions;
pub mod body;
pub mod enums;
pub mod ids;
mod lenient;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use actions::{ActionOutcome, Command, ProduceResult, UnitAction, codes};
pub use body::{BodyCatalog, BodyTemplate, STANDARD_TEMPLATES, parts_cost};
pub use enums::{BodyPart, EntityKind, Role, Side};
pub use ids::EntityId;
pub use snapshot::{
    CombatSample, Entity, Facility, Health, Ingested, OtherEntity, Position, RawEntity, RawStore,
    ResourceNode, SnapshotError, Store, Unit, WorldSnapshot,
};
