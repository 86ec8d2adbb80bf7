//! Role assignment state machine.
//!
//! Every controlled unit carries exactly one [`Role`]. A role is chosen once,
//! at the first sighting of a unit, and never changes afterwards; the only
//! way out of a role is eviction when the unit is no longer listed.
//!
//! ## Choosing a role
//!
//! 1. Gatherer, while the gatherer population is below quota.
//! 2. Otherwise the first of melee, ranged, support still below quota.
//! 3. Otherwise the configured fallback role, so no unit stays unassigned.
//!
//! The choice depends only on the current populations, so the table is
//! deterministic for a given sequence of sightings.

use std::collections::{BTreeMap, BTreeSet};

use arena_types::{EntityId, Role};
use serde::Serialize;
use tracing::debug;

use crate::config::RoleConfig;

// ---------------------------------------------------------------------------
// RolePopulation
// ---------------------------------------------------------------------------

/// Head count per role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RolePopulation {
    /// Gatherers.
    pub gatherer: u32,
    /// Melee attackers.
    pub melee: u32,
    /// Ranged attackers.
    pub ranged: u32,
    /// Supports.
    pub support: u32,
}

impl RolePopulation {
    /// Head count for one role.
    pub const fn get(&self, role: Role) -> u32 {
        match role {
            Role::Gatherer => self.gatherer,
            Role::Melee => self.melee,
            Role::Ranged => self.ranged,
            Role::Support => self.support,
        }
    }

    /// Count one more unit in a role.
    pub const fn increment(&mut self, role: Role) {
        let slot = match role {
            Role::Gatherer => &mut self.gatherer,
            Role::Melee => &mut self.melee,
            Role::Ranged => &mut self.ranged,
            Role::Support => &mut self.support,
        };
        *slot = slot.saturating_add(1);
    }

    /// Total across all roles.
    pub const fn total(&self) -> u32 {
        self.gatherer
            .saturating_add(self.melee)
            .saturating_add(self.ranged)
            .saturating_add(self.support)
    }
}

/// Pick the role for a newly sighted unit given the current populations.
pub fn choose_role(population: &RolePopulation, config: &RoleConfig) -> Role {
    let below_quota = |role: Role| population.get(role) < config.quotas.quota(role);

    if below_quota(Role::Gatherer) {
        return Role::Gatherer;
    }

    Role::COMBAT_PRIORITY
        .into_iter()
        .find(|&role| below_quota(role))
        .unwrap_or(config.fallback)
}

// ---------------------------------------------------------------------------
// RoleTable
// ---------------------------------------------------------------------------

/// What one [`RoleTable::sync`] pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSync {
    /// Entries removed because their unit was not listed.
    pub evicted: Vec<(EntityId, Role)>,
    /// Units seen for the first time and the role each received.
    pub assigned: Vec<(EntityId, Role)>,
}

/// Mapping from controlled unit to its role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleTable {
    assignments: BTreeMap<EntityId, Role>,
}

impl RoleTable {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            assignments: BTreeMap::new(),
        }
    }

    /// The role of a unit, if assigned.
    pub fn role_of(&self, id: &EntityId) -> Option<Role> {
        self.assignments.get(id).copied()
    }

    /// Head count per role over the whole table.
    pub fn population(&self) -> RolePopulation {
        let mut population = RolePopulation::default();
        for &role in self.assignments.values() {
            population.increment(role);
        }
        population
    }

    /// Bring the table in line with this tick's controlled units.
    ///
    /// Entries for units not in `controlled` are evicted first, so the
    /// populations used for new assignments count only units that are still
    /// present. New units are then assigned in the given order, each one
    /// counted before the next is considered.
    pub fn sync(&mut self, controlled: &[EntityId], config: &RoleConfig) -> RoleSync {
        let present: BTreeSet<&EntityId> = controlled.iter().collect();
        let mut evicted = Vec::new();
        self.assignments.retain(|id, role| {
            let keep = present.contains(id);
            if !keep {
                evicted.push((id.clone(), *role));
            }
            keep
        });

        let mut population = self.population();
        let mut assigned = Vec::new();
        for id in controlled {
            if self.assignments.contains_key(id) {
                continue;
            }
            let role = choose_role(&population, config);
            self.assignments.insert(id.clone(), role);
            population.increment(role);
            debug!(unit = %id, %role, "role assigned");
            assigned.push((id.clone(), role));
        }

        for (id, role) in &evicted {
            debug!(unit = %id, %role, "role evicted");
        }

        RoleSync { evicted, assigned }
    }

    /// Record the role a freshly produced unit was built for.
    ///
    /// Returns `false` and leaves the table untouched when the id already
    /// has a role.
    pub fn reserve(&mut self, id: EntityId, role: Role) -> bool {
        if self.assignments.contains_key(&id) {
            return false;
        }
        debug!(unit = %id, %role, "role reserved for produced unit");
        self.assignments.insert(id, role);
        true
    }

    /// Number of assigned units.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether no unit is assigned.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Drop every assignment.
    pub fn clear(&mut self) {
        self.assignments.clear();
    }
}
