//! Tunables for role assignment and production.
//!
//! These structs are embedded in the top-level `arena-config.yaml` under the
//! `roles` and `production` keys. Every field has a default matching the
//! standard strategy: two gatherers, two melee, two ranged, one support, and
//! melee as the overflow role once every quota is met.

use arena_types::Role;
use serde::{Deserialize, Serialize};

/// Target population per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleQuotas {
    /// Gatherer target (default: 2).
    #[serde(default = "default_gatherer_quota")]
    pub gatherer: u32,
    /// Melee target (default: 2).
    #[serde(default = "default_melee_quota")]
    pub melee: u32,
    /// Ranged target (default: 2).
    #[serde(default = "default_ranged_quota")]
    pub ranged: u32,
    /// Support target (default: 1).
    #[serde(default = "default_support_quota")]
    pub support: u32,
}

impl RoleQuotas {
    /// Quota for one role.
    pub const fn quota(&self, role: Role) -> u32 {
        match role {
            Role::Gatherer => self.gatherer,
            Role::Melee => self.melee,
            Role::Ranged => self.ranged,
            Role::Support => self.support,
        }
    }
}

impl Default for RoleQuotas {
    fn default() -> Self {
        Self {
            gatherer: default_gatherer_quota(),
            melee: default_melee_quota(),
            ranged: default_ranged_quota(),
            support: default_support_quota(),
        }
    }
}

/// Role assignment configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleConfig {
    /// Per-role target populations.
    #[serde(default)]
    pub quotas: RoleQuotas,

    /// Role given to new units once every quota is met (default: melee).
    ///
    /// This role is the only one whose population may exceed its quota.
    #[serde(default = "default_fallback_role")]
    pub fallback: Role,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self {
            quotas: RoleQuotas::default(),
            fallback: default_fallback_role(),
        }
    }
}

/// Production scheduler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionConfig {
    /// Minimum stored resource before any combat unit is considered
    /// (default: 200).
    #[serde(default = "default_combat_min_resource")]
    pub combat_min_resource: u32,
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self {
            combat_min_resource: default_combat_min_resource(),
        }
    }
}

const fn default_gatherer_quota() -> u32 {
    2
}

const fn default_melee_quota() -> u32 {
    2
}

const fn default_ranged_quota() -> u32 {
    2
}

const fn default_support_quota() -> u32 {
    1
}

const fn default_fallback_role() -> Role {
    Role::Melee
}

const fn default_combat_min_resource() -> u32 {
    200
}
