//! Enumeration types shared across the arena workspace.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// Ownership classification of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Controlled by this agent.
    Own,
    /// Controlled by the opposing player.
    Opponent,
    /// Unowned, or ownership was not reported.
    Neutral,
}

impl Side {
    /// Derive the side from the host's optional ownership flag.
    ///
    /// An absent flag is neutral, never opponent.
    pub const fn from_ownership(my: Option<bool>) -> Self {
        match my {
            Some(true) => Self::Own,
            Some(false) => Self::Opponent,
            None => Self::Neutral,
        }
    }
}

impl core::fmt::Display for Side {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Own => write!(f, "own"),
            Self::Opponent => write!(f, "opponent"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Behavioral category of a controlled unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Harvests resource and delivers it to the facility.
    Gatherer,
    /// Close-range attacker.
    Melee,
    /// Long-range attacker.
    Ranged,
    /// Heals damaged friendly units.
    Support,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 4] = [Self::Gatherer, Self::Melee, Self::Ranged, Self::Support];

    /// Combat roles in the order they are filled, both for assignment and
    /// for production.
    pub const COMBAT_PRIORITY: [Self; 3] = [Self::Melee, Self::Ranged, Self::Support];

    /// Whether this role fights (everything except the gatherer).
    pub const fn is_combat(self) -> bool {
        !matches!(self, Self::Gatherer)
    }

    /// Lowercase label for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gatherer => "gatherer",
            Self::Melee => "melee",
            Self::Ranged => "ranged",
            Self::Support => "support",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BodyPart
// ---------------------------------------------------------------------------

/// A component part of a produced unit's body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    /// Locomotion.
    Move,
    /// Harvesting.
    Work,
    /// Resource storage.
    Carry,
    /// Melee attack.
    Attack,
    /// Ranged attack.
    RangedAttack,
    /// Healing.
    Heal,
    /// Extra hit points.
    Tough,
}

impl BodyPart {
    /// Resource cost of one part.
    pub const fn cost(self) -> u32 {
        match self {
            Self::Move | Self::Carry => 50,
            Self::Work => 100,
            Self::Attack => 80,
            Self::RangedAttack => 150,
            Self::Heal => 250,
            Self::Tough => 10,
        }
    }
}

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Kind tag of a snapshot record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A mobile unit.
    Unit,
    /// A production facility.
    Facility,
    /// A harvestable resource node.
    ResourceNode,
    /// Anything else the host reports (walls, containers, untagged records).
    Other,
}

impl EntityKind {
    /// Parse a host kind tag. Accepts the arena's native names as aliases.
    ///
    /// Returns `None` for an unrecognized tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "unit" | "creep" => Some(Self::Unit),
            "facility" | "spawn" => Some(Self::Facility),
            "resource_node" | "source" => Some(Self::ResourceNode),
            "other" | "structure" | "container" | "wall" => Some(Self::Other),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_from_ownership_flag() {
        assert_eq!(Side::from_ownership(Some(true)), Side::Own);
        assert_eq!(Side::from_ownership(Some(false)), Side::Opponent);
        assert_eq!(Side::from_ownership(None), Side::Neutral);
    }

    #[test]
    fn combat_priority_excludes_gatherer() {
        assert!(!Role::COMBAT_PRIORITY.contains(&Role::Gatherer));
        assert!(Role::COMBAT_PRIORITY.iter().all(|r| r.is_combat()));
        assert!(!Role::Gatherer.is_combat());
    }

    #[test]
    fn role_serde_uses_snake_case() {
        let json = serde_json::to_string(&Role::Support).ok();
        assert_eq!(json.as_deref(), Some("\"support\""));
        let parsed: Result<Role, _> = serde_json::from_str("\"ranged\"");
        assert_eq!(parsed.ok(), Some(Role::Ranged));
    }

    #[test]
    fn body_part_costs() {
        assert_eq!(BodyPart::Work.cost(), 100);
        assert_eq!(BodyPart::Attack.cost(), 80);
        assert_eq!(BodyPart::RangedAttack.cost(), 150);
        assert_eq!(BodyPart::Heal.cost(), 250);
    }

    #[test]
    fn kind_tags_and_aliases() {
        assert_eq!(EntityKind::from_tag("creep"), Some(EntityKind::Unit));
        assert_eq!(EntityKind::from_tag("spawn"), Some(EntityKind::Facility));
        assert_eq!(EntityKind::from_tag("source"), Some(EntityKind::ResourceNode));
        assert_eq!(EntityKind::from_tag("wall"), Some(EntityKind::Other));
        assert_eq!(EntityKind::from_tag("dragon"), None);
    }
}
