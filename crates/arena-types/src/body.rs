//! Body templates and the build-time production catalog.
//!
//! Templates are fixed at compile time. Their cost is derived from the part
//! list in a `const fn`, so a template can never disagree with its parts.

use crate::enums::BodyPart::{self, Attack, Carry, Heal, Move, RangedAttack, Work};
use crate::enums::Role;

/// Total cost of a list of body parts.
pub const fn parts_cost(parts: &[BodyPart]) -> u32 {
    let mut total: u32 = 0;
    let mut rest = parts;
    while let [part, tail @ ..] = rest {
        total = total.saturating_add(part.cost());
        rest = tail;
    }
    total
}

/// A fixed composition-and-cost definition for producing one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyTemplate {
    /// Role the produced unit is built for.
    pub role: Role,
    /// Ordered component parts.
    pub parts: &'static [BodyPart],
    /// Total resource cost.
    pub cost: u32,
}

impl BodyTemplate {
    /// Build a template, computing its cost from the parts.
    pub const fn new(role: Role, parts: &'static [BodyPart]) -> Self {
        Self {
            role,
            parts,
            cost: parts_cost(parts),
        }
    }
}

/// The standard template set, grouped by role in ascending cost.
pub const STANDARD_TEMPLATES: &[BodyTemplate] = &[
    // 200
    BodyTemplate::new(Role::Gatherer, &[Work, Carry, Move]),
    // 130, 210, 420
    BodyTemplate::new(Role::Melee, &[Attack, Move]),
    BodyTemplate::new(Role::Melee, &[Attack, Attack, Move]),
    BodyTemplate::new(Role::Melee, &[Attack, Attack, Attack, Attack, Move, Move]),
    // 200, 350
    BodyTemplate::new(Role::Ranged, &[RangedAttack, Move]),
    BodyTemplate::new(Role::Ranged, &[RangedAttack, RangedAttack, Move]),
    // 300
    BodyTemplate::new(Role::Support, &[Heal, Move]),
];

/// Read-only view over a set of templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyCatalog {
    templates: &'static [BodyTemplate],
}

impl BodyCatalog {
    /// Wrap a template set.
    pub const fn new(templates: &'static [BodyTemplate]) -> Self {
        Self { templates }
    }

    /// The catalog backed by [`STANDARD_TEMPLATES`].
    pub const fn standard() -> Self {
        Self::new(STANDARD_TEMPLATES)
    }

    /// All templates for a role, in catalog order.
    pub fn for_role(&self, role: Role) -> impl Iterator<Item = &'static BodyTemplate> {
        self.templates.iter().filter(move |t| t.role == role)
    }

    /// The cheapest template for a role. Ties keep the earliest entry.
    pub fn cheapest(&self, role: Role) -> Option<&'static BodyTemplate> {
        self.for_role(role).reduce(|best, t| if t.cost < best.cost { t } else { best })
    }

    /// The most expensive template for a role whose cost does not exceed
    /// `budget`. Ties keep the earliest entry.
    pub fn most_expensive_affordable(
        &self,
        role: Role,
        budget: u32,
    ) -> Option<&'static BodyTemplate> {
        self.for_role(role)
            .filter(|t| t.cost <= budget)
            .reduce(|best, t| if t.cost > best.cost { t } else { best })
    }
}

impl Default for BodyCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
