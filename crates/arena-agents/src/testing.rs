//! A scripted [`Host`] for tests.
//!
//! Every command is recorded. Actions succeed unless an outcome has been
//! scripted for the acting unit. Nearest-by-path returns the scripted target
//! for the origin when it is among the candidates, and the first candidate
//! otherwise. Production succeeds with a fresh `produced-N` id unless
//! scripted to fail.

use std::collections::BTreeMap;

use arena_types::{
    ActionOutcome, BodyTemplate, Command, EntityId, ProduceResult, RawEntity, UnitAction,
};

use crate::host::Host;

/// In-memory host with scripted outcomes.
#[derive(Debug, Clone, Default)]
pub struct ScriptedHost {
    /// Tick reported by [`Host::tick`].
    pub tick: u64,
    /// Records returned by [`Host::list_entities`].
    pub entities: Vec<RawEntity>,
    /// Outcome of [`Host::act`] per acting unit (default: success).
    pub act_outcomes: BTreeMap<EntityId, ActionOutcome>,
    /// Path-nearest target per origin (default: the first candidate).
    pub nearest: BTreeMap<EntityId, EntityId>,
    /// Outcome of [`Host::move_toward`] (default: success).
    pub move_outcome: Option<ActionOutcome>,
    /// Outcome of [`Host::produce`] (default: success).
    pub produce_outcome: Option<ActionOutcome>,
    /// Every command issued, in order.
    pub commands: Vec<Command>,
    produced: u32,
}

impl ScriptedHost {
    /// A host reporting the given tick and records.
    pub fn new(tick: u64, entities: Vec<RawEntity>) -> Self {
        Self {
            tick,
            entities,
            ..Self::default()
        }
    }

    /// Script the outcome of actions taken by `unit`.
    #[must_use]
    pub fn with_act_outcome(mut self, unit: &str, outcome: ActionOutcome) -> Self {
        self.act_outcomes.insert(EntityId::from(unit), outcome);
        self
    }

    /// Script the path-nearest target of `origin`.
    #[must_use]
    pub fn with_nearest(mut self, origin: &str, target: &str) -> Self {
        self.nearest.insert(EntityId::from(origin), EntityId::from(target));
        self
    }

    /// Script the outcome of every movement.
    #[must_use]
    pub const fn with_move_outcome(mut self, outcome: ActionOutcome) -> Self {
        self.move_outcome = Some(outcome);
        self
    }

    /// Script the outcome of every production request.
    #[must_use]
    pub const fn with_produce_outcome(mut self, outcome: ActionOutcome) -> Self {
        self.produce_outcome = Some(outcome);
        self
    }

    /// Replace the current frame.
    pub fn set_frame(&mut self, tick: u64, entities: Vec<RawEntity>) {
        self.tick = tick;
        self.entities = entities;
    }

    /// Drain the recorded commands.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded production commands only.
    pub fn production_commands(&self) -> Vec<&Command> {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Produce { .. }))
            .collect()
    }
}

impl Host for ScriptedHost {
    fn tick(&self) -> u64 {
        self.tick
    }

    fn list_entities(&self) -> Vec<RawEntity> {
        self.entities.clone()
    }

    fn find_nearest_by_path(
        &self,
        origin: &EntityId,
        candidates: &[EntityId],
    ) -> Option<EntityId> {
        self.nearest
            .get(origin)
            .filter(|target| candidates.contains(target))
            .or_else(|| candidates.first())
            .cloned()
    }

    fn act(&mut self, unit: &EntityId, action: UnitAction, target: &EntityId) -> ActionOutcome {
        self.commands.push(Command::Act {
            unit: unit.clone(),
            action,
            target: target.clone(),
        });
        self.act_outcomes
            .get(unit)
            .copied()
            .unwrap_or(ActionOutcome::Success)
    }

    fn move_toward(&mut self, unit: &EntityId, target: &EntityId) -> ActionOutcome {
        self.commands.push(Command::Move {
            unit: unit.clone(),
            target: target.clone(),
        });
        self.move_outcome.unwrap_or(ActionOutcome::Success)
    }

    fn produce(&mut self, facility: &EntityId, template: &BodyTemplate) -> ProduceResult {
        self.commands.push(Command::Produce {
            facility: facility.clone(),
            role: template.role,
            cost: template.cost,
        });
        match self.produce_outcome {
            Some(outcome) if !outcome.is_success() => ProduceResult::failed(outcome),
            _ => {
                self.produced = self.produced.saturating_add(1);
                ProduceResult::produced(EntityId::new(format!("produced-{}", self.produced)))
            }
        }
    }
}
