//! Recorded-match playback.
//!
//! A recording is a JSON-lines file, one frame per tick:
//!
//! ```json
//! {"tick": 1, "entities": [{"id": "spawn", "kind": "spawn", "my": true, "x": 0, "y": 0}]}
//! ```
//!
//! [`ReplayHost`] answers the host primitives against the current frame
//! without changing it. Ranges are Chebyshev distances, and nearest-by-path
//! is approximated by nearest range with ties going to the earlier
//! candidate. Results are produced as host result codes and translated the
//! same way a live host adapter would.

use std::path::Path;

use arena_agents::{Host, ProductionOrder, ProductionReport, RolePopulation};
use arena_core::{CombatTotals, MatchContext, run_tick};
use arena_types::{
    ActionOutcome, BodyTemplate, Command, Entity, EntityId, Position, ProduceResult, RawEntity,
    UnitAction, WorldSnapshot, codes,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::ReplayError;

/// One recorded tick.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Frame {
    /// Tick number.
    pub tick: u64,
    /// Every record the host listed that tick.
    #[serde(default)]
    pub entities: Vec<RawEntity>,
}

/// Read a JSON-lines recording from disk.
pub fn read_frames(path: &Path) -> Result<Vec<Frame>, ReplayError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_frames(&text)
}

/// Parse a JSON-lines recording. Blank lines are skipped.
pub fn parse_frames(text: &str) -> Result<Vec<Frame>, ReplayError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| ReplayError::Frame {
                line: index.saturating_add(1),
                source,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ReplayHost
// ---------------------------------------------------------------------------

/// A [`Host`] backed by a recorded frame.
#[derive(Debug, Clone, Default)]
pub struct ReplayHost {
    tick: u64,
    raw: Vec<RawEntity>,
    world: WorldSnapshot,
    produced_this_frame: bool,
    commands: Vec<Command>,
}

impl ReplayHost {
    /// An empty host at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `frame` the current tick.
    pub fn load(&mut self, frame: Frame) {
        self.world = WorldSnapshot::ingest(frame.tick, frame.entities.clone()).snapshot;
        self.raw = frame.entities;
        self.tick = frame.tick;
        self.produced_this_frame = false;
    }

    /// Every command issued since the host was created.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    fn position(&self, id: &EntityId) -> Option<Position> {
        self.world.get(id).and_then(Entity::position)
    }

    fn act_code(&self, unit: &EntityId, action: UnitAction, target: &EntityId) -> i32 {
        let (Some(from), Some(to)) = (self.position(unit), self.position(target)) else {
            return codes::ERR_NOT_FOUND;
        };
        if from.range_to(to) > action.range() {
            return codes::ERR_NOT_IN_RANGE;
        }
        if action == UnitAction::Transfer {
            let carried = match self.world.get(unit) {
                Some(Entity::Unit(u)) => u.store.map_or(0, |s| s.energy),
                _ => 0,
            };
            if carried == 0 {
                return codes::ERR_NOT_ENOUGH_RESOURCES;
            }
        }
        codes::OK
    }

    fn produce_code(&self, facility: &EntityId, cost: u32) -> i32 {
        let Some(Entity::Facility(facility)) = self.world.get(facility) else {
            return codes::ERR_INVALID_TARGET;
        };
        if facility.stored_resource() < cost {
            codes::ERR_NOT_ENOUGH_RESOURCES
        } else if self.produced_this_frame {
            codes::ERR_BUSY
        } else {
            codes::OK
        }
    }
}

impl Host for ReplayHost {
    fn tick(&self) -> u64 {
        self.tick
    }

    fn list_entities(&self) -> Vec<RawEntity> {
        self.raw.clone()
    }

    fn find_nearest_by_path(
        &self,
        origin: &EntityId,
        candidates: &[EntityId],
    ) -> Option<EntityId> {
        let from = self.position(origin)?;
        candidates
            .iter()
            .filter_map(|id| self.position(id).map(|to| (id, from.range_to(to))))
            .min_by_key(|&(_, range)| range)
            .map(|(id, _)| id.clone())
    }

    fn act(&mut self, unit: &EntityId, action: UnitAction, target: &EntityId) -> ActionOutcome {
        let code = self.act_code(unit, action, target);
        self.commands.push(Command::Act {
            unit: unit.clone(),
            action,
            target: target.clone(),
        });
        ActionOutcome::from_code(code)
    }

    fn move_toward(&mut self, unit: &EntityId, target: &EntityId) -> ActionOutcome {
        let code = if self.position(unit).is_some() && self.position(target).is_some() {
            codes::OK
        } else {
            codes::ERR_NOT_FOUND
        };
        self.commands.push(Command::Move {
            unit: unit.clone(),
            target: target.clone(),
        });
        ActionOutcome::from_code(code)
    }

    fn produce(&mut self, facility: &EntityId, template: &BodyTemplate) -> ProduceResult {
        let code = self.produce_code(facility, template.cost);
        self.commands.push(Command::Produce {
            facility: facility.clone(),
            role: template.role,
            cost: template.cost,
        });
        if code != codes::OK {
            return ProduceResult::from_raw(Some(code), None);
        }
        self.produced_this_frame = true;
        let id = Uuid::new_v4().to_string();
        debug!(tick = self.tick, unit = %id, role = %template.role, "replay minted unit");
        ProduceResult::from_raw(None, Some(id))
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Summary of a whole replay, printed as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Frames processed.
    pub frames: usize,
    /// Host restarts detected mid-recording.
    pub restarts: usize,
    /// Combat totals of the last match in the recording.
    pub totals: CombatTotals,
    /// Role populations after the last frame.
    pub population: RolePopulation,
    /// Accepted production commands, in order.
    pub produced: Vec<ProductionOrder>,
    /// Commands issued in total.
    pub commands: usize,
    /// Commands the host refused.
    pub refused: usize,
    /// Records that failed validation.
    pub rejected_records: usize,
}

/// Run every frame through the decision core.
pub fn run_replay(ctx: &mut MatchContext, frames: Vec<Frame>) -> ReplayReport {
    let mut host = ReplayHost::new();
    let mut report = ReplayReport {
        generated_at: Utc::now(),
        frames: frames.len(),
        restarts: 0,
        totals: CombatTotals::default(),
        population: RolePopulation::default(),
        produced: Vec::new(),
        commands: 0,
        refused: 0,
        rejected_records: 0,
    };

    for frame in frames {
        host.load(frame);
        let summary = run_tick(ctx, &mut host);

        if summary.cold_start {
            report.restarts = report.restarts.saturating_add(1);
        }
        match summary.production {
            ProductionReport::Produced(order) => report.produced.push(order),
            ProductionReport::Failed(_) => report.refused = report.refused.saturating_add(1),
            ProductionReport::NoFacility | ProductionReport::Idle { .. } => {}
        }
        report.refused = report.refused.saturating_add(summary.dispatch.failures.len());
        report.rejected_records = report.rejected_records.saturating_add(summary.rejected.len());
        report.population = summary.population;
    }

    report.totals = ctx.tracker().totals();
    report.commands = host.commands().len();
    report.generated_at = Utc::now();
    report
}
