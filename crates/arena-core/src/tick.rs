//! The per-tick pipeline.
//!
//! [`run_tick`] runs one decision pass against the host:
//!
//! 1. **Ingest** -- read the tick and raw records, validate them into a
//!    [`WorldSnapshot`], and log every rejected record. Rejected records
//!    with an id stay in the snapshot as untyped entities.
//! 2. **Cold start** -- if the host restarted (see
//!    [`MatchContext::is_cold_start`]), reset all match state.
//! 3. **Telemetry** -- feed every entity in the snapshot to the combat
//!    tracker.
//! 4. **Roles** -- evict absent units, then assign newcomers. An own unit
//!    reported without coordinates keeps its role but is not dispatched.
//! 5. **Production** -- at most one production command, from post-eviction
//!    populations.
//! 6. **Dispatch** -- one command per controlled unit.
//!
//! Nothing in a tick is fatal. Refused commands and rejected records are
//! reported in the [`TickSummary`] and the next tick proceeds as usual.

use arena_agents::{
    DispatchSummary, Host, ProductionReport, RolePopulation, RoleSync, dispatch_all,
};
use arena_types::{EntityId, SnapshotError, WorldSnapshot};
use tracing::{debug, info, warn};

use crate::context::MatchContext;
use crate::telemetry::CombatTickDelta;

/// Everything one tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// Tick number reported by the host.
    pub tick: u64,
    /// Whether match state was reset before this tick.
    pub cold_start: bool,
    /// Host records that failed validation.
    pub rejected: Vec<SnapshotError>,
    /// Combat observed this tick.
    pub combat: CombatTickDelta,
    /// Role evictions and assignments.
    pub roles: RoleSync,
    /// Role populations after assignment and production.
    pub population: RolePopulation,
    /// What the production scheduler did.
    pub production: ProductionReport,
    /// What the controlled units did.
    pub dispatch: DispatchSummary,
}

/// Run one tick of the decision core.
pub fn run_tick<H: Host + ?Sized>(ctx: &mut MatchContext, host: &mut H) -> TickSummary {
    let tick = host.tick();
    let ingested = WorldSnapshot::ingest(tick, host.list_entities());
    let world = ingested.snapshot;
    for err in &ingested.rejected {
        warn!(tick, error = %err, "rejected host record");
    }

    let cold_start = ctx.is_cold_start(tick);
    if cold_start {
        info!(tick, last_tick = ?ctx.last_tick, "new match detected, resetting state");
        ctx.reset();
    }

    let combat = ctx.tracker.tick(&world.combat_samples(), Some(tick));
    if !combat.is_quiet() {
        debug!(
            tick,
            damage_to_self = combat.damage_to_self,
            damage_to_opponent = combat.damage_to_opponent,
            self_deaths = combat.self_deaths,
            opponent_deaths = combat.opponent_deaths,
            "combat"
        );
    }

    let controlled: Vec<EntityId> = world.controlled_ids();
    let roles = ctx.roles.sync(&controlled, &ctx.config.roles);

    let production = ctx
        .scheduler
        .run(host, world.own_facility(), &mut ctx.roles);

    let dispatch = dispatch_all(host, &world, &ctx.roles);

    let population = ctx.roles.population();
    debug!(
        tick,
        units = controlled.len(),
        gatherers = population.gatherer,
        melee = population.melee,
        ranged = population.ranged,
        support = population.support,
        acted = dispatch.acted,
        moved = dispatch.moved,
        idle = dispatch.idle,
        failures = dispatch.failures.len(),
        "tick complete"
    );

    if tick.checked_rem(ctx.config.telemetry.summary_interval_ticks) == Some(0) {
        let totals = ctx.tracker.totals();
        info!(
            tick,
            ticks_tracked = totals.ticks_tracked,
            damage_to_self = totals.damage_to_self,
            damage_to_opponent = totals.damage_to_opponent,
            self_deaths = totals.self_deaths,
            opponent_deaths = totals.opponent_deaths,
            "combat totals"
        );
    }

    ctx.last_tick = Some(tick);

    TickSummary {
        tick,
        cold_start,
        rejected: ingested.rejected,
        combat,
        roles,
        population,
        production,
        dispatch,
    }
}
