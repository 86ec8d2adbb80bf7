//! Multi-tick match flow through `run_tick` with a scripted host.

#![allow(clippy::unwrap_used, clippy::panic)]

use arena_agents::ProductionReport;
use arena_agents::testing::ScriptedHost;
use arena_core::{BotConfig, MatchContext, run_tick};
use arena_types::{ActionOutcome, Command, EntityId, RawEntity, Role};

fn records(json: &str) -> Vec<RawEntity> {
    serde_json::from_str(json).unwrap()
}

fn opening(energy: u32) -> Vec<RawEntity> {
    records(&format!(
        r#"[
            {{"id": "spawn", "kind": "spawn", "my": true, "x": 0, "y": 0,
              "store": {{"energy": {energy}, "capacity": 1000}}}},
            {{"id": "source", "kind": "source", "x": 4, "y": 4, "energy": 1000}},
            {{"id": "enemy-spawn", "kind": "spawn", "my": false, "x": 90, "y": 90}}
        ]"#
    ))
}

fn unit(id: &str, my: bool, hits: u32) -> RawEntity {
    records(&format!(
        r#"[{{"id": "{id}", "kind": "creep", "my": {my}, "x": 2, "y": 2,
              "hits": {hits}, "hitsMax": 100, "store": {{"energy": 0, "capacity": 50}}}}]"#
    ))
    .pop()
    .unwrap()
}

fn with_units(
    mut frame: Vec<RawEntity>,
    units: impl IntoIterator<Item = RawEntity>,
) -> Vec<RawEntity> {
    frame.extend(units);
    frame
}

#[test]
fn gatherers_come_before_combat_and_roles_stick() {
    let mut ctx = MatchContext::new(BotConfig::default());
    let mut host = ScriptedHost::new(1, opening(300));

    // Tick 1: nothing on the field, produce the first gatherer.
    let summary = run_tick(&mut ctx, &mut host);
    let ProductionReport::Produced(order) = summary.production else {
        panic!("expected production, got {:?}", summary.production);
    };
    assert_eq!(order.role, Role::Gatherer);
    let first = order.unit_id.unwrap();
    assert_eq!(ctx.roles().role_of(&first), Some(Role::Gatherer));

    // Tick 2: the produced unit appears and keeps its reserved role. A
    // second gatherer is still needed.
    let frame = with_units(opening(500), [unit(first.as_str(), true, 100)]);
    host.set_frame(2, frame);
    let summary = run_tick(&mut ctx, &mut host);
    assert!(summary.roles.assigned.is_empty());
    let ProductionReport::Produced(order) = summary.production else {
        panic!("expected production, got {:?}", summary.production);
    };
    assert_eq!(order.role, Role::Gatherer);
    let second = order.unit_id.unwrap();

    // Tick 3: both gatherers present, combat production starts with the
    // most expensive affordable melee body.
    host.set_frame(
        3,
        with_units(
            opening(450),
            [unit(first.as_str(), true, 100), unit(second.as_str(), true, 100)],
        ),
    );
    let summary = run_tick(&mut ctx, &mut host);
    let ProductionReport::Produced(order) = summary.production else {
        panic!("expected production, got {:?}", summary.production);
    };
    assert_eq!((order.role, order.cost), (Role::Melee, 420));
    assert_eq!(summary.population.gatherer, 2);
    assert_eq!(summary.population.melee, 1);
    assert_eq!(ctx.roles().role_of(&first), Some(Role::Gatherer));
}

#[test]
fn combat_totals_follow_the_match() {
    let mut ctx = MatchContext::default();
    let mut host = ScriptedHost::new(
        1,
        with_units(opening(0), [unit("a", true, 100), unit("b", false, 100)]),
    );
    run_tick(&mut ctx, &mut host);

    host.set_frame(
        2,
        with_units(opening(0), [unit("a", true, 80), unit("b", false, 90)]),
    );
    let summary = run_tick(&mut ctx, &mut host);
    assert_eq!(summary.combat.damage_to_self, 20);
    assert_eq!(summary.combat.damage_to_opponent, 10);

    host.set_frame(3, with_units(opening(0), [unit("a", true, 80)]));
    let summary = run_tick(&mut ctx, &mut host);
    assert_eq!(summary.combat.opponent_deaths, 1);
    assert_eq!(summary.combat.self_deaths, 0);

    let totals = ctx.tracker().totals();
    assert_eq!(totals.ticks_tracked, 3);
    assert_eq!(totals.damage_to_self, 20);
    assert_eq!(totals.damage_to_opponent, 10);
    assert_eq!(totals.opponent_deaths, 1);
    assert_eq!(totals.last_tick, Some(3));
}

#[test]
fn dead_gatherer_slot_is_refilled() {
    let mut ctx = MatchContext::default();
    let mut host = ScriptedHost::new(
        10,
        with_units(
            opening(0),
            [unit("g1", true, 100), unit("g2", true, 100), unit("m1", true, 100)],
        ),
    );
    run_tick(&mut ctx, &mut host);
    assert_eq!(ctx.roles().role_of(&EntityId::from("m1")), Some(Role::Melee));

    // g1 is gone; the scheduler sees one gatherer and rebuilds it.
    host.set_frame(
        11,
        with_units(opening(200), [unit("g2", true, 100), unit("m1", true, 100)]),
    );
    let summary = run_tick(&mut ctx, &mut host);
    assert_eq!(summary.roles.evicted.len(), 1);
    assert_eq!(summary.combat.self_deaths, 1);
    assert!(matches!(
        summary.production,
        ProductionReport::Produced(ref order) if order.role == Role::Gatherer
    ));
}

#[test]
fn unit_reported_without_coordinates_stays_alive_and_keeps_its_role() {
    let mut ctx = MatchContext::default();
    let frame = with_units(
        opening(0),
        [
            unit("g1", true, 100),
            unit("g2", true, 100),
            unit("m1", true, 100),
        ],
    );
    let mut host = ScriptedHost::new(1, frame);
    run_tick(&mut ctx, &mut host);

    let mut g1 = unit("g1", true, 80);
    g1.x = None;
    g1.y = None;
    let frame = with_units(
        opening(0),
        [g1, unit("g2", true, 100), unit("m1", true, 100)],
    );
    host.set_frame(2, frame);
    let summary = run_tick(&mut ctx, &mut host);

    assert_eq!(summary.rejected.len(), 1);
    assert_eq!(summary.combat.self_deaths, 0);
    assert_eq!(summary.combat.damage_to_self, 20);
    assert!(summary.roles.evicted.is_empty());
    assert_eq!(ctx.roles().role_of(&EntityId::from("g1")), Some(Role::Gatherer));
}

#[test]
fn refused_production_reserves_nothing() {
    let mut ctx = MatchContext::default();
    let mut host = ScriptedHost::new(1, opening(300))
        .with_produce_outcome(ActionOutcome::Busy);

    let summary = run_tick(&mut ctx, &mut host);
    assert!(matches!(summary.production, ProductionReport::Failed(_)));
    assert!(ctx.roles().is_empty());

    // Retried next tick with the same choice.
    host.set_frame(2, opening(300));
    run_tick(&mut ctx, &mut host);
    assert_eq!(host.production_commands().len(), 2);
}

#[test]
fn out_of_range_units_act_then_move_in_the_same_tick() {
    let mut ctx = MatchContext::default();
    let frame = with_units(opening(0), [unit("g1", true, 100)]);
    let mut host = ScriptedHost::new(5, frame)
        .with_act_outcome("g1", ActionOutcome::NotInRange);

    let summary = run_tick(&mut ctx, &mut host);
    assert_eq!(summary.dispatch.moved, 1);

    let commands = host.take_commands();
    assert_eq!(
        commands,
        vec![
            Command::Act {
                unit: EntityId::from("g1"),
                action: arena_types::UnitAction::Harvest,
                target: EntityId::from("source"),
            },
            Command::Move {
                unit: EntityId::from("g1"),
                target: EntityId::from("source"),
            },
        ]
    );
}
