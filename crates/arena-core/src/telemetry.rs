//! Combat telemetry: per-tick damage and death attribution.
//!
//! The tracker keeps the last observed state of every identity it has ever
//! seen. Each tick it compares the new samples against that table:
//!
//! - **Damage** -- a sample that existed last tick and exists now, with
//!   health known both times, contributes any positive health drop to the
//!   damage counter of its *current* side. Healing contributes nothing.
//! - **Deaths** -- an identity stored as existing that is absent from this
//!   tick's samples died. It counts once for its *stored* side and is kept
//!   with `exists = false`; a later reappearance starts a fresh interval.
//!
//! Neutral entities are tracked but never counted. A sample listed with
//! `exists = false` is seen, so it is not a death.

use std::collections::{BTreeMap, BTreeSet};

use arena_types::{CombatSample, EntityId, Side};
use serde::Serialize;

/// Last observed state of one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrevEntityState {
    /// Side at last observation.
    pub side: Side,
    /// Whether the entity existed at last observation.
    pub exists: bool,
    /// Health at last observation, when known.
    pub hits: Option<u32>,
}

/// Damage and deaths observed in one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CombatTickDelta {
    /// Tick number, when supplied.
    pub tick: Option<u64>,
    /// Health lost by own entities.
    pub damage_to_self: u64,
    /// Health lost by opponent entities.
    pub damage_to_opponent: u64,
    /// Own entities that disappeared.
    pub self_deaths: u64,
    /// Opponent entities that disappeared.
    pub opponent_deaths: u64,
}

impl CombatTickDelta {
    /// Whether nothing was observed.
    pub const fn is_quiet(&self) -> bool {
        self.damage_to_self == 0
            && self.damage_to_opponent == 0
            && self.self_deaths == 0
            && self.opponent_deaths == 0
    }
}

/// Counters accumulated since creation or the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CombatTotals {
    /// Tick number passed to the most recent update.
    pub last_tick: Option<u64>,
    /// Number of updates processed.
    pub ticks_tracked: u64,
    /// Total health lost by own entities.
    pub damage_to_self: u64,
    /// Total health lost by opponent entities.
    pub damage_to_opponent: u64,
    /// Total own deaths.
    pub self_deaths: u64,
    /// Total opponent deaths.
    pub opponent_deaths: u64,
}

impl CombatTotals {
    const fn absorb(&mut self, delta: &CombatTickDelta) {
        self.last_tick = delta.tick;
        self.ticks_tracked = self.ticks_tracked.saturating_add(1);
        self.damage_to_self = self.damage_to_self.saturating_add(delta.damage_to_self);
        self.damage_to_opponent = self
            .damage_to_opponent
            .saturating_add(delta.damage_to_opponent);
        self.self_deaths = self.self_deaths.saturating_add(delta.self_deaths);
        self.opponent_deaths = self.opponent_deaths.saturating_add(delta.opponent_deaths);
    }
}

/// Tracks combat outcomes across ticks.
#[derive(Debug, Clone, Default)]
pub struct CombatTracker {
    previous: BTreeMap<EntityId, PrevEntityState>,
    totals: CombatTotals,
}

impl CombatTracker {
    /// Create an empty tracker.
    pub const fn new() -> Self {
        Self {
            previous: BTreeMap::new(),
            totals: CombatTotals {
                last_tick: None,
                ticks_tracked: 0,
                damage_to_self: 0,
                damage_to_opponent: 0,
                self_deaths: 0,
                opponent_deaths: 0,
            },
        }
    }

    /// Process one tick's samples and return what changed.
    pub fn tick(&mut self, samples: &[CombatSample], tick: Option<u64>) -> CombatTickDelta {
        let mut delta = CombatTickDelta {
            tick,
            ..CombatTickDelta::default()
        };
        let mut seen: BTreeSet<&EntityId> = BTreeSet::new();

        for sample in samples {
            seen.insert(&sample.id);

            if let Some(prev) = self.previous.get(&sample.id)
                && prev.exists
                && sample.exists
                && let (Some(before), Some(now)) = (prev.hits, sample.hits)
            {
                let lost = u64::from(before.saturating_sub(now));
                match sample.side {
                    Side::Own => delta.damage_to_self = delta.damage_to_self.saturating_add(lost),
                    Side::Opponent => {
                        delta.damage_to_opponent = delta.damage_to_opponent.saturating_add(lost);
                    }
                    Side::Neutral => {}
                }
            }

            self.previous.insert(
                sample.id.clone(),
                PrevEntityState {
                    side: sample.side,
                    exists: sample.exists,
                    hits: sample.hits,
                },
            );
        }

        for (id, prev) in &mut self.previous {
            if !prev.exists || seen.contains(id) {
                continue;
            }
            match prev.side {
                Side::Own => delta.self_deaths = delta.self_deaths.saturating_add(1),
                Side::Opponent => delta.opponent_deaths = delta.opponent_deaths.saturating_add(1),
                Side::Neutral => {}
            }
            prev.exists = false;
        }

        self.totals.absorb(&delta);
        delta
    }

    /// Totals since creation or the last [`reset`](Self::reset).
    pub const fn totals(&self) -> CombatTotals {
        self.totals
    }

    /// Stored state for an identity, if it was ever seen.
    pub fn previous(&self, id: &EntityId) -> Option<&PrevEntityState> {
        self.previous.get(id)
    }

    /// Number of identities tracked.
    pub fn tracked(&self) -> usize {
        self.previous.len()
    }

    /// Forget every identity and zero the totals.
    pub fn reset(&mut self) {
        self.previous.clear();
        self.totals = CombatTotals::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mine(id: &str, hits: u32) -> CombatSample {
        CombatSample::new(id, Some(true), Some(hits))
    }

    fn enemy(id: &str, hits: u32) -> CombatSample {
        CombatSample::new(id, Some(false), Some(hits))
    }

    const fn counters(delta: &CombatTickDelta) -> (u64, u64, u64, u64) {
        (
            delta.damage_to_self,
            delta.damage_to_opponent,
            delta.self_deaths,
            delta.opponent_deaths,
        )
    }

    #[test]
    fn attributes_damage_by_side() {
        let mut tracker = CombatTracker::new();
        let first = tracker.tick(&[mine("a", 100), enemy("b", 100)], Some(1));
        assert!(first.is_quiet());

        let second = tracker.tick(&[mine("a", 80), enemy("b", 90)], Some(2));
        assert_eq!(counters(&second), (20, 10, 0, 0));
        assert_eq!(second.tick, Some(2));
    }

    #[test]
    fn missing_opponent_is_one_death() {
        let mut tracker = CombatTracker::new();
        tracker.tick(&[mine("a", 100), enemy("b", 100)], Some(1));

        let delta = tracker.tick(&[mine("a", 100)], Some(2));
        assert_eq!(counters(&delta), (0, 0, 0, 1));
    }

    #[test]
    fn death_is_counted_once() {
        let mut tracker = CombatTracker::new();
        tracker.tick(&[mine("a", 100)], None);

        assert_eq!(tracker.tick(&[], None).self_deaths, 1);
        assert_eq!(tracker.tick(&[], None).self_deaths, 0);
        assert_eq!(tracker.totals().self_deaths, 1);

        let stored = tracker.previous(&EntityId::from("a"));
        assert_eq!(stored.map(|s| s.exists), Some(false));
    }

    #[test]
    fn reappearance_starts_a_new_interval() {
        let mut tracker = CombatTracker::new();
        tracker.tick(&[enemy("b", 100)], None);
        tracker.tick(&[], None);

        // No damage across the gap, even though health dropped.
        let back = tracker.tick(&[enemy("b", 40)], None);
        assert!(back.is_quiet());

        let hit = tracker.tick(&[enemy("b", 30)], None);
        assert_eq!(hit.damage_to_opponent, 10);
    }

    #[test]
    fn healing_is_not_negative_damage() {
        let mut tracker = CombatTracker::new();
        tracker.tick(&[mine("a", 50)], None);
        let delta = tracker.tick(&[mine("a", 70)], None);
        assert!(delta.is_quiet());
    }

    #[test]
    fn unknown_health_skips_damage() {
        let mut tracker = CombatTracker::new();
        tracker.tick(&[CombatSample::new("a", Some(true), None)], None);
        let delta = tracker.tick(&[mine("a", 10)], None);
        assert_eq!(delta.damage_to_self, 0);

        let delta = tracker.tick(&[CombatSample::new("a", Some(true), None)], None);
        assert_eq!(delta.damage_to_self, 0);
    }

    #[test]
    fn neutral_entities_never_count() {
        let mut tracker = CombatTracker::new();
        tracker.tick(&[CombatSample::new("n", None, Some(100))], None);
        let hit = tracker.tick(&[CombatSample::new("n", None, Some(60))], None);
        assert!(hit.is_quiet());
        let gone = tracker.tick(&[], None);
        assert!(gone.is_quiet());
        assert_eq!(tracker.tracked(), 1);
    }

    #[test]
    fn listed_but_not_existing_is_not_a_death() {
        let mut tracker = CombatTracker::new();
        tracker.tick(&[mine("a", 100)], None);

        let delta = tracker.tick(&[mine("a", 0).not_existing()], None);
        assert!(delta.is_quiet());

        // Already marked gone, so dropping out of the list counts nothing.
        assert!(tracker.tick(&[], None).is_quiet());
    }

    #[test]
    fn damage_uses_current_side() {
        let mut tracker = CombatTracker::new();
        tracker.tick(&[mine("x", 100)], None);
        let delta = tracker.tick(&[enemy("x", 70)], None);
        assert_eq!(counters(&delta), (0, 30, 0, 0));
    }

    #[test]
    fn totals_equal_sum_of_deltas() {
        let mut tracker = CombatTracker::new();
        let frames: Vec<Vec<CombatSample>> = vec![
            vec![mine("a", 100), enemy("b", 100), enemy("c", 50)],
            vec![mine("a", 90), enemy("b", 60), enemy("c", 50)],
            vec![mine("a", 70), enemy("b", 10)],
            vec![enemy("b", 0)],
            vec![mine("d", 100)],
        ];

        let mut sum = (0_u64, 0_u64, 0_u64, 0_u64);
        for (i, frame) in frames.iter().enumerate() {
            let delta = tracker.tick(frame, u64::try_from(i).ok());
            let (a, b, c, d) = counters(&delta);
            sum = (
                sum.0.saturating_add(a),
                sum.1.saturating_add(b),
                sum.2.saturating_add(c),
                sum.3.saturating_add(d),
            );
        }

        let totals = tracker.totals();
        assert_eq!(
            (
                totals.damage_to_self,
                totals.damage_to_opponent,
                totals.self_deaths,
                totals.opponent_deaths
            ),
            sum
        );
        assert_eq!(sum, (30, 100, 1, 2));
        assert_eq!(totals.ticks_tracked, 5);
        assert_eq!(totals.last_tick, Some(4));
    }

    #[test]
    fn reset_clears_table_and_totals() {
        let mut tracker = CombatTracker::new();
        tracker.tick(&[mine("a", 100)], Some(1));
        tracker.tick(&[mine("a", 50)], Some(2));
        tracker.reset();

        assert_eq!(tracker.totals(), CombatTotals::default());
        assert_eq!(tracker.tracked(), 0);
        // No stored state, so no damage and no death.
        assert!(tracker.tick(&[mine("a", 10)], Some(1)).is_quiet());
    }
}
