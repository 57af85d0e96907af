#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic analytics system folding world events into session statistics.

mod report;

pub use report::SessionReport;

use monkey_tribe_core::{Collector, DefeatCause, Event, SpawnOrigin, Team};

/// Pure analytics system that accumulates a [`SessionReport`] from the event stream.
#[derive(Debug, Default)]
pub struct Analytics {
    report: SessionReport,
    finished: bool,
}

impl Analytics {
    /// Creates a new analytics system with an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics gathered so far.
    #[must_use]
    pub fn report(&self) -> &SessionReport {
        &self.report
    }

    /// Reports whether the session ended with the player's defeat.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consumes world events and folds them into the running report.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            self.record(event);
        }
    }

    fn record(&mut self, event: &Event) {
        let report = &mut self.report;
        match event {
            Event::TimeAdvanced { dt } => {
                report.ticks = report.ticks.saturating_add(1);
                report.elapsed = report.elapsed.saturating_add(*dt);
            }
            Event::PlayerDamaged { amount, .. } => {
                report.damage_taken = report.damage_taken.saturating_add(*amount);
            }
            Event::PlayerHealed { amount, .. } => {
                report.health_restored = report.health_restored.saturating_add(*amount);
            }
            Event::PlayerDefeated { score, .. } => {
                report.final_score = Some(*score);
                self.finished = true;
            }
            Event::ProjectileThrown { .. } => bump(&mut report.projectiles_thrown),
            Event::EnemyDefeated { cause, .. } => match cause {
                DefeatCause::Projectile => bump(&mut report.defeated_by_projectiles),
                DefeatCause::Strike => bump(&mut report.defeated_by_strikes),
                DefeatCause::Ally(_) => bump(&mut report.defeated_by_allies),
                DefeatCause::Structure(_) => bump(&mut report.defeated_by_structures),
                DefeatCause::Meteor => bump(&mut report.defeated_by_meteors),
            },
            Event::AllySpawned { origin, .. } => {
                if matches!(origin, SpawnOrigin::Recruited) {
                    bump(&mut report.allies_recruited);
                } else {
                    bump(&mut report.allies_from_structures);
                }
            }
            Event::AllyDefeated { .. } => bump(&mut report.allies_lost),
            Event::ResourceCollected {
                collector, kind, ..
            } => match collector {
                Collector::Player | Collector::Ally(_) => {
                    bump(report.resources_gathered.entry(*kind).or_insert(0));
                }
                Collector::Enemy(_) => bump(&mut report.resources_lost_to_enemies),
            },
            Event::StructurePlaced { team, .. } => {
                if *team == Team::Enemy {
                    bump(&mut report.enemy_structures_placed);
                } else {
                    bump(&mut report.structures_placed);
                }
            }
            Event::StructurePlacementRejected { .. } => bump(&mut report.placements_rejected),
            Event::StructureDestroyed { .. } => bump(&mut report.structures_destroyed),
            Event::UpgradePurchased { .. } => bump(&mut report.upgrades_purchased),
            Event::UpgradePurchaseRejected { .. } | Event::AllyRecruitRejected { .. } => {
                bump(&mut report.purchases_rejected);
            }
            Event::WorldEventStarted { kind } => {
                bump(report.world_events.entry(*kind).or_insert(0));
            }
            Event::PlayerMoved { .. }
            | Event::FoodDeclined { .. }
            | Event::ProjectileExpired { .. }
            | Event::EnemySpawned { .. }
            | Event::StructureAttacked { .. }
            | Event::WorldEventEnded { .. } => {}
        }
    }
}

fn bump(counter: &mut u32) {
    *counter = counter.saturating_add(1);
}
