#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Journal system that renders world events as structured `tracing` records.

use monkey_tribe_core::{CellCoord, Collector, Event, SpawnOrigin, Team};
use tracing::{debug, info, trace, warn};

/// Structured log sink for the world event stream.
///
/// Declined food is reported once per cell until the player moves again.
#[derive(Debug, Default)]
pub struct Journal {
    records: u64,
    last_declined: Option<CellCoord>,
}

impl Journal {
    /// Creates a new journal with no records written.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records handed to `tracing` so far.
    #[must_use]
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Writes one record per event.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::PlayerMoved { .. } => self.last_declined = None,
                Event::FoodDeclined { cell } => {
                    if self.last_declined == Some(*cell) {
                        continue;
                    }
                    self.last_declined = Some(*cell);
                }
                _ => {}
            }
            write(event);
            self.records = self.records.saturating_add(1);
        }
    }
}

fn write(event: &Event) {
    match event {
        Event::TimeAdvanced { dt } => trace!(dt = ?dt, "time advanced"),
        Event::PlayerMoved { from, to, facing } => debug!(
            from = ?(from.column(), from.row()),
            to = ?(to.column(), to.row()),
            facing = ?facing,
            "player moved"
        ),
        Event::PlayerDamaged {
            amount,
            health,
            source,
        } => info!(amount, health, source = ?source, "player damaged"),
        Event::PlayerHealed { amount, health } => debug!(amount, health, "player healed"),
        Event::FoodDeclined { cell } => trace!(
            cell = ?(cell.column(), cell.row()),
            "food left on the ground at full health"
        ),
        Event::PlayerDefeated {
            score,
            enemies_defeated,
        } => warn!(score, enemies_defeated, "player defeated"),
        Event::ProjectileThrown {
            projectile,
            direction,
            ..
        } => debug!(projectile = projectile.get(), direction = ?direction, "projectile thrown"),
        Event::ProjectileExpired { projectile } => {
            trace!(projectile = projectile.get(), "projectile expired");
        }
        Event::EnemySpawned {
            enemy,
            cell,
            origin,
        } => debug!(
            enemy = enemy.get(),
            cell = ?(cell.column(), cell.row()),
            origin = ?origin,
            "enemy spawned"
        ),
        Event::EnemyDefeated { enemy, cause, .. } => {
            debug!(enemy = enemy.get(), cause = ?cause, "enemy defeated");
        }
        Event::AllySpawned { ally, origin, .. } => {
            if *origin == SpawnOrigin::Recruited {
                info!(ally = ally.get(), "ally recruited");
            } else {
                debug!(ally = ally.get(), origin = ?origin, "ally spawned");
            }
        }
        Event::AllyDefeated { ally, .. } => warn!(ally = ally.get(), "ally destroyed"),
        Event::AllyRecruitRejected { reason } => debug!(%reason, "recruitment rejected"),
        Event::ResourceCollected {
            collector,
            kind,
            ..
        } => match collector {
            Collector::Player => debug!(%kind, "player collected resource"),
            Collector::Ally(ally) => debug!(ally = ally.get(), %kind, "ally collected resource"),
            Collector::Enemy(enemy) => {
                debug!(enemy = enemy.get(), %kind, "enemy harvested resource");
            }
        },
        Event::StructurePlaced {
            structure,
            kind,
            team,
            cell,
        } => info!(
            structure = structure.get(),
            %kind,
            team = ?team,
            cell = ?(cell.column(), cell.row()),
            "structure placed"
        ),
        Event::StructurePlacementRejected { kind, reason, .. } => {
            debug!(%kind, %reason, "structure placement rejected");
        }
        Event::StructureAttacked {
            structure,
            target,
            damage,
        } => debug!(
            structure = structure.get(),
            target = target.get(),
            damage,
            "structure attacked"
        ),
        Event::StructureDestroyed {
            structure,
            kind,
            team,
        } => {
            if *team == Team::Enemy {
                info!(structure = structure.get(), %kind, "enemy structure destroyed");
            } else {
                warn!(structure = structure.get(), %kind, "structure destroyed");
            }
        }
        Event::UpgradePurchased {
            upgrade,
            level,
            next_cost,
            remaining,
        } => info!(%upgrade, level, next_cost, remaining, "upgrade purchased"),
        Event::UpgradePurchaseRejected { reason } => debug!(%reason, "upgrade rejected"),
        Event::WorldEventStarted { kind } => info!(%kind, "world event started"),
        Event::WorldEventEnded { kind } => info!(%kind, "world event ended"),
    }
}
