//! Thrown projectiles travelling across the grid.

use std::time::Duration;

use monkey_tribe_core::{
    config::ProjectileTuning, CellCoord, DefeatCause, Direction, EntityId, Event, GridSize,
    ProjectileId, ProjectileSnapshot,
};

use crate::entities::Roster;

#[derive(Clone, Debug)]
struct Projectile {
    id: ProjectileId,
    column: f32,
    row: f32,
    direction: Direction,
    life: Duration,
    rotation_degrees: f32,
}

impl Projectile {
    /// Cell under the projectile, or `None` once it left the grid.
    fn cell(&self, grid: GridSize) -> Option<CellCoord> {
        if self.column < 0.0 || self.row < 0.0 {
            return None;
        }
        let cell = CellCoord::new(self.column.floor() as u32, self.row.floor() as u32);
        grid.contains(cell).then_some(cell)
    }
}

/// Projectiles in flight and their identifier counter.
#[derive(Debug)]
pub(crate) struct ProjectileVolley {
    projectiles: Vec<Projectile>,
    next_projectile_id: ProjectileId,
}

impl ProjectileVolley {
    pub(crate) fn new() -> Self {
        Self {
            projectiles: Vec::new(),
            next_projectile_id: ProjectileId::new(0),
        }
    }

    /// Launches a projectile from the centre of `cell`.
    pub(crate) fn throw(&mut self, cell: CellCoord, direction: Direction) -> ProjectileId {
        let id = self.next_projectile_id;
        self.next_projectile_id = ProjectileId::new(id.get().saturating_add(1));
        self.projectiles.push(Projectile {
            id,
            column: cell.column() as f32 + 0.5,
            row: cell.row() as f32 + 0.5,
            direction,
            life: Duration::ZERO,
            rotation_degrees: 0.0,
        });
        id
    }

    /// Moves every projectile and resolves hits against living enemies.
    ///
    /// A projectile whose cell holds living enemies defeats all of them and is
    /// consumed. Returns the enemies defeated this way.
    pub(crate) fn advance(
        &mut self,
        dt: Duration,
        tuning: &ProjectileTuning,
        grid: GridSize,
        roster: &mut Roster,
        out_events: &mut Vec<Event>,
    ) -> Vec<EntityId> {
        let mut defeated = Vec::new();
        let step = tuning.speed_tiles_per_sec * dt.as_secs_f32();

        self.projectiles.retain_mut(|projectile| {
            let (d_column, d_row) = projectile.direction.offset();
            projectile.column += d_column as f32 * step;
            projectile.row += d_row as f32 * step;
            projectile.rotation_degrees += tuning.spin_degrees;
            projectile.life = projectile.life.saturating_add(dt);

            let cell = match projectile.cell(grid) {
                Some(cell) if projectile.life <= tuning.lifetime() => cell,
                _ => {
                    out_events.push(Event::ProjectileExpired {
                        projectile: projectile.id,
                    });
                    return false;
                }
            };

            let mut hit = false;
            for enemy in roster
                .enemies
                .iter_mut()
                .filter(|enemy| enemy.alive && enemy.cell == cell)
            {
                enemy.alive = false;
                hit = true;
                defeated.push(enemy.id);
                out_events.push(Event::EnemyDefeated {
                    enemy: enemy.id,
                    cell,
                    cause: DefeatCause::Projectile,
                });
            }
            !hit
        });

        defeated
    }

    pub(crate) fn snapshots(&self) -> Vec<ProjectileSnapshot> {
        self.projectiles
            .iter()
            .map(|projectile| ProjectileSnapshot {
                id: projectile.id,
                column: projectile.column,
                row: projectile.row,
                rotation_degrees: projectile.rotation_degrees,
            })
            .collect()
    }
}
