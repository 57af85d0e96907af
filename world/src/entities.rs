//! Entity state for the player, enemies and allies.

use std::time::Duration;

use monkey_tribe_core::{
    CellCoord, Direction, EntityId, EntitySnapshot, GridSize, Inventory, Team,
};
use rand::Rng;

/// Mutable state of a single entity stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct Entity {
    pub(crate) id: EntityId,
    pub(crate) team: Team,
    pub(crate) cell: CellCoord,
    pub(crate) health: u32,
    pub(crate) alive: bool,
    pub(crate) inventory: Inventory,
    pub(crate) facing: Direction,
    pub(crate) speed: f32,
    pub(crate) attack_power: u32,
    pub(crate) attack_strength: f32,
    pub(crate) raid_boosted: bool,
}

impl Entity {
    pub(crate) fn new(id: EntityId, team: Team, cell: CellCoord, health: u32) -> Self {
        Self {
            id,
            team,
            cell,
            health,
            alive: true,
            inventory: Inventory::new(),
            facing: Direction::East,
            speed: 1.0,
            attack_power: 0,
            attack_strength: 0.0,
            raid_boosted: false,
        }
    }

    /// Takes one random step with offsets drawn from {-1, 0, 1} on each axis.
    pub(crate) fn wander<R: Rng>(&mut self, rng: &mut R, grid: GridSize) {
        let d_column = rng.gen_range(-1..=1);
        let d_row = rng.gen_range(-1..=1);
        self.cell = self.cell.offset_clamped(d_column, d_row, grid);
    }

    /// Subtracts damage and reports whether the entity ran out of health.
    pub(crate) fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.alive = false;
        }
        !self.alive
    }

    pub(crate) fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            team: self.team,
            cell: self.cell,
            health: self.health,
            alive: self.alive,
        }
    }
}

/// Player-only bookkeeping layered on top of its [`Entity`].
#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) body: Entity,
    pub(crate) max_health: u32,
    pub(crate) hit: bool,
    pub(crate) invulnerable_for: Duration,
    pub(crate) gather_speed: f32,
}

impl Player {
    pub(crate) fn new(cell: CellCoord, max_health: u32, speed: f32, gather_speed: f32) -> Self {
        let mut body = Entity::new(EntityId::PLAYER, Team::Player, cell, max_health);
        body.speed = speed;
        Self {
            body,
            max_health,
            hit: false,
            invulnerable_for: Duration::ZERO,
            gather_speed,
        }
    }

    /// Applies damage without letting health drop below zero.
    pub(crate) fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.body.health);
        self.body.health -= dealt;
        self.hit = true;
        dealt
    }

    /// Heals up to the maximum and returns the amount actually restored.
    pub(crate) fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_health.saturating_sub(self.body.health));
        self.body.health += restored;
        restored
    }

    pub(crate) fn is_hurt(&self) -> bool {
        self.body.health < self.max_health
    }
}

/// Enemies and allies currently inhabiting the world.
#[derive(Debug)]
pub(crate) struct Roster {
    pub(crate) enemies: Vec<Entity>,
    pub(crate) allies: Vec<Entity>,
    next_entity_id: u32,
}

impl Roster {
    pub(crate) fn new() -> Self {
        Self {
            enemies: Vec::new(),
            allies: Vec::new(),
            next_entity_id: EntityId::PLAYER.get() + 1,
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_entity_id);
        self.next_entity_id = self.next_entity_id.saturating_add(1);
        id
    }

    pub(crate) fn add_enemy(&mut self, mut enemy: Entity) -> EntityId {
        enemy.id = self.allocate_id();
        let id = enemy.id;
        self.enemies.push(enemy);
        id
    }

    pub(crate) fn add_ally(&mut self, mut ally: Entity) -> EntityId {
        ally.id = self.allocate_id();
        let id = ally.id;
        self.allies.push(ally);
        id
    }

    pub(crate) fn living_enemies(&self) -> impl Iterator<Item = &Entity> {
        self.enemies.iter().filter(|enemy| enemy.alive)
    }

    /// Removes the enemies that are no longer alive, yielding where they fell.
    pub(crate) fn sweep_defeated_enemies(&mut self) -> Vec<CellCoord> {
        let fallen = self
            .enemies
            .iter()
            .filter(|enemy| !enemy.alive)
            .map(|enemy| enemy.cell)
            .collect();
        self.enemies.retain(|enemy| enemy.alive);
        fallen
    }
}

/// Draws a uniformly distributed cell from the grid.
pub(crate) fn random_cell<R: Rng>(rng: &mut R, grid: GridSize) -> CellCoord {
    CellCoord::new(
        rng.gen_range(0..grid.columns()),
        rng.gen_range(0..grid.rows()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn wandering_never_leaves_the_grid() {
        let grid = GridSize::new(3, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut entity = Entity::new(EntityId::new(4), Team::Enemy, CellCoord::new(0, 0), 10);

        for _ in 0..500 {
            entity.wander(&mut rng, grid);
            assert!(grid.contains(entity.cell), "left grid at {:?}", entity.cell);
        }
    }

    #[test]
    fn player_damage_and_healing_are_clamped() {
        let mut player = Player::new(CellCoord::new(1, 1), 100, 1.0, 1.0);

        assert_eq!(player.heal(10), 0);
        assert_eq!(player.take_damage(30), 30);
        assert_eq!(player.heal(50), 30);
        assert_eq!(player.body.health, 100);
        assert_eq!(player.take_damage(250), 100);
        assert_eq!(player.body.health, 0);
        assert!(player.hit);
    }

    #[test]
    fn roster_allocates_unique_ids_after_the_player() {
        let mut roster = Roster::new();
        let enemy = roster.add_enemy(Entity::new(
            EntityId::PLAYER,
            Team::Enemy,
            CellCoord::new(0, 0),
            100,
        ));
        let ally = roster.add_ally(Entity::new(
            EntityId::PLAYER,
            Team::Ally,
            CellCoord::new(0, 0),
            100,
        ));

        assert_eq!(enemy, EntityId::new(1));
        assert_eq!(ally, EntityId::new(2));
    }

    #[test]
    fn sweep_removes_only_fallen_enemies() {
        let mut roster = Roster::new();
        for column in 0..3 {
            let _ = roster.add_enemy(Entity::new(
                EntityId::PLAYER,
                Team::Enemy,
                CellCoord::new(column, 0),
                100,
            ));
        }
        roster.enemies[1].alive = false;

        let fallen = roster.sweep_defeated_enemies();

        assert_eq!(fallen, vec![CellCoord::new(1, 0)]);
        assert_eq!(roster.enemies.len(), 2);
        assert_eq!(roster.living_enemies().count(), 2);
    }
}
