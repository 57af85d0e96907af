#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Monkey Tribe Wars.

mod entities;
mod projectiles;
mod resources;
mod structures;
mod upgrades;
mod world_events;

use std::time::Duration;

use monkey_tribe_core::{
    CellCoord, Collector, Command, DamageSource, DefeatCause, EntityId, Event, FlashKind,
    GameConfig, GridSize, Inventory, PurchaseError, RecruitError, ResourceKind, SpawnOrigin,
    StructureKind, Team, UpgradeKind, WorldEventKind, WELCOME_BANNER,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use entities::{random_cell, Entity, Player, Roster};
use projectiles::ProjectileVolley;
use resources::ResourceField;
use structures::{StructureOutcome, StructureRegistry};
use upgrades::{PurchaseReceipt, UpgradeLedger};
use world_events::{SchedulerStep, WorldEventScheduler};

/// Represents the authoritative Monkey Tribe Wars world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    grid: GridSize,
    rng: ChaCha8Rng,
    player: Player,
    roster: Roster,
    field: ResourceField,
    structures: StructureRegistry,
    upgrades: UpgradeLedger,
    scheduler: WorldEventScheduler,
    projectiles: ProjectileVolley,
    inventory: Inventory,
    score: u32,
    enemies_defeated: u32,
    enemy_move_timer: Duration,
    ally_move_timer: Duration,
    flash: Option<(FlashKind, Duration)>,
    defeated: bool,
    tick_index: u64,
}

impl World {
    /// Creates a freshly generated world, discarding the generation events.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let mut events = Vec::new();
        Self::generate(config, &mut events)
    }

    /// Creates a freshly generated world and reports every initial spawn.
    ///
    /// The player starts at the grid centre. Buildable tokens, currency tokens
    /// and enemies are scattered on random cells drawn from the seeded
    /// generator, so the same configuration always yields the same world.
    #[must_use]
    pub fn generate(config: GameConfig, out_events: &mut Vec<Event>) -> Self {
        let grid = config.grid.size();
        let player = Player::new(
            grid.center(),
            config.player.max_health,
            config.player.speed,
            config.player.gather_speed,
        );
        let mut world = Self {
            banner: WELCOME_BANNER,
            grid,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            player,
            roster: Roster::new(),
            field: ResourceField::new(),
            structures: StructureRegistry::new(),
            upgrades: UpgradeLedger::new(&config.upgrades),
            scheduler: WorldEventScheduler::new(),
            projectiles: ProjectileVolley::new(),
            inventory: Inventory::new(),
            score: 0,
            enemies_defeated: 0,
            enemy_move_timer: Duration::ZERO,
            ally_move_timer: Duration::ZERO,
            flash: None,
            defeated: false,
            tick_index: 0,
            config,
        };

        for _ in 0..world.config.population.resource_tokens {
            world.field.spawn_random(&mut world.rng, grid);
        }
        for _ in 0..world.config.population.currency_tokens() {
            world.field.spawn(ResourceKind::Currency, &mut world.rng, grid);
        }
        for _ in 0..world.config.population.enemies {
            let cell = random_cell(&mut world.rng, grid);
            let _ = world.spawn_enemy(cell, SpawnOrigin::WorldGeneration, out_events);
        }

        world
    }

    fn spawn_enemy(
        &mut self,
        cell: CellCoord,
        origin: SpawnOrigin,
        out_events: &mut Vec<Event>,
    ) -> EntityId {
        let tuning = &self.config.enemy;
        let mut enemy = Entity::new(EntityId::PLAYER, Team::Enemy, cell, tuning.health);
        enemy.attack_power = tuning.attack_power;
        enemy.speed = tuning.speed as f32;
        if self.scheduler.active() == Some(WorldEventKind::MonkeyRaid) {
            boost_for_raid(&mut enemy, &self.config.world_events);
        }

        let enemy = self.roster.add_enemy(enemy);
        out_events.push(Event::EnemySpawned {
            enemy,
            cell,
            origin,
        });
        enemy
    }

    fn spawn_ally(&mut self, cell: CellCoord, origin: SpawnOrigin, out_events: &mut Vec<Event>) {
        let mut ally = Entity::new(EntityId::PLAYER, Team::Ally, cell, self.config.ally.health);
        ally.attack_strength = self.config.ally.attack_strength;

        let ally = self.roster.add_ally(ally);
        out_events.push(Event::AllySpawned { ally, cell, origin });
    }

    fn flash(&mut self, kind: FlashKind) {
        self.flash = Some((kind, self.config.player.flash()));
    }

    fn damage_player(&mut self, amount: u32, source: DamageSource, out_events: &mut Vec<Event>) {
        let dealt = self.player.take_damage(amount);
        self.flash(FlashKind::Hit);
        out_events.push(Event::PlayerDamaged {
            amount: dealt,
            health: self.player.body.health,
            source,
        });
    }

    /// Removes enemies the player defeated directly, crediting and replacing each.
    fn credit_player_kills(&mut self, defeated: &[EntityId], out_events: &mut Vec<Event>) {
        for enemy in defeated {
            let Some(index) = self.roster.enemies.iter().position(|entry| entry.id == *enemy)
            else {
                continue;
            };
            let _ = self.roster.enemies.remove(index);
            self.score = self.score.saturating_add(self.config.projectile.kill_score);
            self.enemies_defeated = self.enemies_defeated.saturating_add(1);

            let cell = random_cell(&mut self.rng, self.grid);
            let _ = self.spawn_enemy(cell, SpawnOrigin::Replacement, out_events);
        }
    }

    fn strike(&mut self, out_events: &mut Vec<Event>) {
        let origin = self.player.body.cell;
        let mut defeated = Vec::new();
        for enemy in self
            .roster
            .enemies
            .iter_mut()
            .filter(|enemy| enemy.alive && enemy.cell.chebyshev_distance(origin) <= 1)
        {
            enemy.alive = false;
            defeated.push(enemy.id);
            out_events.push(Event::EnemyDefeated {
                enemy: enemy.id,
                cell: enemy.cell,
                cause: DefeatCause::Strike,
            });
        }
        self.credit_player_kills(&defeated, out_events);
    }

    fn place_structure(&mut self, kind: StructureKind, out_events: &mut Vec<Event>) {
        let cell = self.player.body.cell;
        let placed = self.structures.place(
            kind,
            cell,
            Team::Player,
            &mut self.inventory,
            &self.config.structures,
        );
        out_events.push(match placed {
            Ok(structure) => Event::StructurePlaced {
                structure,
                kind,
                team: Team::Player,
                cell,
            },
            Err(reason) => Event::StructurePlacementRejected {
                kind,
                team: Team::Player,
                cell,
                reason,
            },
        });
    }

    fn recruit_ally(&mut self, out_events: &mut Vec<Event>) {
        let required = self.config.ally.recruit_cost;
        if self.score < required {
            out_events.push(Event::AllyRecruitRejected {
                reason: RecruitError::InsufficientScore {
                    required,
                    available: self.score,
                },
            });
            return;
        }

        self.score -= required;
        let cell = self.player.body.cell;
        self.spawn_ally(cell, SpawnOrigin::Recruited, out_events);
    }

    fn purchase_upgrade(&mut self, upgrade: UpgradeKind, out_events: &mut Vec<Event>) {
        let result = self
            .upgrades
            .try_purchase(upgrade, self.score)
            .map(|receipt| (upgrade, receipt));
        let _ = self.record_purchase(result, out_events);
    }

    /// Settles a purchase attempt, returning whether it went through.
    fn record_purchase(
        &mut self,
        result: Result<(UpgradeKind, PurchaseReceipt), PurchaseError>,
        out_events: &mut Vec<Event>,
    ) -> bool {
        match result {
            Ok((upgrade, receipt)) => {
                self.score = receipt.remaining;
                out_events.push(Event::UpgradePurchased {
                    upgrade,
                    level: receipt.level,
                    next_cost: receipt.next_cost,
                    remaining: receipt.remaining,
                });
                true
            }
            Err(reason) => {
                out_events.push(Event::UpgradePurchaseRejected { reason });
                false
            }
        }
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced { dt });

        if self.player.body.health == 0 {
            self.defeated = true;
            out_events.push(Event::PlayerDefeated {
                score: self.score,
                enemies_defeated: self.enemies_defeated,
            });
            return;
        }

        if let Some((kind, remaining)) = self.flash {
            let remaining = remaining.saturating_sub(dt);
            self.flash = (!remaining.is_zero()).then_some((kind, remaining));
        }

        self.upgrades.apply_all(
            &mut self.player,
            &mut self.roster.allies,
            &mut self.structures,
            &self.config.player,
            &self.config.ally,
        );

        let defeated = self.projectiles.advance(
            dt,
            &self.config.projectile,
            self.grid,
            &mut self.roster,
            out_events,
        );
        self.credit_player_kills(&defeated, out_events);

        self.move_enemies(dt, out_events);
        self.resolve_enemy_contact(dt, out_events);
        self.collect_player_tokens(out_events);
        self.move_allies(dt, out_events);

        for _ in self.roster.sweep_defeated_enemies() {
            let cell = random_cell(&mut self.rng, self.grid);
            let _ = self.spawn_enemy(cell, SpawnOrigin::Replacement, out_events);
        }

        self.tick_structures(dt, out_events);
        self.tick_world_events(dt, out_events);
    }

    fn move_enemies(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.enemy_move_timer = self.enemy_move_timer.saturating_add(dt);
        if self.enemy_move_timer < self.config.enemy.move_interval() {
            return;
        }
        self.enemy_move_timer = Duration::ZERO;

        let player_cell = self.player.body.cell;
        for enemy in self.roster.enemies.iter_mut().filter(|enemy| enemy.alive) {
            enemy.wander(&mut self.rng, self.grid);
            if enemy.cell != player_cell {
                continue;
            }

            for kind in self.field.kinds_at(enemy.cell) {
                if kind == ResourceKind::Currency
                    || !self
                        .field
                        .collect_and_replace(enemy.cell, kind, &mut self.rng, self.grid)
                {
                    continue;
                }
                if kind != ResourceKind::Food {
                    enemy.inventory.add(kind, 1);
                }
                out_events.push(Event::ResourceCollected {
                    collector: Collector::Enemy(enemy.id),
                    kind,
                    cell: enemy.cell,
                });
            }

            if enemy.inventory.get(ResourceKind::Wood) >= self.config.enemy.build_threshold {
                let placed = self.structures.place(
                    StructureKind::Hut,
                    enemy.cell,
                    Team::Enemy,
                    &mut enemy.inventory,
                    &self.config.structures,
                );
                out_events.push(match placed {
                    Ok(structure) => Event::StructurePlaced {
                        structure,
                        kind: StructureKind::Hut,
                        team: Team::Enemy,
                        cell: enemy.cell,
                    },
                    Err(reason) => Event::StructurePlacementRejected {
                        kind: StructureKind::Hut,
                        team: Team::Enemy,
                        cell: enemy.cell,
                        reason,
                    },
                });
            }
        }
    }

    fn resolve_enemy_contact(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.player.hit && self.player.invulnerable_for > self.config.player.invulnerability() {
            self.player.hit = false;
            self.player.invulnerable_for = Duration::ZERO;
        }

        if self.player.hit {
            self.player.invulnerable_for = self.player.invulnerable_for.saturating_add(dt);
            return;
        }

        let player_cell = self.player.body.cell;
        let attackers: Vec<(EntityId, u32)> = self
            .roster
            .living_enemies()
            .filter(|enemy| enemy.cell == player_cell)
            .map(|enemy| (enemy.id, enemy.attack_power))
            .collect();
        for (enemy, attack_power) in attackers {
            self.damage_player(attack_power, DamageSource::Enemy(enemy), out_events);
        }
    }

    fn collect_player_tokens(&mut self, out_events: &mut Vec<Event>) {
        let cell = self.player.body.cell;

        while self.field.remove_one(cell, ResourceKind::Currency) {
            self.score = self.score.saturating_add(self.config.player.currency_score);
            out_events.push(Event::ResourceCollected {
                collector: Collector::Player,
                kind: ResourceKind::Currency,
                cell,
            });
        }

        for kind in self.field.kinds_at(cell) {
            match kind {
                ResourceKind::Currency => {}
                ResourceKind::Food if !self.player.is_hurt() => {
                    out_events.push(Event::FoodDeclined { cell });
                }
                ResourceKind::Food => {
                    if self
                        .field
                        .collect_and_replace(cell, kind, &mut self.rng, self.grid)
                    {
                        let amount = self.player.heal(self.config.player.heal_amount);
                        self.inventory.add(kind, 1);
                        self.flash(FlashKind::Heal);
                        out_events.push(Event::ResourceCollected {
                            collector: Collector::Player,
                            kind,
                            cell,
                        });
                        out_events.push(Event::PlayerHealed {
                            amount,
                            health: self.player.body.health,
                        });
                    }
                }
                ResourceKind::Wood | ResourceKind::Stone => {
                    if self
                        .field
                        .collect_and_replace(cell, kind, &mut self.rng, self.grid)
                    {
                        self.inventory.add(kind, 1);
                        out_events.push(Event::ResourceCollected {
                            collector: Collector::Player,
                            kind,
                            cell,
                        });
                    }
                }
            }
        }
    }

    fn move_allies(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.ally_move_timer = self.ally_move_timer.saturating_add(dt);
        if self.ally_move_timer < self.config.ally.move_interval() {
            return;
        }
        self.ally_move_timer = Duration::ZERO;

        let enemies = &mut self.roster.enemies;
        for ally in self.roster.allies.iter_mut().filter(|ally| ally.alive) {
            ally.wander(&mut self.rng, self.grid);

            if let Some(enemy) = enemies
                .iter_mut()
                .find(|enemy| enemy.alive && enemy.cell.chebyshev_distance(ally.cell) <= 1)
            {
                enemy.alive = false;
                out_events.push(Event::EnemyDefeated {
                    enemy: enemy.id,
                    cell: enemy.cell,
                    cause: DefeatCause::Ally(ally.id),
                });
            }

            for kind in self.field.kinds_at(ally.cell) {
                if kind == ResourceKind::Currency
                    || !self
                        .field
                        .collect_and_replace(ally.cell, kind, &mut self.rng, self.grid)
                {
                    continue;
                }
                if kind != ResourceKind::Food {
                    self.inventory.add(kind, 1);
                }
                out_events.push(Event::ResourceCollected {
                    collector: Collector::Ally(ally.id),
                    kind,
                    cell: ally.cell,
                });
            }

            if self.inventory.get(ResourceKind::Wood) >= self.config.ally.build_threshold {
                let placed = self.structures.place(
                    StructureKind::Hut,
                    ally.cell,
                    Team::Player,
                    &mut self.inventory,
                    &self.config.structures,
                );
                out_events.push(match placed {
                    Ok(structure) => Event::StructurePlaced {
                        structure,
                        kind: StructureKind::Hut,
                        team: Team::Player,
                        cell: ally.cell,
                    },
                    Err(reason) => Event::StructurePlacementRejected {
                        kind: StructureKind::Hut,
                        team: Team::Player,
                        cell: ally.cell,
                        reason,
                    },
                });
            }
        }
    }

    fn tick_structures(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let mut outcomes = Vec::new();
        self.structures.tick(
            dt,
            &self.config.structures,
            &mut self.roster,
            self.player.body.cell,
            &mut outcomes,
            out_events,
        );

        for outcome in outcomes {
            match outcome {
                StructureOutcome::SpawnAlly { structure, cell } => {
                    self.spawn_ally(cell, SpawnOrigin::Structure(structure), out_events);
                }
                StructureOutcome::SpawnEnemy { structure, cell } => {
                    let _ = self.spawn_enemy(cell, SpawnOrigin::Structure(structure), out_events);
                }
                StructureOutcome::StrikePlayer { structure, damage } => {
                    self.damage_player(damage, DamageSource::Structure(structure), out_events);
                }
            }
        }
    }

    fn tick_world_events(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        match self
            .scheduler
            .tick(dt, &self.config.world_events, &mut self.rng)
        {
            SchedulerStep::Idle => {}
            SchedulerStep::Started(kind) => {
                match kind {
                    WorldEventKind::MonkeyRaid => {
                        for enemy in self.roster.enemies.iter_mut().filter(|enemy| enemy.alive) {
                            boost_for_raid(enemy, &self.config.world_events);
                        }
                    }
                    WorldEventKind::ResourceShortage => self.field.set_narrowed(true),
                    WorldEventKind::MeteorShower | WorldEventKind::DiamondRain => {}
                }
                out_events.push(Event::WorldEventStarted { kind });
            }
            SchedulerStep::Active(kind) => self.apply_world_event(kind, out_events),
            SchedulerStep::Ended(kind) => {
                match kind {
                    WorldEventKind::MonkeyRaid => {
                        let tuning = &self.config.world_events;
                        for enemy in self
                            .roster
                            .enemies
                            .iter_mut()
                            .filter(|enemy| enemy.raid_boosted)
                        {
                            enemy.speed -= tuning.raid_speed_bonus as f32;
                            enemy.attack_power =
                                enemy.attack_power.saturating_sub(tuning.raid_attack_bonus);
                            enemy.raid_boosted = false;
                        }
                    }
                    WorldEventKind::ResourceShortage => self.field.set_narrowed(false),
                    WorldEventKind::MeteorShower | WorldEventKind::DiamondRain => {}
                }
                out_events.push(Event::WorldEventEnded { kind });
            }
        }
    }

    fn apply_world_event(&mut self, kind: WorldEventKind, out_events: &mut Vec<Event>) {
        match kind {
            WorldEventKind::MonkeyRaid => {}
            WorldEventKind::ResourceShortage => self.field.reroll_for_shortage(&mut self.rng),
            WorldEventKind::MeteorShower => self.meteor_strike(out_events),
            WorldEventKind::DiamondRain => {
                for _ in 0..self.config.world_events.diamonds_per_tick {
                    self.field
                        .spawn(ResourceKind::Currency, &mut self.rng, self.grid);
                }
            }
        }
    }

    fn meteor_strike(&mut self, out_events: &mut Vec<Event>) {
        let structure_damage = self.config.world_events.meteor_structure_damage;
        let entity_damage = self.config.world_events.meteor_entity_damage;
        let chance = probability(self.config.world_events.meteor_hit_chance);

        for destroyed in self.structures.damage_all(structure_damage) {
            out_events.push(Event::StructureDestroyed {
                structure: destroyed.id,
                kind: destroyed.kind,
                team: destroyed.team,
            });
        }

        if self.rng.gen_bool(chance) {
            self.damage_player(entity_damage, DamageSource::Meteor, out_events);
        }

        for enemy in self.roster.enemies.iter_mut().filter(|enemy| enemy.alive) {
            if self.rng.gen_bool(chance) && enemy.take_damage(entity_damage) {
                out_events.push(Event::EnemyDefeated {
                    enemy: enemy.id,
                    cell: enemy.cell,
                    cause: DefeatCause::Meteor,
                });
            }
        }
    }
}

fn boost_for_raid(enemy: &mut Entity, tuning: &monkey_tribe_core::config::WorldEventTuning) {
    enemy.speed += tuning.raid_speed_bonus as f32;
    enemy.attack_power = enemy.attack_power.saturating_add(tuning.raid_attack_bonus);
    enemy.raid_boosted = true;
}

fn probability(chance: f64) -> f64 {
    if chance.is_finite() {
        chance.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the player has been defeated every command is ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.defeated {
        return;
    }

    match command {
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::MovePlayer { direction } => {
            let from = world.player.body.cell;
            let to = from.step_clamped(direction, world.grid);
            world.player.body.cell = to;
            world.player.body.facing = direction;
            out_events.push(Event::PlayerMoved {
                from,
                to,
                facing: direction,
            });
        }
        Command::ThrowProjectile => {
            let cell = world.player.body.cell;
            let direction = world.player.body.facing;
            let projectile = world.projectiles.throw(cell, direction);
            out_events.push(Event::ProjectileThrown {
                projectile,
                cell,
                direction,
            });
        }
        Command::Strike => world.strike(out_events),
        Command::PlaceStructure { kind } => world.place_structure(kind, out_events),
        Command::RecruitAlly => world.recruit_ally(out_events),
        Command::PurchaseUpgrade { upgrade } => world.purchase_upgrade(upgrade, out_events),
    }
}

/// Purchases an upgrade identified by its snake_case name.
///
/// Unknown names and unaffordable levels leave the world untouched and emit
/// `UpgradePurchaseRejected`. Returns whether the purchase went through.
pub fn purchase_by_name(world: &mut World, name: &str, out_events: &mut Vec<Event>) -> bool {
    if world.defeated {
        return false;
    }

    let result = world.upgrades.try_purchase_by_name(name, world.score);
    world.record_purchase(result, out_events)
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use monkey_tribe_core::{
        Direction, EntityId, EntitySnapshot, FlashKind, GridSize, HudSnapshot, Inventory,
        ProjectileSnapshot, ResourceKind, StructureSnapshot, TokenSnapshot, UpgradeKind,
        WorldEventKind,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Dimensions of the grid measured in cells.
    #[must_use]
    pub fn grid(world: &World) -> GridSize {
        world.grid
    }

    /// Side length of a single square tile in pixels.
    #[must_use]
    pub fn tile_size(world: &World) -> f32 {
        world.config.grid.tile_size
    }

    /// Snapshot of the player entity.
    #[must_use]
    pub fn player(world: &World) -> EntitySnapshot {
        world.player.body.snapshot()
    }

    /// Player statistics affected by upgrades and damage.
    #[must_use]
    pub fn player_stats(world: &World) -> PlayerStats {
        PlayerStats {
            max_health: world.player.max_health,
            facing: world.player.body.facing,
            speed: world.player.body.speed,
            gather_speed: world.player.gather_speed,
            invulnerable: world.player.hit,
        }
    }

    /// Snapshots of every enemy, including those waiting to be swept.
    ///
    /// Enemies defeated by allies are swept within the same tick. Those
    /// defeated by structures or meteors are listed with `alive: false` until
    /// the next tick sweeps and replaces them.
    #[must_use]
    pub fn enemies(world: &World) -> Vec<EntitySnapshot> {
        world.roster.enemies.iter().map(|enemy| enemy.snapshot()).collect()
    }

    /// Attack power of the enemy, if it exists.
    #[must_use]
    pub fn enemy_attack_power(world: &World, enemy: EntityId) -> Option<u32> {
        world
            .roster
            .enemies
            .iter()
            .find(|entry| entry.id == enemy)
            .map(|entry| entry.attack_power)
    }

    /// Snapshots of every ally.
    #[must_use]
    pub fn allies(world: &World) -> Vec<EntitySnapshot> {
        world.roster.allies.iter().map(|ally| ally.snapshot()).collect()
    }

    /// Attack strength of the ally, if it exists.
    #[must_use]
    pub fn ally_attack_strength(world: &World, ally: EntityId) -> Option<f32> {
        world
            .roster
            .allies
            .iter()
            .find(|entry| entry.id == ally)
            .map(|entry| entry.attack_strength)
    }

    /// Snapshots of every structure in identifier order.
    #[must_use]
    pub fn structures(world: &World) -> Vec<StructureSnapshot> {
        world.structures.snapshots()
    }

    /// Snapshots of every resource token on the grid.
    #[must_use]
    pub fn tokens(world: &World) -> Vec<TokenSnapshot> {
        world.field.snapshots()
    }

    /// Number of resource tokens on the grid.
    #[must_use]
    pub fn token_count(world: &World) -> usize {
        world.field.len()
    }

    /// Number of tokens of the kind on the grid.
    #[must_use]
    pub fn token_count_of(world: &World, kind: ResourceKind) -> usize {
        world.field.count_of(kind)
    }

    /// Snapshots of every projectile in flight.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world.projectiles.snapshots()
    }

    /// Shared inventory filled by the player and allies.
    #[must_use]
    pub fn inventory(world: &World) -> &Inventory {
        &world.inventory
    }

    /// Score, which doubles as the currency pool.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Number of enemies defeated by projectiles or strikes.
    #[must_use]
    pub fn enemies_defeated(world: &World) -> u32 {
        world.enemies_defeated
    }

    /// Reports whether the session reached its terminal state.
    #[must_use]
    pub fn is_defeated(world: &World) -> bool {
        world.defeated
    }

    /// World event currently active, if any.
    #[must_use]
    pub fn active_event(world: &World) -> Option<WorldEventKind> {
        world.scheduler.active()
    }

    /// Flash overlay currently shown, if any.
    #[must_use]
    pub fn flash(world: &World) -> Option<FlashKind> {
        world.flash.map(|(kind, _)| kind)
    }

    /// Purchased level of the upgrade.
    #[must_use]
    pub fn upgrade_level(world: &World, upgrade: UpgradeKind) -> u32 {
        world.upgrades.level(upgrade)
    }

    /// Cost of the next level of the upgrade.
    #[must_use]
    pub fn upgrade_cost(world: &World, upgrade: UpgradeKind) -> u32 {
        world.upgrades.cost(upgrade)
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Counters shown on the heads-up display.
    #[must_use]
    pub fn hud(world: &World) -> HudSnapshot {
        HudSnapshot {
            score: world.score,
            health: world.player.body.health,
            max_health: world.player.max_health,
            enemies_defeated: world.enemies_defeated,
            inventory: world.inventory.clone(),
            active_event: world.scheduler.active(),
        }
    }

    /// Player statistics captured by [`player_stats`].
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct PlayerStats {
        /// Maximum health.
        pub max_health: u32,
        /// Direction the player faces and throws towards.
        pub facing: Direction,
        /// Movement speed after upgrades.
        pub speed: f32,
        /// Resource gathering speed after upgrades.
        pub gather_speed: f32,
        /// Whether the player is inside the post-hit invulnerability window.
        pub invulnerable: bool,
    }
}

#[cfg(test)]
mod tests;
