//! Tunable parameters of a Monkey Tribe Wars session.
//!
//! Every section deserializes with `#[serde(default)]`, so a configuration
//! file only has to name the values it overrides. Durations are stored as
//! seconds to keep configuration files readable.

use std::{collections::BTreeMap, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{GridSize, ResourceCost, ResourceKind, StructureKind, UpgradeKind, WorldEventKind};

/// Aggregated tuning knobs controlling every adjustable aspect of a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed of the single random stream driving the simulation.
    pub seed: u64,
    /// Grid dimensions and tile size.
    pub grid: GridTuning,
    /// Initial world population.
    pub population: PopulationTuning,
    /// Player health, damage and collection tuning.
    pub player: PlayerTuning,
    /// Enemy movement and combat tuning.
    pub enemy: EnemyTuning,
    /// Ally recruitment and behaviour tuning.
    pub ally: AllyTuning,
    /// Thrown projectile tuning.
    pub projectile: ProjectileTuning,
    /// Structure costs, health and combat tuning.
    pub structures: StructureTuning,
    /// Upgrade costs and effects.
    pub upgrades: UpgradeTuning,
    /// World-event cooldown, durations and effects.
    pub world_events: WorldEventTuning,
}

/// Grid dimensions and tile size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridTuning {
    /// Number of columns.
    pub columns: u32,
    /// Number of rows.
    pub rows: u32,
    /// Side length of a tile in pixels.
    pub tile_size: f32,
}

impl GridTuning {
    /// Grid dimensions as a [`GridSize`].
    #[must_use]
    pub const fn size(&self) -> GridSize {
        GridSize::new(self.columns, self.rows)
    }
}

impl Default for GridTuning {
    fn default() -> Self {
        Self {
            columns: 50,
            rows: 50,
            tile_size: 64.0,
        }
    }
}

/// Initial world population.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationTuning {
    /// Number of buildable resource tokens scattered at world generation.
    pub resource_tokens: u32,
    /// Divisor applied to `resource_tokens` to obtain the number of currency tokens.
    pub currency_divisor: u32,
    /// Number of enemies kept alive at all times.
    pub enemies: u32,
}

impl PopulationTuning {
    /// Number of currency tokens scattered at world generation.
    #[must_use]
    pub const fn currency_tokens(&self) -> u32 {
        if self.currency_divisor == 0 {
            0
        } else {
            self.resource_tokens / self.currency_divisor
        }
    }
}

impl Default for PopulationTuning {
    fn default() -> Self {
        Self {
            resource_tokens: 100,
            currency_divisor: 3,
            enemies: 10,
        }
    }
}

/// Player health, damage and collection tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Maximum and starting health.
    pub max_health: u32,
    /// Health restored by eating a food token.
    pub heal_amount: u32,
    /// Window after a hit during which enemy contact deals no damage.
    pub invulnerability_secs: f32,
    /// Duration of the hit or heal screen flash.
    pub flash_secs: f32,
    /// Score awarded per collected currency token.
    pub currency_score: u32,
    /// Base movement speed before upgrades.
    pub speed: f32,
    /// Base gathering speed before upgrades.
    pub gather_speed: f32,
}

impl PlayerTuning {
    /// Invulnerability window as a [`Duration`].
    #[must_use]
    pub fn invulnerability(&self) -> Duration {
        seconds(self.invulnerability_secs)
    }

    /// Screen flash duration as a [`Duration`].
    #[must_use]
    pub fn flash(&self) -> Duration {
        seconds(self.flash_secs)
    }
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            heal_amount: 10,
            invulnerability_secs: 1.0,
            flash_secs: 0.25,
            currency_score: 1,
            speed: 1.0,
            gather_speed: 1.0,
        }
    }
}

/// Enemy movement and combat tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Starting health of an enemy.
    pub health: u32,
    /// Damage dealt on contact with the player.
    pub attack_power: u32,
    /// Base movement speed.
    pub speed: u32,
    /// Time between random steps.
    pub move_interval_secs: f32,
    /// Wood an enemy must carry before it tries to build a hut.
    pub build_threshold: u32,
}

impl EnemyTuning {
    /// Movement interval as a [`Duration`].
    #[must_use]
    pub fn move_interval(&self) -> Duration {
        seconds(self.move_interval_secs)
    }
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            health: 100,
            attack_power: 10,
            speed: 1,
            move_interval_secs: 0.5,
            build_threshold: 10,
        }
    }
}

/// Ally recruitment and behaviour tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllyTuning {
    /// Score spent to recruit an ally.
    pub recruit_cost: u32,
    /// Starting health of an ally.
    pub health: u32,
    /// Base attack strength before upgrades.
    pub attack_strength: f32,
    /// Time between random steps.
    pub move_interval_secs: f32,
    /// Shared wood required before an ally tries to build a hut.
    pub build_threshold: u32,
}

impl AllyTuning {
    /// Movement interval as a [`Duration`].
    #[must_use]
    pub fn move_interval(&self) -> Duration {
        seconds(self.move_interval_secs)
    }
}

impl Default for AllyTuning {
    fn default() -> Self {
        Self {
            recruit_cost: 20,
            health: 100,
            attack_strength: 1.0,
            move_interval_secs: 0.5,
            build_threshold: 10,
        }
    }
}

/// Thrown projectile tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Travel speed in tiles per second.
    pub speed_tiles_per_sec: f32,
    /// Time a projectile stays in flight.
    pub lifetime_secs: f32,
    /// Spin applied per tick, in degrees.
    pub spin_degrees: f32,
    /// Score awarded per enemy defeated by the player.
    pub kill_score: u32,
}

impl ProjectileTuning {
    /// Lifetime as a [`Duration`].
    #[must_use]
    pub fn lifetime(&self) -> Duration {
        seconds(self.lifetime_secs)
    }
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed_tiles_per_sec: 5.0,
            lifetime_secs: 1.0,
            spin_degrees: 10.0,
            kill_score: 5,
        }
    }
}

/// Structure costs, health and combat tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureTuning {
    /// Resource cost of each structure kind.
    pub costs: BTreeMap<StructureKind, ResourceCost>,
    /// Starting health of each structure kind.
    pub health: BTreeMap<StructureKind, u32>,
    /// Time between allies spawned by a player-team structure.
    pub player_spawn_cooldown_secs: f32,
    /// Time between enemies spawned by an enemy-team structure.
    pub enemy_spawn_cooldown_secs: f32,
    /// Accumulated time after which a structure attacks.
    pub attack_interval_secs: f32,
    /// Damage dealt to each target in range.
    pub attack_damage: u32,
    /// Attack radius measured in tiles.
    pub attack_range_tiles: u32,
    /// Resets the attack timer of enemy-team structures on every tick, not only after an attack.
    pub enemy_attack_timer_resets_every_tick: bool,
}

impl StructureTuning {
    /// Resource cost of the structure kind. Unconfigured kinds keep their default cost.
    #[must_use]
    pub fn cost(&self, kind: StructureKind) -> ResourceCost {
        self.costs
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| default_structure_cost(kind))
    }

    /// Starting health of the structure kind. Unconfigured kinds keep their default health.
    #[must_use]
    pub fn health(&self, kind: StructureKind) -> u32 {
        self.health
            .get(&kind)
            .copied()
            .unwrap_or_else(|| default_structure_health(kind))
    }

    /// Spawn cooldown of player-team structures as a [`Duration`].
    #[must_use]
    pub fn player_spawn_cooldown(&self) -> Duration {
        seconds(self.player_spawn_cooldown_secs)
    }

    /// Spawn cooldown of enemy-team structures as a [`Duration`].
    #[must_use]
    pub fn enemy_spawn_cooldown(&self) -> Duration {
        seconds(self.enemy_spawn_cooldown_secs)
    }

    /// Attack interval as a [`Duration`].
    #[must_use]
    pub fn attack_interval(&self) -> Duration {
        seconds(self.attack_interval_secs)
    }
}

impl Default for StructureTuning {
    fn default() -> Self {
        Self {
            costs: StructureKind::ALL
                .into_iter()
                .map(|kind| (kind, default_structure_cost(kind)))
                .collect(),
            health: StructureKind::ALL
                .into_iter()
                .map(|kind| (kind, default_structure_health(kind)))
                .collect(),
            player_spawn_cooldown_secs: 10.0,
            enemy_spawn_cooldown_secs: 10.0,
            attack_interval_secs: 1.0,
            attack_damage: 20,
            attack_range_tiles: 2,
            enemy_attack_timer_resets_every_tick: true,
        }
    }
}

fn default_structure_cost(kind: StructureKind) -> ResourceCost {
    match kind {
        StructureKind::Hut => ResourceCost::from([(ResourceKind::Wood, 10)]),
        StructureKind::Tower => {
            ResourceCost::from([(ResourceKind::Wood, 10), (ResourceKind::Stone, 10)])
        }
    }
}

fn default_structure_health(kind: StructureKind) -> u32 {
    match kind {
        StructureKind::Hut => 100,
        StructureKind::Tower => 200,
    }
}

/// Base cost and per-level effect of one upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpgradeSpec {
    /// Cost of the first level.
    pub base_cost: u32,
    /// Effect magnitude applied per level.
    pub effect: f32,
}

/// Upgrade costs and effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeTuning {
    /// Cost and effect of every upgrade.
    pub specs: BTreeMap<UpgradeKind, UpgradeSpec>,
    /// Re-adds every effect on each tick instead of recomputing it.
    pub compounding: bool,
}

impl UpgradeTuning {
    /// Cost and effect of the upgrade.
    #[must_use]
    pub fn spec(&self, kind: UpgradeKind) -> UpgradeSpec {
        self.specs
            .get(&kind)
            .copied()
            .unwrap_or_else(|| default_upgrade_spec(kind))
    }
}

impl Default for UpgradeTuning {
    fn default() -> Self {
        Self {
            specs: UpgradeKind::ALL
                .into_iter()
                .map(|kind| (kind, default_upgrade_spec(kind)))
                .collect(),
            compounding: false,
        }
    }
}

fn default_upgrade_spec(kind: UpgradeKind) -> UpgradeSpec {
    let (base_cost, effect) = match kind {
        UpgradeKind::PlayerSpeed => (10, 0.2),
        UpgradeKind::AiCombatStrength => (20, 1.1),
        UpgradeKind::StructureHealth => (30, 50.0),
        UpgradeKind::ResourceEfficiency => (15, 1.2),
    };
    UpgradeSpec { base_cost, effect }
}

/// World-event cooldown, durations and effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldEventTuning {
    /// Idle time required before the next event starts.
    pub cooldown_secs: f32,
    /// Duration of a monkey raid.
    pub raid_secs: f32,
    /// Duration of a resource shortage.
    pub shortage_secs: f32,
    /// Duration of a meteor shower.
    pub meteor_secs: f32,
    /// Duration of a diamond rain.
    pub diamond_rain_secs: f32,
    /// Speed added to every enemy during a raid.
    pub raid_speed_bonus: u32,
    /// Attack power added to every enemy during a raid.
    pub raid_attack_bonus: u32,
    /// Damage dealt to every structure per meteor tick.
    pub meteor_structure_damage: u32,
    /// Damage dealt to an entity hit by a meteor.
    pub meteor_entity_damage: u32,
    /// Chance per tick that a given entity is hit by a meteor.
    pub meteor_hit_chance: f64,
    /// Currency tokens spawned per diamond-rain tick.
    pub diamonds_per_tick: u32,
}

impl WorldEventTuning {
    /// Cooldown as a [`Duration`].
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        seconds(self.cooldown_secs)
    }

    /// Fixed duration of the event kind.
    #[must_use]
    pub fn duration(&self, kind: WorldEventKind) -> Duration {
        seconds(match kind {
            WorldEventKind::MonkeyRaid => self.raid_secs,
            WorldEventKind::ResourceShortage => self.shortage_secs,
            WorldEventKind::MeteorShower => self.meteor_secs,
            WorldEventKind::DiamondRain => self.diamond_rain_secs,
        })
    }
}

impl Default for WorldEventTuning {
    fn default() -> Self {
        Self {
            cooldown_secs: 30.0,
            raid_secs: 10.0,
            shortage_secs: 15.0,
            meteor_secs: 5.0,
            diamond_rain_secs: 10.0,
            raid_speed_bonus: 1,
            raid_attack_bonus: 5,
            meteor_structure_damage: 20,
            meteor_entity_damage: 10,
            meteor_hit_chance: 0.1,
            diamonds_per_tick: 5,
        }
    }
}

fn seconds(value: f32) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::from_secs_f32(value)
    } else {
        Duration::ZERO
    }
}
