#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Monkey Tribe Wars simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing player intent or the passage of time, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! describing everything that happened. Systems consume event streams, query
//! immutable snapshots, and respond exclusively with new command batches.

use std::{collections::BTreeMap, fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;

pub use config::GameConfig;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Monkey Tribe Wars.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Moves the player a single cell and turns it to face the direction.
    MovePlayer {
        /// Direction of travel for the step.
        direction: Direction,
    },
    /// Throws a projectile from the player's cell along its facing.
    ThrowProjectile,
    /// Defeats every enemy adjacent to the player.
    Strike,
    /// Places a player-team structure at the player's cell.
    PlaceStructure {
        /// Kind of structure to construct.
        kind: StructureKind,
    },
    /// Spends score to recruit an AI-controlled ally at the player's cell.
    RecruitAlly,
    /// Spends score on the next level of an upgrade.
    PurchaseUpgrade {
        /// Upgrade being purchased.
        upgrade: UpgradeKind,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player stepped between two cells.
    PlayerMoved {
        /// Cell occupied before the step.
        from: CellCoord,
        /// Cell occupied after clamping the step to the grid.
        to: CellCoord,
        /// Direction the player now faces.
        facing: Direction,
    },
    /// Reports damage dealt to the player.
    PlayerDamaged {
        /// Amount of health removed.
        amount: u32,
        /// Health remaining after the hit.
        health: u32,
        /// What dealt the damage.
        source: DamageSource,
    },
    /// Reports health restored to the player.
    PlayerHealed {
        /// Amount of health restored after clamping to the maximum.
        amount: u32,
        /// Health after healing.
        health: u32,
    },
    /// Reports that food was left on the ground because health is already full.
    FoodDeclined {
        /// Cell holding the untouched food token.
        cell: CellCoord,
    },
    /// Announces that the player ran out of health and the session ended.
    PlayerDefeated {
        /// Final score.
        score: u32,
        /// Number of enemies defeated during the session.
        enemies_defeated: u32,
    },
    /// Confirms that a projectile left the player's hands.
    ProjectileThrown {
        /// Identifier allocated to the projectile.
        projectile: ProjectileId,
        /// Cell the projectile was thrown from.
        cell: CellCoord,
        /// Direction of travel.
        direction: Direction,
    },
    /// Reports that a projectile ran out of lifetime or left the grid.
    ProjectileExpired {
        /// Identifier of the expired projectile.
        projectile: ProjectileId,
    },
    /// Confirms that an enemy entered the world.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EntityId,
        /// Cell the enemy occupies after spawning.
        cell: CellCoord,
        /// Reason the enemy was spawned.
        origin: SpawnOrigin,
    },
    /// Reports that an enemy was defeated.
    EnemyDefeated {
        /// Identifier of the defeated enemy.
        enemy: EntityId,
        /// Cell the enemy occupied.
        cell: CellCoord,
        /// What defeated the enemy.
        cause: DefeatCause,
    },
    /// Confirms that an ally entered the world.
    AllySpawned {
        /// Identifier assigned to the ally.
        ally: EntityId,
        /// Cell the ally occupies after spawning.
        cell: CellCoord,
        /// Reason the ally was spawned.
        origin: SpawnOrigin,
    },
    /// Reports that an ally was destroyed.
    AllyDefeated {
        /// Identifier of the destroyed ally.
        ally: EntityId,
        /// Cell the ally occupied.
        cell: CellCoord,
    },
    /// Reports that an ally recruitment request was rejected.
    AllyRecruitRejected {
        /// Specific reason the recruitment failed.
        reason: RecruitError,
    },
    /// Confirms that a resource token was picked up.
    ResourceCollected {
        /// Entity that collected the token.
        collector: Collector,
        /// Kind of token collected.
        kind: ResourceKind,
        /// Cell the token was lying in.
        cell: CellCoord,
    },
    /// Confirms that a structure was placed into the world.
    StructurePlaced {
        /// Identifier assigned to the structure.
        structure: StructureId,
        /// Kind of structure placed.
        kind: StructureKind,
        /// Team owning the structure.
        team: Team,
        /// Cell the structure occupies.
        cell: CellCoord,
    },
    /// Reports that a structure placement request was rejected.
    StructurePlacementRejected {
        /// Kind of structure requested.
        kind: StructureKind,
        /// Team that requested the structure.
        team: Team,
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that a structure hit an opposing entity.
    StructureAttacked {
        /// Identifier of the attacking structure.
        structure: StructureId,
        /// Entity that took the hit.
        target: EntityId,
        /// Damage dealt.
        damage: u32,
    },
    /// Reports that a structure ran out of health and was removed.
    StructureDestroyed {
        /// Identifier of the destroyed structure.
        structure: StructureId,
        /// Kind of structure destroyed.
        kind: StructureKind,
        /// Team that owned the structure.
        team: Team,
    },
    /// Confirms an upgrade purchase.
    UpgradePurchased {
        /// Upgrade that gained a level.
        upgrade: UpgradeKind,
        /// Level reached by the purchase.
        level: u32,
        /// Cost of the next level.
        next_cost: u32,
        /// Score remaining after paying.
        remaining: u32,
    },
    /// Reports that an upgrade purchase was rejected.
    UpgradePurchaseRejected {
        /// Specific reason the purchase failed.
        reason: PurchaseError,
    },
    /// Announces that a world event became active.
    WorldEventStarted {
        /// Kind of world event.
        kind: WorldEventKind,
    },
    /// Announces that the active world event finished.
    WorldEventEnded {
        /// Kind of world event.
        kind: WorldEventKind,
    },
}

/// Origin of a spawned entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpawnOrigin {
    /// Created while generating the initial world.
    WorldGeneration,
    /// Created to replace a defeated enemy.
    Replacement,
    /// Produced by a structure's spawn timer.
    Structure(StructureId),
    /// Bought by the player with score.
    Recruited,
}

/// What defeated an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DefeatCause {
    /// Hit by a thrown projectile.
    Projectile,
    /// Struck in melee by the player.
    Strike,
    /// Attacked by an adjacent ally.
    Ally(EntityId),
    /// Worn down by a structure.
    Structure(StructureId),
    /// Hit by a meteor during a meteor shower.
    Meteor,
}

/// What dealt damage to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DamageSource {
    /// Contact with an enemy sharing the player's cell.
    Enemy(EntityId),
    /// An enemy-team structure in range.
    Structure(StructureId),
    /// A meteor during a meteor shower.
    Meteor,
}

/// Entity that collected a resource token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collector {
    /// The player.
    Player,
    /// An enemy harvesting into its own inventory.
    Enemy(EntityId),
    /// An ally gathering into the shared inventory.
    Ally(EntityId),
}

/// Cardinal movement directions.
///
/// Rows grow upwards, matching the pixel mapping used by [`CellCoord::to_pixels`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward decreasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All directions in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Column and row offsets of a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }
}

/// Unique identifier assigned to an entity (enemy, ally or the player).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Identifier permanently reserved for the player.
    pub const PLAYER: EntityId = EntityId(0);

    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructureId(u32);

impl StructureId {
    /// Creates a new structure identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the structure identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the projectile identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Dimensions of the playable grid measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    columns: u32,
    rows: u32,
}

impl GridSize {
    /// Creates a new grid size. Zero dimensions are raised to one cell.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns: if columns == 0 { 1 } else { columns },
            rows: if rows == 0 { 1 } else { rows },
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Cell at the centre of the grid.
    #[must_use]
    pub const fn center(&self) -> CellCoord {
        CellCoord::new(self.columns / 2, self.rows / 2)
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column < self.columns && cell.row < self.rows
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the cell reached by applying the offsets, clamped to the grid.
    #[must_use]
    pub fn offset_clamped(self, d_column: i32, d_row: i32, grid: GridSize) -> CellCoord {
        CellCoord::new(
            clamp_axis(self.column, d_column, grid.columns()),
            clamp_axis(self.row, d_row, grid.rows()),
        )
    }

    /// Returns the neighbouring cell in the direction, clamped to the grid.
    #[must_use]
    pub fn step_clamped(self, direction: Direction, grid: GridSize) -> CellCoord {
        let (d_column, d_row) = direction.offset();
        self.offset_clamped(d_column, d_row, grid)
    }

    /// Computes the Chebyshev (king-move) distance between two cells.
    #[must_use]
    pub fn chebyshev_distance(self, other: CellCoord) -> u32 {
        self.column
            .abs_diff(other.column)
            .max(self.row.abs_diff(other.row))
    }

    /// Squared Euclidean distance between two cells measured in tiles.
    #[must_use]
    pub fn distance_squared(self, other: CellCoord) -> u64 {
        let columns = u64::from(self.column.abs_diff(other.column));
        let rows = u64::from(self.row.abs_diff(other.row));
        columns * columns + rows * rows
    }

    /// Pixel position of the cell centre for the provided tile size.
    #[must_use]
    pub fn to_pixels(self, tile_size: f32) -> (f32, f32) {
        (
            self.column as f32 * tile_size + tile_size / 2.0,
            self.row as f32 * tile_size + tile_size / 2.0,
        )
    }
}

fn clamp_axis(value: u32, delta: i32, extent: u32) -> u32 {
    let max = i64::from(extent.saturating_sub(1));
    let moved = (i64::from(value) + i64::from(delta)).clamp(0, max);
    u32::try_from(moved).unwrap_or(0)
}

/// Kinds of collectible tokens lying on the grid.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    /// Building material for huts and towers.
    Wood,
    /// Building material for towers.
    Stone,
    /// Heals the player.
    Food,
    /// Diamonds that add directly to score.
    Currency,
}

impl ResourceKind {
    /// Token kinds that can be stored in an inventory and respawned on collection.
    pub const BUILDABLE: [ResourceKind; 3] =
        [ResourceKind::Wood, ResourceKind::Stone, ResourceKind::Food];

    /// Token kinds that remain available during a resource shortage.
    pub const SHORTAGE: [ResourceKind; 2] = [ResourceKind::Wood, ResourceKind::Stone];

    /// Canonical upper-case label of the kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wood => "WOOD",
            Self::Stone => "STONE",
            Self::Food => "FOOD",
            Self::Currency => "CURRENCY",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resource amounts required to build something, keyed by kind.
pub type ResourceCost = BTreeMap<ResourceKind, u32>;

/// Non-negative resource counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    counts: BTreeMap<ResourceKind, u32>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an inventory holding the provided amounts.
    #[must_use]
    pub fn with_amounts<I>(amounts: I) -> Self
    where
        I: IntoIterator<Item = (ResourceKind, u32)>,
    {
        let mut inventory = Self::new();
        for (kind, amount) in amounts {
            inventory.add(kind, amount);
        }
        inventory
    }

    /// Amount held for the kind.
    #[must_use]
    pub fn get(&self, kind: ResourceKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Adds the amount to the kind's counter.
    pub fn add(&mut self, kind: ResourceKind, amount: u32) {
        let entry = self.counts.entry(kind).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Lists every resource the inventory cannot cover for the cost.
    #[must_use]
    pub fn shortfalls(&self, cost: &ResourceCost) -> Vec<Shortfall> {
        cost.iter()
            .filter(|(kind, required)| self.get(**kind) < **required)
            .map(|(kind, required)| Shortfall {
                kind: *kind,
                required: *required,
                available: self.get(*kind),
            })
            .collect()
    }

    /// Deducts the whole cost, or nothing when any resource is short.
    pub fn try_spend(&mut self, cost: &ResourceCost) -> Result<(), Vec<Shortfall>> {
        let shortfalls = self.shortfalls(cost);
        if !shortfalls.is_empty() {
            return Err(shortfalls);
        }

        for (kind, amount) in cost {
            let entry = self.counts.entry(*kind).or_insert(0);
            *entry -= *amount;
        }
        Ok(())
    }

    /// Iterator over the non-zero counters in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        self.counts
            .iter()
            .filter(|(_, amount)| **amount > 0)
            .map(|(kind, amount)| (*kind, *amount))
    }
}

/// Single resource an inventory could not cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shortfall {
    /// Resource that is short.
    pub kind: ResourceKind,
    /// Amount the cost requires.
    pub required: u32,
    /// Amount the inventory holds.
    pub available: u32,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.kind, self.available, self.required)
    }
}

fn describe_shortfalls(shortfalls: &[Shortfall]) -> String {
    shortfalls
        .iter()
        .map(Shortfall::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Allegiance of an entity or structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    /// The human-controlled player.
    Player,
    /// Hostile monkeys.
    Enemy,
    /// AI-controlled monkeys fighting for the player.
    Ally,
}

impl Team {
    /// Reports whether the two teams fight each other.
    #[must_use]
    pub const fn is_hostile_to(self, other: Team) -> bool {
        matches!(
            (self, other),
            (Team::Enemy, Team::Player | Team::Ally) | (Team::Player | Team::Ally, Team::Enemy)
        )
    }
}

/// Types of structures that can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    /// Cheap structure.
    Hut,
    /// Sturdier structure that also needs stone.
    Tower,
}

impl StructureKind {
    /// Every structure kind.
    pub const ALL: [StructureKind; 2] = [StructureKind::Hut, StructureKind::Tower];
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hut => "hut",
            Self::Tower => "tower",
        })
    }
}

/// Upgrades that can be bought with score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    /// Raises the player's movement speed.
    PlayerSpeed,
    /// Multiplies ally attack strength.
    AiCombatStrength,
    /// Raises the health of every structure.
    StructureHealth,
    /// Multiplies the player's gathering speed.
    ResourceEfficiency,
}

impl UpgradeKind {
    /// Every upgrade in purchase-key order.
    pub const ALL: [UpgradeKind; 4] = [
        UpgradeKind::PlayerSpeed,
        UpgradeKind::AiCombatStrength,
        UpgradeKind::StructureHealth,
        UpgradeKind::ResourceEfficiency,
    ];

    /// Canonical snake-case name of the upgrade.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PlayerSpeed => "player_speed",
            Self::AiCombatStrength => "ai_combat_strength",
            Self::StructureHealth => "structure_health",
            Self::ResourceEfficiency => "resource_efficiency",
        }
    }
}

impl fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UpgradeKind {
    type Err = PurchaseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == value)
            .ok_or_else(|| PurchaseError::UnknownUpgrade {
                name: value.to_owned(),
            })
    }
}

/// Time-boxed global modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldEventKind {
    /// Enemies become faster and hit harder.
    MonkeyRaid,
    /// Resource tokens narrow to wood and stone.
    ResourceShortage,
    /// Meteors damage structures and random entities.
    MeteorShower,
    /// Extra currency tokens fall every tick.
    DiamondRain,
}

impl WorldEventKind {
    /// Every world event, in the order used for uniform selection.
    pub const ALL: [WorldEventKind; 4] = [
        WorldEventKind::MonkeyRaid,
        WorldEventKind::ResourceShortage,
        WorldEventKind::MeteorShower,
        WorldEventKind::DiamondRain,
    ];
}

impl fmt::Display for WorldEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MonkeyRaid => "Monkey Raid",
            Self::ResourceShortage => "Resource Shortage",
            Self::MeteorShower => "Meteor Shower",
            Self::DiamondRain => "Diamond Rain",
        })
    }
}

/// Reasons a structure placement request may be rejected by the world.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// At least one resource required by the structure's cost is missing.
    #[error("insufficient resources: {}", describe_shortfalls(.shortfalls))]
    InsufficientResources {
        /// Every resource the inventory could not cover.
        shortfalls: Vec<Shortfall>,
    },
}

/// Reasons an upgrade purchase may be rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PurchaseError {
    /// The score does not cover the upgrade's current cost.
    #[error("not enough diamonds for {upgrade}: need {required}, have {available}")]
    InsufficientCurrency {
        /// Upgrade that was requested.
        upgrade: UpgradeKind,
        /// Current cost of the upgrade.
        required: u32,
        /// Score available.
        available: u32,
    },
    /// No upgrade carries the requested name.
    #[error("unknown upgrade `{name}`")]
    UnknownUpgrade {
        /// Name that failed to resolve.
        name: String,
    },
}

/// Reasons an ally recruitment request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RecruitError {
    /// The score does not cover the recruitment cost.
    #[error("not enough points to recruit an ally: need {required}, have {available}")]
    InsufficientScore {
        /// Recruitment cost.
        required: u32,
        /// Score available.
        available: u32,
    },
}

/// Immutable representation of a single entity's state used for queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntitySnapshot {
    /// Unique identifier assigned to the entity.
    pub id: EntityId,
    /// Allegiance of the entity.
    pub team: Team,
    /// Grid cell currently occupied by the entity.
    pub cell: CellCoord,
    /// Remaining health.
    pub health: u32,
    /// Whether the entity still takes part in the simulation.
    pub alive: bool,
}

/// Immutable representation of a single structure's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StructureSnapshot {
    /// Identifier allocated to the structure by the world.
    pub id: StructureId,
    /// Kind of structure that was constructed.
    pub kind: StructureKind,
    /// Team owning the structure.
    pub team: Team,
    /// Cell occupied by the structure.
    pub cell: CellCoord,
    /// Remaining health.
    pub health: u32,
}

/// Immutable representation of a resource token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TokenSnapshot {
    /// Kind of token.
    pub kind: ResourceKind,
    /// Cell the token lies in.
    pub cell: CellCoord,
}

/// Immutable representation of a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile.
    pub id: ProjectileId,
    /// Column position measured in tiles, fractional while in flight.
    pub column: f32,
    /// Row position measured in tiles, fractional while in flight.
    pub row: f32,
    /// Spin applied for presentation, in degrees.
    pub rotation_degrees: f32,
}

/// Player-facing counters shown on the heads-up display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudSnapshot {
    /// Score, which also acts as the currency pool.
    pub score: u32,
    /// Player health.
    pub health: u32,
    /// Maximum player health.
    pub max_health: u32,
    /// Number of enemies defeated by the player's side.
    pub enemies_defeated: u32,
    /// Shared inventory.
    pub inventory: Inventory,
    /// World event currently active, if any.
    pub active_event: Option<WorldEventKind>,
}

/// Colour of the full-screen flash shown after a hit or a heal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlashKind {
    /// The player took damage.
    Hit,
    /// The player was healed.
    Heal,
}
