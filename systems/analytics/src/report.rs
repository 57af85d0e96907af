use std::{collections::BTreeMap, fmt, time::Duration};

use monkey_tribe_core::{ResourceKind, WorldEventKind};

/// Aggregated statistics describing a play session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionReport {
    /// Number of ticks observed.
    pub ticks: u64,
    /// Simulated time covered by the observed ticks.
    pub elapsed: Duration,
    /// Score reported when the player was defeated.
    pub final_score: Option<u32>,
    /// Total damage the player took.
    pub damage_taken: u32,
    /// Total health restored by food.
    pub health_restored: u32,
    /// Projectiles thrown by the player.
    pub projectiles_thrown: u32,
    /// Enemies defeated by projectiles.
    pub defeated_by_projectiles: u32,
    /// Enemies defeated by melee strikes.
    pub defeated_by_strikes: u32,
    /// Enemies defeated by allies.
    pub defeated_by_allies: u32,
    /// Enemies defeated by structures.
    pub defeated_by_structures: u32,
    /// Enemies defeated by meteors.
    pub defeated_by_meteors: u32,
    /// Allies recruited with score.
    pub allies_recruited: u32,
    /// Allies produced by huts and towers.
    pub allies_from_structures: u32,
    /// Allies destroyed by enemy structures.
    pub allies_lost: u32,
    /// Tokens gathered by the player's side, per kind.
    pub resources_gathered: BTreeMap<ResourceKind, u32>,
    /// Tokens harvested by enemies.
    pub resources_lost_to_enemies: u32,
    /// Structures placed by the player's side.
    pub structures_placed: u32,
    /// Structures placed by enemies.
    pub enemy_structures_placed: u32,
    /// Placement requests rejected for lack of resources.
    pub placements_rejected: u32,
    /// Structures destroyed.
    pub structures_destroyed: u32,
    /// Upgrade levels bought.
    pub upgrades_purchased: u32,
    /// Upgrade purchases and recruitments rejected for lack of score.
    pub purchases_rejected: u32,
    /// World events started, per kind.
    pub world_events: BTreeMap<WorldEventKind, u32>,
}

impl SessionReport {
    /// Enemies defeated by any cause.
    #[must_use]
    pub fn enemies_defeated(&self) -> u32 {
        self.defeated_by_projectiles
            .saturating_add(self.defeated_by_strikes)
            .saturating_add(self.defeated_by_allies)
            .saturating_add(self.defeated_by_structures)
            .saturating_add(self.defeated_by_meteors)
    }

    /// Tokens of the kind gathered by the player's side.
    #[must_use]
    pub fn gathered(&self, kind: ResourceKind) -> u32 {
        self.resources_gathered.get(&kind).copied().unwrap_or(0)
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ticks: {} ({:.1}s simulated)",
            self.ticks,
            self.elapsed.as_secs_f32()
        )?;
        match self.final_score {
            Some(score) => writeln!(f, "defeated with score {score}")?,
            None => writeln!(f, "survived")?,
        }
        writeln!(
            f,
            "enemies defeated: {} (projectile {}, strike {}, ally {}, structure {}, meteor {})",
            self.enemies_defeated(),
            self.defeated_by_projectiles,
            self.defeated_by_strikes,
            self.defeated_by_allies,
            self.defeated_by_structures,
            self.defeated_by_meteors
        )?;
        writeln!(
            f,
            "damage taken: {}, health restored: {}",
            self.damage_taken, self.health_restored
        )?;
        let gathered: Vec<String> = self
            .resources_gathered
            .iter()
            .map(|(kind, count)| format!("{kind} {count}"))
            .collect();
        writeln!(f, "gathered: [{}]", gathered.join(", "))?;
        writeln!(
            f,
            "structures: {} placed, {} enemy, {} destroyed, {} rejected",
            self.structures_placed,
            self.enemy_structures_placed,
            self.structures_destroyed,
            self.placements_rejected
        )?;
        writeln!(
            f,
            "allies: {} recruited, {} from structures, {} lost",
            self.allies_recruited, self.allies_from_structures, self.allies_lost
        )?;
        let events: Vec<String> = self
            .world_events
            .iter()
            .map(|(kind, count)| format!("{kind} x{count}"))
            .collect();
        write!(
            f,
            "upgrades: {}, world events: [{}]",
            self.upgrades_purchased,
            events.join(", ")
        )
    }
}
