//! Authoritative structure state management utilities.

use std::{collections::BTreeMap, time::Duration};

use monkey_tribe_core::{
    config::StructureTuning, CellCoord, DefeatCause, EntityId, Event, Inventory, PlacementError,
    StructureId, StructureKind, StructureSnapshot, Team,
};

use crate::entities::Roster;

/// Snapshot of a structure stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct StructureState {
    pub(crate) id: StructureId,
    pub(crate) kind: StructureKind,
    pub(crate) team: Team,
    pub(crate) cell: CellCoord,
    pub(crate) health: u32,
    /// Health already granted by the structure-health upgrade.
    pub(crate) health_bonus: u32,
    spawn_timer: Duration,
    attack_timer: Duration,
}

impl StructureState {
    fn snapshot(&self) -> StructureSnapshot {
        StructureSnapshot {
            id: self.id,
            kind: self.kind,
            team: self.team,
            cell: self.cell,
            health: self.health,
        }
    }

    fn in_range(&self, cell: CellCoord, range_tiles: u32) -> bool {
        let range = u64::from(range_tiles);
        self.cell.distance_squared(cell) <= range * range
    }
}

/// Side effects of a structure tick that the world resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StructureOutcome {
    /// A player-team structure produced an ally.
    SpawnAlly {
        structure: StructureId,
        cell: CellCoord,
    },
    /// An enemy-team structure produced an enemy.
    SpawnEnemy {
        structure: StructureId,
        cell: CellCoord,
    },
    /// An enemy-team structure hit the player.
    StrikePlayer {
        structure: StructureId,
        damage: u32,
    },
}

/// Registry that stores structures and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct StructureRegistry {
    entries: BTreeMap<StructureId, StructureState>,
    next_structure_id: StructureId,
}

impl StructureRegistry {
    /// Creates an empty structure registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_structure_id: StructureId::new(0),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Places a structure, paying its cost from `inventory` in full or not at all.
    pub(crate) fn place(
        &mut self,
        kind: StructureKind,
        cell: CellCoord,
        team: Team,
        inventory: &mut Inventory,
        tuning: &StructureTuning,
    ) -> Result<StructureId, PlacementError> {
        inventory
            .try_spend(&tuning.cost(kind))
            .map_err(|shortfalls| PlacementError::InsufficientResources { shortfalls })?;

        let id = self.next_structure_id;
        self.next_structure_id = StructureId::new(id.get().saturating_add(1));
        let _ = self.entries.insert(
            id,
            StructureState {
                id,
                kind,
                team,
                cell,
                health: tuning.health(kind),
                health_bonus: 0,
                spawn_timer: Duration::ZERO,
                attack_timer: Duration::ZERO,
            },
        );
        Ok(id)
    }

    /// Subtracts health, removing and returning the structure once it is destroyed.
    pub(crate) fn take_damage(
        &mut self,
        structure: StructureId,
        amount: u32,
    ) -> Option<StructureState> {
        let entry = self.entries.get_mut(&structure)?;
        entry.health = entry.health.saturating_sub(amount);
        if entry.health == 0 {
            self.entries.remove(&structure)
        } else {
            None
        }
    }

    /// Damages every structure, returning the ones that were destroyed.
    pub(crate) fn damage_all(&mut self, amount: u32) -> Vec<StructureState> {
        let ids: Vec<StructureId> = self.entries.keys().copied().collect();
        ids.into_iter()
            .filter_map(|id| self.take_damage(id, amount))
            .collect()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut StructureState> {
        self.entries.values_mut()
    }

    pub(crate) fn snapshots(&self) -> Vec<StructureSnapshot> {
        self.entries.values().map(StructureState::snapshot).collect()
    }

    /// Advances spawn and attack timers, resolving attacks against `roster`.
    ///
    /// Player-team structures keep their attack timer once it crosses the
    /// interval and therefore attack on every following tick. Enemy-team
    /// structures reset the timer at the end of each tick, or only after an
    /// attack when `enemy_attack_timer_resets_every_tick` is disabled.
    pub(crate) fn tick(
        &mut self,
        dt: Duration,
        tuning: &StructureTuning,
        roster: &mut Roster,
        player_cell: CellCoord,
        outcomes: &mut Vec<StructureOutcome>,
        out_events: &mut Vec<Event>,
    ) {
        let range = tuning.attack_range_tiles;
        let damage = tuning.attack_damage;

        for structure in self.entries.values_mut() {
            structure.spawn_timer = structure.spawn_timer.saturating_add(dt);
            structure.attack_timer = structure.attack_timer.saturating_add(dt);
            let attack_ready = structure.attack_timer >= tuning.attack_interval();

            match structure.team {
                Team::Player | Team::Ally => {
                    if structure.spawn_timer >= tuning.player_spawn_cooldown() {
                        structure.spawn_timer = Duration::ZERO;
                        outcomes.push(StructureOutcome::SpawnAlly {
                            structure: structure.id,
                            cell: structure.cell,
                        });
                    }

                    if attack_ready {
                        for enemy in roster
                            .enemies
                            .iter_mut()
                            .filter(|enemy| {
                                enemy.alive
                                    && structure.team.is_hostile_to(enemy.team)
                                    && structure.in_range(enemy.cell, range)
                            })
                        {
                            out_events.push(Event::StructureAttacked {
                                structure: structure.id,
                                target: enemy.id,
                                damage,
                            });
                            if enemy.take_damage(damage) {
                                out_events.push(Event::EnemyDefeated {
                                    enemy: enemy.id,
                                    cell: enemy.cell,
                                    cause: DefeatCause::Structure(structure.id),
                                });
                            }
                        }
                    }
                }
                Team::Enemy => {
                    if structure.spawn_timer >= tuning.enemy_spawn_cooldown() {
                        structure.spawn_timer = Duration::ZERO;
                        outcomes.push(StructureOutcome::SpawnEnemy {
                            structure: structure.id,
                            cell: structure.cell,
                        });
                    }

                    if attack_ready {
                        if structure.team.is_hostile_to(Team::Player)
                            && structure.in_range(player_cell, range)
                        {
                            out_events.push(Event::StructureAttacked {
                                structure: structure.id,
                                target: EntityId::PLAYER,
                                damage,
                            });
                            outcomes.push(StructureOutcome::StrikePlayer {
                                structure: structure.id,
                                damage,
                            });
                        }

                        for ally in roster
                            .allies
                            .iter_mut()
                            .filter(|ally| {
                                ally.alive
                                    && structure.team.is_hostile_to(ally.team)
                                    && structure.in_range(ally.cell, range)
                            })
                        {
                            out_events.push(Event::StructureAttacked {
                                structure: structure.id,
                                target: ally.id,
                                damage,
                            });
                            if ally.take_damage(damage) {
                                out_events.push(Event::AllyDefeated {
                                    ally: ally.id,
                                    cell: ally.cell,
                                });
                            }
                        }
                    }

                    if attack_ready || tuning.enemy_attack_timer_resets_every_tick {
                        structure.attack_timer = Duration::ZERO;
                    }
                }
            }
        }

        roster.allies.retain(|ally| ally.alive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Entity;
    use monkey_tribe_core::ResourceKind;

    fn tuning() -> StructureTuning {
        StructureTuning::default()
    }

    #[test]
    fn registry_starts_empty_with_zero_identifier() {
        let registry = StructureRegistry::new();
        assert!(registry.entries.is_empty());
        assert_eq!(registry.next_structure_id.get(), 0);
    }

    #[test]
    fn placement_with_exact_resources_empties_inventory() {
        let mut registry = StructureRegistry::new();
        let mut inventory = Inventory::with_amounts([(ResourceKind::Wood, 10)]);

        let placed = registry.place(
            StructureKind::Hut,
            CellCoord::new(3, 3),
            Team::Player,
            &mut inventory,
            &tuning(),
        );

        assert_eq!(placed, Ok(StructureId::new(0)));
        assert_eq!(inventory.get(ResourceKind::Wood), 0);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.snapshots()[0].health, 100);
    }

    #[test]
    fn placement_without_resources_changes_nothing() {
        let mut registry = StructureRegistry::new();
        let mut inventory = Inventory::with_amounts([(ResourceKind::Wood, 5)]);

        let placed = registry.place(
            StructureKind::Hut,
            CellCoord::new(3, 3),
            Team::Player,
            &mut inventory,
            &tuning(),
        );

        assert!(matches!(
            placed,
            Err(PlacementError::InsufficientResources { ref shortfalls }) if shortfalls.len() == 1
        ));
        assert_eq!(inventory.get(ResourceKind::Wood), 5);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn tower_needs_every_resource() {
        let mut registry = StructureRegistry::new();
        let mut inventory = Inventory::with_amounts([(ResourceKind::Wood, 30)]);

        assert!(registry
            .place(
                StructureKind::Tower,
                CellCoord::new(0, 0),
                Team::Player,
                &mut inventory,
                &tuning(),
            )
            .is_err());
        assert_eq!(inventory.get(ResourceKind::Wood), 30);
    }

    #[test]
    fn damage_removes_structure_at_zero_health() {
        let mut registry = StructureRegistry::new();
        let mut inventory = Inventory::with_amounts([(ResourceKind::Wood, 10)]);
        let id = registry
            .place(
                StructureKind::Hut,
                CellCoord::new(1, 1),
                Team::Enemy,
                &mut inventory,
                &tuning(),
            )
            .expect("hut is affordable");

        assert!(registry.take_damage(id, 60).is_none());
        let destroyed = registry.take_damage(id, 40).expect("hut is destroyed");
        assert_eq!(destroyed.kind, StructureKind::Hut);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn player_structures_spawn_allies_and_keep_attacking() {
        let mut registry = StructureRegistry::new();
        let mut inventory = Inventory::with_amounts([(ResourceKind::Wood, 10)]);
        let id = registry
            .place(
                StructureKind::Hut,
                CellCoord::new(5, 5),
                Team::Player,
                &mut inventory,
                &tuning(),
            )
            .expect("hut is affordable");
        let mut roster = Roster::new();
        let enemy = roster.add_enemy(Entity::new(
            EntityId::PLAYER,
            Team::Enemy,
            CellCoord::new(6, 6),
            100,
        ));
        let mut outcomes = Vec::new();
        let mut events = Vec::new();

        registry.tick(
            Duration::from_secs(10),
            &tuning(),
            &mut roster,
            CellCoord::new(0, 0),
            &mut outcomes,
            &mut events,
        );
        registry.tick(
            Duration::from_millis(16),
            &tuning(),
            &mut roster,
            CellCoord::new(0, 0),
            &mut outcomes,
            &mut events,
        );

        assert_eq!(
            outcomes,
            vec![StructureOutcome::SpawnAlly {
                structure: id,
                cell: CellCoord::new(5, 5),
            }]
        );
        let hits = events
            .iter()
            .filter(|event| matches!(event, Event::StructureAttacked { target, .. } if *target == enemy))
            .count();
        assert_eq!(hits, 2, "timer is never reset for player structures");
        assert_eq!(roster.enemies[0].health, 60);
    }

    #[test]
    fn enemy_structure_timer_resets_every_tick() {
        let mut registry = StructureRegistry::new();
        let mut inventory = Inventory::with_amounts([(ResourceKind::Wood, 10)]);
        let _ = registry
            .place(
                StructureKind::Hut,
                CellCoord::new(5, 5),
                Team::Enemy,
                &mut inventory,
                &tuning(),
            )
            .expect("hut is affordable");
        let mut roster = Roster::new();
        let mut outcomes = Vec::new();
        let mut events = Vec::new();

        for _ in 0..120 {
            registry.tick(
                Duration::from_millis(16),
                &tuning(),
                &mut roster,
                CellCoord::new(5, 5),
                &mut outcomes,
                &mut events,
            );
        }
        assert!(outcomes.is_empty(), "short ticks never reach the interval");

        registry.tick(
            Duration::from_secs(1),
            &tuning(),
            &mut roster,
            CellCoord::new(5, 6),
            &mut outcomes,
            &mut events,
        );
        assert_eq!(
            outcomes,
            vec![StructureOutcome::StrikePlayer {
                structure: StructureId::new(0),
                damage: 20,
            }]
        );
    }

    #[test]
    fn enemy_structures_destroy_allies_in_range() {
        let mut registry = StructureRegistry::new();
        let mut inventory = Inventory::with_amounts([(ResourceKind::Wood, 10)]);
        let _ = registry
            .place(
                StructureKind::Hut,
                CellCoord::new(5, 5),
                Team::Enemy,
                &mut inventory,
                &tuning(),
            )
            .expect("hut is affordable");
        let mut roster = Roster::new();
        let near = roster.add_ally(Entity::new(
            EntityId::PLAYER,
            Team::Ally,
            CellCoord::new(5, 7),
            20,
        ));
        let _far = roster.add_ally(Entity::new(
            EntityId::PLAYER,
            Team::Ally,
            CellCoord::new(7, 7),
            20,
        ));
        let mut outcomes = Vec::new();
        let mut events = Vec::new();

        registry.tick(
            Duration::from_secs(1),
            &tuning(),
            &mut roster,
            CellCoord::new(40, 40),
            &mut outcomes,
            &mut events,
        );

        assert_eq!(roster.allies.len(), 1);
        assert!(events.contains(&Event::AllyDefeated {
            ally: near,
            cell: CellCoord::new(5, 7),
        }));
    }

    #[test]
    fn player_structures_only_attack_hostile_teams() {
        let mut registry = StructureRegistry::new();
        let mut inventory = Inventory::with_amounts([(ResourceKind::Wood, 10)]);
        let _ = registry
            .place(
                StructureKind::Hut,
                CellCoord::new(5, 5),
                Team::Player,
                &mut inventory,
                &tuning(),
            )
            .expect("hut is affordable");
        let mut roster = Roster::new();
        let ally = roster.add_ally(Entity::new(
            EntityId::PLAYER,
            Team::Ally,
            CellCoord::new(5, 6),
            20,
        ));
        let enemy = roster.add_enemy(Entity::new(
            EntityId::PLAYER,
            Team::Enemy,
            CellCoord::new(6, 5),
            100,
        ));
        let mut outcomes = Vec::new();
        let mut events = Vec::new();

        registry.tick(
            Duration::from_secs(1),
            &tuning(),
            &mut roster,
            CellCoord::new(5, 5),
            &mut outcomes,
            &mut events,
        );

        let targets: Vec<EntityId> = events
            .iter()
            .filter_map(|event| match event {
                Event::StructureAttacked { target, .. } => Some(*target),
                _ => None,
            })
            .collect();
        assert_eq!(targets, vec![enemy]);
        assert!(outcomes.is_empty());
        assert_eq!(roster.allies.len(), 1);
        assert_eq!(roster.allies[0].id, ally);
        assert_eq!(roster.allies[0].health, 20);
    }
}
