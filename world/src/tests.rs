use super::*;
use monkey_tribe_core::{Direction, PlacementError, PurchaseError, Shortfall};
use proptest::prelude::*;

fn quiet_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.population.resource_tokens = 0;
    config.population.enemies = 0;
    config.world_events.cooldown_secs = 10_000.0;
    config
}

fn quiet_world() -> World {
    World::new(quiet_config())
}

fn step(world: &mut World, dt: Duration) -> Vec<Event> {
    let mut events = Vec::new();
    apply(world, Command::Tick { dt }, &mut events);
    events
}

fn issue(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    apply(world, command, &mut events);
    events
}

fn park_enemies(world: &mut World, cell: CellCoord) {
    for enemy in world.roster.enemies.iter_mut() {
        enemy.cell = cell;
    }
}

#[test]
fn generation_populates_default_world() {
    let mut events = Vec::new();
    let world = World::generate(GameConfig::default(), &mut events);

    assert_eq!(query::player(&world).cell, CellCoord::new(25, 25));
    assert_eq!(query::token_count(&world), 133);
    assert_eq!(query::token_count_of(&world, ResourceKind::Currency), 33);
    assert_eq!(query::enemies(&world).len(), 10);
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(
                event,
                Event::EnemySpawned {
                    origin: SpawnOrigin::WorldGeneration,
                    ..
                }
            ))
            .count(),
        10
    );
    assert_eq!(query::welcome_banner(&world), "Welcome to Monkey Tribe Wars.");
}

#[test]
fn hut_placement_spends_exact_wood() {
    let mut world = quiet_world();
    world.inventory = Inventory::with_amounts([(ResourceKind::Wood, 10)]);

    let events = issue(
        &mut world,
        Command::PlaceStructure {
            kind: StructureKind::Hut,
        },
    );

    assert!(matches!(
        events.as_slice(),
        [Event::StructurePlaced {
            kind: StructureKind::Hut,
            team: Team::Player,
            ..
        }]
    ));
    assert_eq!(query::inventory(&world).get(ResourceKind::Wood), 0);
    assert_eq!(query::structures(&world).len(), 1);
    assert_eq!(query::structures(&world)[0].cell, CellCoord::new(25, 25));
}

#[test]
fn hut_placement_without_enough_wood_is_rejected() {
    let mut world = quiet_world();
    world.inventory = Inventory::with_amounts([(ResourceKind::Wood, 5)]);

    let events = issue(
        &mut world,
        Command::PlaceStructure {
            kind: StructureKind::Hut,
        },
    );

    assert_eq!(
        events,
        vec![Event::StructurePlacementRejected {
            kind: StructureKind::Hut,
            team: Team::Player,
            cell: CellCoord::new(25, 25),
            reason: PlacementError::InsufficientResources {
                shortfalls: vec![Shortfall {
                    kind: ResourceKind::Wood,
                    required: 10,
                    available: 5,
                }],
            },
        }]
    );
    assert_eq!(query::inventory(&world).get(ResourceKind::Wood), 5);
    assert!(query::structures(&world).is_empty());
}

#[test]
fn projectile_kill_keeps_enemy_population() {
    let mut config = quiet_config();
    config.population.enemies = 10;
    let mut world = World::new(config);
    park_enemies(&mut world, CellCoord::new(0, 0));
    world.roster.enemies[0].cell = CellCoord::new(27, 25);
    let target = world.roster.enemies[0].id;

    let _ = issue(&mut world, Command::ThrowProjectile);
    let mut events = Vec::new();
    for _ in 0..3 {
        events.extend(step(&mut world, Duration::from_millis(100)));
    }

    assert!(events.contains(&Event::EnemyDefeated {
        enemy: target,
        cell: CellCoord::new(27, 25),
        cause: DefeatCause::Projectile,
    }));
    assert_eq!(query::enemies(&world).len(), 10);
    assert!(query::enemies(&world).iter().all(|enemy| enemy.id != target));
    assert_eq!(query::score(&world), 5);
    assert_eq!(query::enemies_defeated(&world), 1);
    assert!(query::projectiles(&world).is_empty());
}

#[test]
fn strike_defeats_adjacent_enemies_only() {
    let mut config = quiet_config();
    config.population.enemies = 3;
    let mut world = World::new(config);
    world.roster.enemies[0].cell = CellCoord::new(24, 26);
    world.roster.enemies[1].cell = CellCoord::new(26, 25);
    world.roster.enemies[2].cell = CellCoord::new(27, 25);
    let distant = world.roster.enemies[2].id;

    let events = issue(&mut world, Command::Strike);

    let defeated = events
        .iter()
        .filter(|event| {
            matches!(
                event,
                Event::EnemyDefeated {
                    cause: DefeatCause::Strike,
                    ..
                }
            )
        })
        .count();
    assert_eq!(defeated, 2);
    assert_eq!(query::enemies(&world).len(), 3);
    assert!(query::enemies(&world).iter().any(|enemy| enemy.id == distant));
    assert_eq!(query::score(&world), 10);
}

#[test]
fn food_at_full_health_stays_on_the_ground() {
    let mut world = quiet_world();
    let cell = query::player(&world).cell;
    world.field.place(ResourceKind::Food, cell);

    let events = step(&mut world, Duration::from_millis(16));

    assert!(events.contains(&Event::FoodDeclined { cell }));
    assert_eq!(query::token_count(&world), 1);
    assert_eq!(query::inventory(&world).get(ResourceKind::Food), 0);

    world.player.body.health = 50;
    let events = step(&mut world, Duration::from_millis(16));

    assert!(events.contains(&Event::PlayerHealed {
        amount: 10,
        health: 60,
    }));
    assert_eq!(query::token_count(&world), 1);
    assert_eq!(query::inventory(&world).get(ResourceKind::Food), 1);
    assert_eq!(query::flash(&world), Some(FlashKind::Heal));
}

#[test]
fn currency_is_consumed_without_replacement() {
    let mut world = quiet_world();
    let cell = query::player(&world).cell;
    world.field.place(ResourceKind::Currency, cell);
    world.field.place(ResourceKind::Currency, cell);
    world.field.place(ResourceKind::Wood, cell);

    let _ = step(&mut world, Duration::from_millis(16));

    assert_eq!(query::score(&world), 2);
    assert_eq!(query::token_count_of(&world, ResourceKind::Currency), 0);
    assert_eq!(query::token_count(&world), 1, "wood is replaced");
    assert_eq!(query::inventory(&world).get(ResourceKind::Wood), 1);
}

#[test]
fn invulnerability_window_spaces_out_contact_damage() {
    let mut config = quiet_config();
    config.population.enemies = 1;
    config.enemy.move_interval_secs = 1_000.0;
    let mut world = World::new(config);
    let player_cell = query::player(&world).cell;
    park_enemies(&mut world, player_cell);

    let mut damage_ticks = Vec::new();
    for tick in 1..=7 {
        let events = step(&mut world, Duration::from_millis(250));
        if events
            .iter()
            .any(|event| matches!(event, Event::PlayerDamaged { .. }))
        {
            damage_ticks.push(tick);
        }
    }

    assert_eq!(damage_ticks, vec![1, 7]);
    assert_eq!(query::player(&world).health, 80);
}

#[test]
fn defeat_is_reported_once_and_freezes_the_world() {
    let mut world = quiet_world();
    world.player.body.health = 0;

    let events = step(&mut world, Duration::from_millis(16));
    assert!(events.contains(&Event::PlayerDefeated {
        score: 0,
        enemies_defeated: 0,
    }));
    assert!(query::is_defeated(&world));

    assert!(step(&mut world, Duration::from_millis(16)).is_empty());
    assert!(issue(
        &mut world,
        Command::MovePlayer {
            direction: Direction::North,
        },
    )
    .is_empty());
    assert_eq!(query::player(&world).cell, CellCoord::new(25, 25));
}

#[test]
fn recruiting_costs_score() {
    let mut world = quiet_world();
    world.score = 19;

    assert_eq!(
        issue(&mut world, Command::RecruitAlly),
        vec![Event::AllyRecruitRejected {
            reason: RecruitError::InsufficientScore {
                required: 20,
                available: 19,
            },
        }]
    );

    world.score = 25;
    let events = issue(&mut world, Command::RecruitAlly);

    assert!(matches!(
        events.as_slice(),
        [Event::AllySpawned {
            origin: SpawnOrigin::Recruited,
            ..
        }]
    ));
    assert_eq!(query::score(&world), 5);
    assert_eq!(query::allies(&world)[0].cell, CellCoord::new(25, 25));
}

#[test]
fn upgrades_are_paid_from_score() {
    let mut world = quiet_world();
    world.score = 12;

    let events = issue(
        &mut world,
        Command::PurchaseUpgrade {
            upgrade: UpgradeKind::PlayerSpeed,
        },
    );
    assert_eq!(
        events,
        vec![Event::UpgradePurchased {
            upgrade: UpgradeKind::PlayerSpeed,
            level: 1,
            next_cost: 15,
            remaining: 2,
        }]
    );

    let events = issue(
        &mut world,
        Command::PurchaseUpgrade {
            upgrade: UpgradeKind::PlayerSpeed,
        },
    );
    assert_eq!(
        events,
        vec![Event::UpgradePurchaseRejected {
            reason: PurchaseError::InsufficientCurrency {
                upgrade: UpgradeKind::PlayerSpeed,
                required: 15,
                available: 2,
            },
        }]
    );

    let _ = step(&mut world, Duration::from_millis(16));
    assert!((query::player_stats(&world).speed - 1.2).abs() < 1e-6);
}

#[test]
fn purchase_by_name_rejects_unknown_names_without_mutation() {
    let mut world = quiet_world();
    world.score = 40;
    let mut events = Vec::new();

    assert!(!purchase_by_name(&mut world, "laser_eyes", &mut events));
    assert_eq!(
        events,
        vec![Event::UpgradePurchaseRejected {
            reason: PurchaseError::UnknownUpgrade {
                name: "laser_eyes".to_owned(),
            },
        }]
    );
    assert_eq!(query::score(&world), 40);

    events.clear();
    assert!(purchase_by_name(&mut world, "ai_combat_strength", &mut events));
    assert_eq!(query::score(&world), 20);
    assert_eq!(query::upgrade_level(&world, UpgradeKind::AiCombatStrength), 1);
    assert_eq!(query::upgrade_cost(&world, UpgradeKind::AiCombatStrength), 30);
    assert_eq!(events.len(), 1);

    events.clear();
    assert!(!purchase_by_name(&mut world, "ai_combat_strength", &mut events));
    assert!(matches!(
        events.as_slice(),
        [Event::UpgradePurchaseRejected {
            reason: PurchaseError::InsufficientCurrency { required: 30, available: 20, .. },
        }]
    ));
    assert_eq!(query::score(&world), 20);
}

#[test]
fn enemy_on_player_cell_harvests_and_builds() {
    let mut config = quiet_config();
    config.grid.columns = 1;
    config.grid.rows = 1;
    config.population.enemies = 1;
    let mut world = World::new(config);
    for _ in 0..10 {
        world.field.place(ResourceKind::Wood, CellCoord::new(0, 0));
    }

    let events = step(&mut world, Duration::from_millis(500));

    let enemy = world.roster.enemies[0].id;
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(
                event,
                Event::ResourceCollected {
                    collector: Collector::Enemy(id),
                    ..
                } if *id == enemy
            ))
            .count(),
        10
    );
    assert!(events.iter().any(|event| matches!(
        event,
        Event::StructurePlaced {
            team: Team::Enemy,
            kind: StructureKind::Hut,
            ..
        }
    )));
    assert_eq!(world.roster.enemies[0].inventory.get(ResourceKind::Wood), 0);
}

#[test]
fn ally_builds_player_hut_from_shared_wood() {
    let mut config = quiet_config();
    config.grid.columns = 1;
    config.grid.rows = 1;
    let mut world = World::new(config);
    world.score = 20;
    let _ = issue(&mut world, Command::RecruitAlly);
    world.inventory = Inventory::with_amounts([(ResourceKind::Wood, 10)]);

    let events = step(&mut world, Duration::from_millis(500));

    assert!(events.iter().any(|event| matches!(
        event,
        Event::StructurePlaced {
            team: Team::Player,
            kind: StructureKind::Hut,
            ..
        }
    )));
    assert_eq!(query::inventory(&world).get(ResourceKind::Wood), 0);
}

#[test]
fn ally_defeats_neighbouring_enemy_which_is_swept_and_replaced() {
    let mut config = quiet_config();
    config.grid.columns = 1;
    config.grid.rows = 1;
    config.population.enemies = 1;
    config.enemy.move_interval_secs = 1_000.0;
    let mut world = World::new(config);
    world.score = 20;
    let _ = issue(&mut world, Command::RecruitAlly);
    let original = world.roster.enemies[0].id;

    let events = step(&mut world, Duration::from_millis(500));

    assert!(events.iter().any(|event| matches!(
        event,
        Event::EnemyDefeated {
            cause: DefeatCause::Ally(_),
            ..
        }
    )));
    assert_eq!(query::enemies(&world).len(), 1);
    assert_ne!(query::enemies(&world)[0].id, original);
    assert_eq!(query::enemies_defeated(&world), 0);
}

#[test]
fn player_hut_produces_an_ally_after_its_cooldown() {
    let mut world = quiet_world();
    world.inventory = Inventory::with_amounts([(ResourceKind::Wood, 10)]);
    let _ = issue(
        &mut world,
        Command::PlaceStructure {
            kind: StructureKind::Hut,
        },
    );

    let events = step(&mut world, Duration::from_secs(10));

    assert!(events.iter().any(|event| matches!(
        event,
        Event::AllySpawned {
            origin: SpawnOrigin::Structure(_),
            ..
        }
    )));
    assert_eq!(query::allies(&world).len(), 1);
}

#[test]
fn world_events_are_exclusive_and_respect_the_cooldown() {
    let mut config = quiet_config();
    config.world_events.cooldown_secs = 30.0;
    config.world_events.meteor_hit_chance = 0.0;
    let mut world = World::new(config);

    let mut active: Option<WorldEventKind> = None;
    let mut last_end = 0u32;
    for tick in 1..=300u32 {
        for event in step(&mut world, Duration::from_secs(1)) {
            match event {
                Event::WorldEventStarted { kind } => {
                    assert!(active.is_none(), "two events active at tick {tick}");
                    assert!(tick - last_end >= 30, "cooldown skipped at tick {tick}");
                    active = Some(kind);
                }
                Event::WorldEventEnded { kind } => {
                    assert_eq!(active, Some(kind));
                    active = None;
                    last_end = tick;
                }
                _ => {}
            }
        }
        assert_eq!(query::active_event(&world), active);
    }
    assert!(last_end > 0, "at least one event completed");
}

#[test]
fn diamond_rain_grows_the_field() {
    let mut world = quiet_world();
    let before = query::token_count(&world);
    let mut events = Vec::new();

    world.apply_world_event(WorldEventKind::DiamondRain, &mut events);

    assert_eq!(query::token_count(&world), before + 5);
    assert_eq!(query::token_count_of(&world, ResourceKind::Currency), 5);
}

#[test]
fn meteor_shower_damages_structures() {
    let mut world = quiet_world();
    world.config.world_events.meteor_hit_chance = 0.0;
    world.inventory = Inventory::with_amounts([(ResourceKind::Wood, 10)]);
    let _ = issue(
        &mut world,
        Command::PlaceStructure {
            kind: StructureKind::Hut,
        },
    );
    let mut events = Vec::new();

    for _ in 0..5 {
        world.apply_world_event(WorldEventKind::MeteorShower, &mut events);
    }

    assert!(query::structures(&world).is_empty());
    assert!(events.iter().any(|event| matches!(
        event,
        Event::StructureDestroyed {
            kind: StructureKind::Hut,
            ..
        }
    )));
    assert_eq!(query::player(&world).health, 100);
}

#[test]
fn meteor_hits_reach_the_player_and_defeat_enemies() {
    let mut config = quiet_config();
    config.population.enemies = 1;
    config.enemy.move_interval_secs = 1_000.0;
    config.world_events.meteor_hit_chance = 1.0;
    let mut world = World::new(config);
    park_enemies(&mut world, CellCoord::new(0, 0));
    world.roster.enemies[0].health = 10;
    let struck = world.roster.enemies[0].id;
    let mut events = Vec::new();

    world.apply_world_event(WorldEventKind::MeteorShower, &mut events);

    assert!(events.contains(&Event::PlayerDamaged {
        amount: 10,
        health: 90,
        source: DamageSource::Meteor,
    }));
    assert!(events.contains(&Event::EnemyDefeated {
        enemy: struck,
        cell: CellCoord::new(0, 0),
        cause: DefeatCause::Meteor,
    }));
    assert_eq!(query::flash(&world), Some(FlashKind::Hit));

    let listed = query::enemies(&world);
    assert_eq!(listed.len(), 1, "fallen enemies stay listed until the next sweep");
    assert_eq!(listed[0].id, struck);
    assert!(!listed[0].alive);

    let _ = step(&mut world, Duration::from_millis(16));

    let listed = query::enemies(&world);
    assert_eq!(listed.len(), 1);
    assert_ne!(listed[0].id, struck);
    assert!(listed[0].alive);
    assert_eq!(query::enemies_defeated(&world), 0);
}

fn lies_food(world: &World) -> bool {
    query::tokens(world).iter().any(|token| token.kind == ResourceKind::Food)
}

#[test]
fn resource_shortage_narrows_spawns_and_rerolls_the_field() {
    let mut config = quiet_config();
    config.world_events.cooldown_secs = 1.0;
    config.world_events.meteor_hit_chance = 0.0;
    let mut world = World::new(config);

    let started = (0..2_000).any(|_| {
        step(&mut world, Duration::from_secs(1)).contains(&Event::WorldEventStarted {
            kind: WorldEventKind::ResourceShortage,
        })
    });
    assert!(started, "a shortage eventually starts");

    for _ in 0..30 {
        world.field.spawn_random(&mut world.rng, world.grid);
    }
    assert!(!lies_food(&world), "spawns are narrowed to wood and stone");

    world.field.place(ResourceKind::Food, CellCoord::new(0, 0));
    let events = step(&mut world, Duration::from_secs(1));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::WorldEventEnded { .. })));
    assert_eq!(query::active_event(&world), Some(WorldEventKind::ResourceShortage));
    assert!(!lies_food(&world), "active shortage rerolls every token");

    let ended = (0..20).any(|_| {
        step(&mut world, Duration::from_secs(1)).contains(&Event::WorldEventEnded {
            kind: WorldEventKind::ResourceShortage,
        })
    });
    assert!(ended, "the shortage runs its duration");

    for _ in 0..60 {
        world.field.spawn_random(&mut world.rng, world.grid);
    }
    assert!(lies_food(&world), "food spawns again once the shortage ends");
}

#[test]
fn monkey_raid_boost_is_reverted_exactly() {
    let mut config = quiet_config();
    config.population.enemies = 3;
    config.enemy.move_interval_secs = 1_000_000.0;
    config.world_events.cooldown_secs = 1.0;
    config.world_events.meteor_hit_chance = 0.0;
    let mut world = World::new(config);
    park_enemies(&mut world, CellCoord::new(0, 0));

    let mut raid_seen = false;
    for _ in 0..2_000 {
        for event in step(&mut world, Duration::from_secs(1)) {
            match event {
                Event::WorldEventStarted {
                    kind: WorldEventKind::MonkeyRaid,
                } => {
                    raid_seen = true;
                    for enemy in query::enemies(&world) {
                        assert_eq!(query::enemy_attack_power(&world, enemy.id), Some(15));
                    }
                }
                Event::WorldEventEnded {
                    kind: WorldEventKind::MonkeyRaid,
                } => {
                    for enemy in query::enemies(&world) {
                        assert_eq!(query::enemy_attack_power(&world, enemy.id), Some(10));
                    }
                }
                _ => {}
            }
        }
        if raid_seen && query::active_event(&world).is_none() {
            break;
        }
    }

    assert!(raid_seen);
}

#[test]
fn flash_fades_after_its_duration() {
    let mut world = quiet_world();
    world.flash(FlashKind::Hit);

    let _ = step(&mut world, Duration::from_millis(200));
    assert_eq!(query::flash(&world), Some(FlashKind::Hit));

    let _ = step(&mut world, Duration::from_millis(100));
    assert_eq!(query::flash(&world), None);
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

proptest! {
    #[test]
    fn player_never_leaves_the_grid(
        moves in prop::collection::vec(direction_strategy(), 0..80),
    ) {
        let mut config = quiet_config();
        config.grid.columns = 5;
        config.grid.rows = 4;
        let mut world = World::new(config);

        for direction in moves {
            let _ = issue(&mut world, Command::MovePlayer { direction });
            prop_assert!(query::grid(&world).contains(query::player(&world).cell));
            prop_assert_eq!(query::player_stats(&world).facing, direction);
        }
    }

    #[test]
    fn placement_is_all_or_nothing(
        wood in 0u32..30,
        stone in 0u32..30,
        tower in any::<bool>(),
    ) {
        let mut world = quiet_world();
        world.inventory = Inventory::with_amounts([
            (ResourceKind::Wood, wood),
            (ResourceKind::Stone, stone),
        ]);
        let kind = if tower { StructureKind::Tower } else { StructureKind::Hut };
        let affordable = wood >= 10 && (!tower || stone >= 10);

        let events = issue(&mut world, Command::PlaceStructure { kind });

        let inventory = query::inventory(&world);
        if affordable {
            prop_assert!(
                matches!(events.as_slice(), [Event::StructurePlaced { .. }]),
                "affordable placement should succeed, got {:?}",
                events
            );
            prop_assert_eq!(inventory.get(ResourceKind::Wood), wood - 10);
            prop_assert_eq!(
                inventory.get(ResourceKind::Stone),
                if tower { stone - 10 } else { stone }
            );
        } else {
            prop_assert!(
                matches!(events.as_slice(), [Event::StructurePlacementRejected { .. }]),
                "unaffordable placement should be rejected, got {:?}",
                events
            );
            prop_assert_eq!(inventory.get(ResourceKind::Wood), wood);
            prop_assert_eq!(inventory.get(ResourceKind::Stone), stone);
            prop_assert!(query::structures(&world).is_empty());
        }
    }
}
