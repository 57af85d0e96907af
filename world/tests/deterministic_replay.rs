use std::time::Duration;

use monkey_tribe_core::{Command, Direction, Event, GameConfig, StructureKind, UpgradeKind};
use monkey_tribe_world::{self as world, query, World};

#[test]
fn identical_seed_and_commands_replay_identically() {
    let first = replay(41, scripted_commands());
    let second = replay(41, scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert!(first.events.len() > scripted_commands().len());
}

#[test]
fn different_seeds_produce_different_worlds() {
    let first = replay(1, scripted_commands());
    let second = replay(2, scripted_commands());

    assert_ne!(first.enemies, second.enemies);
}

fn replay(seed: u64, commands: Vec<Command>) -> ReplayOutcome {
    let config = GameConfig {
        seed,
        ..GameConfig::default()
    };
    let mut events = Vec::new();
    let mut world = World::generate(config, &mut events);

    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    ReplayOutcome {
        events,
        enemies: query::enemies(&world)
            .into_iter()
            .map(|enemy| (enemy.id.get(), enemy.cell.column(), enemy.cell.row()))
            .collect(),
        score: query::score(&world),
        tokens: query::token_count(&world),
    }
}

fn scripted_commands() -> Vec<Command> {
    let mut commands = Vec::new();
    for frame in 0..3_600u32 {
        match frame % 120 {
            0 => commands.push(Command::MovePlayer {
                direction: Direction::ALL[(frame / 120) as usize % Direction::ALL.len()],
            }),
            30 => commands.push(Command::ThrowProjectile),
            60 => commands.push(Command::Strike),
            90 => commands.push(Command::PlaceStructure {
                kind: StructureKind::Hut,
            }),
            100 => commands.push(Command::PurchaseUpgrade {
                upgrade: UpgradeKind::PlayerSpeed,
            }),
            110 => commands.push(Command::RecruitAlly),
            _ => {}
        }
        commands.push(Command::Tick {
            dt: Duration::from_millis(16),
        });
    }
    commands
}

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    events: Vec<Event>,
    enemies: Vec<(u32, u32, u32)>,
    score: u32,
    tokens: usize,
}
