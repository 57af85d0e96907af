#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure controls system translating discrete player actions into world commands.

use monkey_tribe_core::{Command, Direction, Event, StructureKind, UpgradeKind};

/// Discrete action the player can trigger during a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlAction {
    /// Step one cell and face the direction.
    Move(Direction),
    /// Throw a projectile along the facing direction.
    Throw,
    /// Hit every adjacent enemy.
    Strike,
    /// Build a hut at the player's cell.
    BuildHut,
    /// Build a tower at the player's cell.
    BuildTower,
    /// Spend score on a new ally.
    RecruitAlly,
    /// Buy the next level of an upgrade.
    Upgrade(UpgradeKind),
    /// Leave the game for the settings screen.
    OpenSettings,
}

/// Physical key or button reported by an input adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Space bar.
    Space,
    /// Letter key, compared case-insensitively.
    Letter(char),
    /// On-screen gear button.
    SettingsButton,
}

impl ControlAction {
    /// Resolves the default key binding, if the key is bound at all.
    #[must_use]
    pub fn for_key(key: Key) -> Option<Self> {
        let action = match key {
            Key::Up => Self::Move(Direction::North),
            Key::Down => Self::Move(Direction::South),
            Key::Left => Self::Move(Direction::West),
            Key::Right => Self::Move(Direction::East),
            Key::Space => Self::Throw,
            Key::SettingsButton => Self::OpenSettings,
            Key::Letter(letter) => match letter.to_ascii_lowercase() {
                'f' => Self::Strike,
                'h' => Self::BuildHut,
                't' => Self::BuildTower,
                'c' => Self::RecruitAlly,
                'u' => Self::Upgrade(UpgradeKind::PlayerSpeed),
                'i' => Self::Upgrade(UpgradeKind::AiCombatStrength),
                'o' => Self::Upgrade(UpgradeKind::StructureHealth),
                'p' => Self::Upgrade(UpgradeKind::ResourceEfficiency),
                _ => return None,
            },
        };
        Some(action)
    }
}

/// Request for the presentation layer to switch screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenRequest {
    /// Show the settings screen on top of the game.
    OpenSettings,
    /// Replace the game with the defeat screen.
    ShowDefeat {
        /// Final score.
        score: u32,
        /// Enemies defeated during the session.
        enemies_defeated: u32,
    },
}

/// Controls system that turns actions into commands until the player is defeated.
#[derive(Debug, Default, Clone)]
pub struct Controls {
    defeated: bool,
}

impl Controls {
    /// Creates a new controls system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self { defeated: false }
    }

    /// Consumes world events and frame actions to emit commands and screen requests.
    pub fn handle(
        &mut self,
        events: &[Event],
        actions: &[ControlAction],
        out: &mut Vec<Command>,
        screens: &mut Vec<ScreenRequest>,
    ) {
        for event in events {
            if let Event::PlayerDefeated {
                score,
                enemies_defeated,
            } = event
            {
                self.defeated = true;
                screens.push(ScreenRequest::ShowDefeat {
                    score: *score,
                    enemies_defeated: *enemies_defeated,
                });
            }
        }

        if self.defeated {
            return;
        }

        for action in actions {
            let command = match *action {
                ControlAction::Move(direction) => Command::MovePlayer { direction },
                ControlAction::Throw => Command::ThrowProjectile,
                ControlAction::Strike => Command::Strike,
                ControlAction::BuildHut => Command::PlaceStructure {
                    kind: StructureKind::Hut,
                },
                ControlAction::BuildTower => Command::PlaceStructure {
                    kind: StructureKind::Tower,
                },
                ControlAction::RecruitAlly => Command::RecruitAlly,
                ControlAction::Upgrade(upgrade) => Command::PurchaseUpgrade { upgrade },
                ControlAction::OpenSettings => {
                    screens.push(ScreenRequest::OpenSettings);
                    continue;
                }
            };
            out.push(command);
        }
    }
}
