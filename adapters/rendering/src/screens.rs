use monkey_tribe_system_controls::ScreenRequest;

use crate::audio::{AudioService, Volume, BACKGROUND_MUSIC};
use anyhow::Result as AnyResult;

/// Screen currently shown by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Title with play and settings buttons.
    Title,
    /// The running game.
    Game,
    /// Volume settings, opened from the title or the game.
    Settings,
    /// Final score after the player was defeated.
    Defeat {
        /// Final score.
        score: u32,
        /// Enemies defeated during the session.
        enemies_defeated: u32,
    },
}

/// Screen state machine: Title → Game ⇄ Settings, Game → Defeat → Game.
#[derive(Debug)]
pub struct ScreenFlow {
    screen: Screen,
    settings_return: Screen,
    volume: Volume,
}

impl Default for ScreenFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenFlow {
    /// Starts on the title screen at the default volume.
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Screen::Title,
            settings_return: Screen::Title,
            volume: Volume::DEFAULT,
        }
    }

    /// Screen being shown.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Reports whether the world should be ticked this frame.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.screen == Screen::Game
    }

    /// Volume chosen on the settings screen.
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Leaves the title or defeat screen for a game and starts the music.
    ///
    /// Returns `false` when no game can be started from the current screen.
    pub fn play<A>(&mut self, audio: &mut A) -> AnyResult<bool>
    where
        A: AudioService,
    {
        if !matches!(self.screen, Screen::Title | Screen::Defeat { .. }) {
            return Ok(false);
        }
        audio.load_background_music(BACKGROUND_MUSIC)?;
        audio.set_volume(self.volume);
        audio.play_background_music();
        self.screen = Screen::Game;
        Ok(true)
    }

    /// Opens the settings screen from the title or the game.
    pub fn open_settings(&mut self) -> bool {
        match self.screen {
            Screen::Title | Screen::Game => {
                self.settings_return = self.screen;
                self.screen = Screen::Settings;
                true
            }
            Screen::Settings | Screen::Defeat { .. } => false,
        }
    }

    /// Closes the settings screen, returning to where it was opened from.
    pub fn back(&mut self) -> bool {
        if self.screen != Screen::Settings {
            return false;
        }
        self.screen = self.settings_return;
        true
    }

    /// Stores the volume and forwards it to the audio service.
    pub fn set_volume<A>(&mut self, volume: Volume, audio: &mut A)
    where
        A: AudioService,
    {
        self.volume = volume;
        audio.set_volume(volume);
    }

    /// Applies a request raised by the controls system.
    pub fn request<A>(&mut self, request: ScreenRequest, audio: &mut A) -> bool
    where
        A: AudioService,
    {
        match request {
            ScreenRequest::OpenSettings => self.screen == Screen::Game && self.open_settings(),
            ScreenRequest::ShowDefeat {
                score,
                enemies_defeated,
            } => {
                if matches!(self.screen, Screen::Defeat { .. }) {
                    return false;
                }
                audio.stop_background_music();
                self.screen = Screen::Defeat {
                    score,
                    enemies_defeated,
                };
                true
            }
        }
    }
}
