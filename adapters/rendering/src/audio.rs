use anyhow::Result as AnyResult;

/// Track looped while the game screen is shown.
pub const BACKGROUND_MUSIC: &str = "assets/audio/background_music.wav";

/// Playback volume, always within `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Volume(f32);

impl Volume {
    /// Volume used until the player changes it.
    pub const DEFAULT: Volume = Volume(0.5);

    /// Creates a volume, clamping into range. Non-finite input mutes.
    #[must_use]
    pub fn new(level: f32) -> Self {
        if level.is_finite() {
            Self(level.clamp(0.0, 1.0))
        } else {
            Self(0.0)
        }
    }

    /// Level in the range `0.0..=1.0`.
    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Sound playback collaborator: one background track plus named one-shot effects.
pub trait AudioService {
    /// Loads the background track, replacing any previous one.
    fn load_background_music(&mut self, path: &str) -> AnyResult<()>;

    /// Loads a one-shot effect under `name`.
    fn load_sound_effect(&mut self, name: &str, path: &str) -> AnyResult<()>;

    /// Starts looping the background track if one is loaded.
    fn play_background_music(&mut self);

    /// Pauses the background track.
    fn stop_background_music(&mut self);

    /// Plays a loaded effect. Unknown names are ignored.
    fn play_sound_effect(&mut self, name: &str);

    /// Applies the volume to the track and to later effects.
    fn set_volume(&mut self, volume: Volume);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_is_clamped_into_range() {
        assert_eq!(Volume::new(1.7).get(), 1.0);
        assert_eq!(Volume::new(-0.2).get(), 0.0);
        assert_eq!(Volume::new(0.25).get(), 0.25);
        assert_eq!(Volume::new(f32::NAN).get(), 0.0);
        assert_eq!(Volume::default().get(), 0.5);
    }
}
