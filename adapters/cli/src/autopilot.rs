use monkey_tribe_system_controls::Key;
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Frames between two simulated key presses.
const PRESS_INTERVAL: u64 = 6;

/// Keys the autopilot mashes, repeated to weight movement and attacks.
const KEYS: [Key; 20] = [
    Key::Up,
    Key::Up,
    Key::Down,
    Key::Down,
    Key::Left,
    Key::Left,
    Key::Right,
    Key::Right,
    Key::Space,
    Key::Space,
    Key::Letter('f'),
    Key::Letter('f'),
    Key::Letter('h'),
    Key::Letter('t'),
    Key::Letter('c'),
    Key::Letter('u'),
    Key::Letter('i'),
    Key::Letter('o'),
    Key::Letter('p'),
    Key::SettingsButton,
];

/// Scripted input source standing in for a keyboard.
#[derive(Debug)]
pub(crate) struct Autopilot {
    rng: Option<ChaCha8Rng>,
    frame: u64,
}

impl Autopilot {
    /// Autopilot that never presses anything.
    pub(crate) fn idle() -> Self {
        Self {
            rng: None,
            frame: 0,
        }
    }

    /// Autopilot pressing one random key every few frames.
    ///
    /// The stream is derived from, but distinct from, the world seed.
    pub(crate) fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(ChaCha8Rng::seed_from_u64(seed ^ 0x6d6f_6e6b_6579)),
            frame: 0,
        }
    }

    /// Keys pressed during the next frame.
    pub(crate) fn next_keys(&mut self) -> Vec<Key> {
        let frame = self.frame;
        self.frame = self.frame.saturating_add(1);

        let Some(rng) = self.rng.as_mut() else {
            return Vec::new();
        };
        if frame % PRESS_INTERVAL != 0 {
            return Vec::new();
        }
        KEYS.choose(rng).copied().into_iter().collect()
    }
}
