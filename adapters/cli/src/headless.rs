use std::{collections::BTreeMap, time::Duration};

use anyhow::Result as AnyResult;
use monkey_tribe_rendering::{
    AudioService, FrameInput, Presentation, RenderingBackend, Scene, Volume,
};
use tracing::{debug, info};

use crate::autopilot::Autopilot;

/// Backend that advances frames at a fixed rate without opening a window.
#[derive(Debug)]
pub(crate) struct HeadlessBackend {
    frames: u64,
    frame_time: Duration,
    autopilot: Autopilot,
}

impl HeadlessBackend {
    /// Creates a backend running `frames` frames at `fps` frames per second.
    pub(crate) fn new(frames: u64, fps: u32, autopilot: Autopilot) -> Self {
        Self {
            frames,
            frame_time: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            autopilot,
        }
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        info!(title = %presentation.window_title, frames = self.frames, "headless backend running");
        let mut scene = presentation.scene;

        for _ in 0..self.frames {
            let input = FrameInput {
                keys: self.autopilot.next_keys(),
            };
            update_scene(self.frame_time, input, &mut scene);
        }

        debug!(
            sprites = scene.sprites.len(),
            camera = ?scene.camera.center,
            hud = ?scene.hud.lines,
            "final frame"
        );
        Ok(())
    }
}

/// Audio service that only records what it would play.
#[derive(Debug, Default)]
pub(crate) struct LoggingAudio {
    music: Option<String>,
    effects: BTreeMap<String, String>,
    volume: Volume,
}

impl AudioService for LoggingAudio {
    fn load_background_music(&mut self, path: &str) -> AnyResult<()> {
        self.music = Some(path.to_owned());
        Ok(())
    }

    fn load_sound_effect(&mut self, name: &str, path: &str) -> AnyResult<()> {
        let _ = self.effects.insert(name.to_owned(), path.to_owned());
        Ok(())
    }

    fn play_background_music(&mut self) {
        if let Some(track) = &self.music {
            debug!(%track, volume = self.volume.get(), "music started");
        }
    }

    fn stop_background_music(&mut self) {
        debug!("music stopped");
    }

    fn play_sound_effect(&mut self, name: &str) {
        if let Some(path) = self.effects.get(name) {
            debug!(name, %path, volume = self.volume.get(), "sound effect");
        }
    }

    fn set_volume(&mut self, volume: Volume) {
        self.volume = volume;
    }
}
