use std::time::Duration;

use anyhow::Result as AnyResult;
use monkey_tribe_core::{Command, Event, GameConfig};
use monkey_tribe_rendering::{
    AudioService, FrameInput, RenderingError, Scene, SceneSnapshot, Screen, ScreenFlow,
};
use monkey_tribe_system_analytics::{Analytics, SessionReport};
use monkey_tribe_system_controls::{ControlAction, Controls};
use monkey_tribe_system_journal::Journal;
use monkey_tribe_world::{self as world, query, World};
use tracing::{info, warn};

const SOUND_EFFECTS: [(&str, &str); 3] = [
    ("throw", "assets/audio/throw.wav"),
    ("hit", "assets/audio/hit.wav"),
    ("build", "assets/audio/build.wav"),
];

/// Owns the world and every system wired around it for one play session.
pub(crate) struct Session<A> {
    world: World,
    controls: Controls,
    analytics: Analytics,
    journal: Journal,
    flow: ScreenFlow,
    audio: A,
    events: Vec<Event>,
}

impl<A> Session<A>
where
    A: AudioService,
{
    /// Generates the world and leaves the title screen for the game.
    pub(crate) fn start(config: GameConfig, mut audio: A) -> AnyResult<Self> {
        for (name, path) in SOUND_EFFECTS {
            audio.load_sound_effect(name, path)?;
        }

        let mut events = Vec::new();
        let world = World::generate(config, &mut events);
        let mut session = Self {
            world,
            controls: Controls::new(),
            analytics: Analytics::new(),
            journal: Journal::new(),
            flow: ScreenFlow::new(),
            audio,
            events: Vec::new(),
        };
        session.observe(&events);
        let _ = session.flow.play(&mut session.audio)?;
        Ok(session)
    }

    pub(crate) fn welcome_banner(&self) -> &'static str {
        query::welcome_banner(&self.world)
    }

    /// Statistics folded from every event so far.
    pub(crate) fn report(&self) -> &SessionReport {
        self.analytics.report()
    }

    /// Scene describing the current world state.
    pub(crate) fn scene(&self) -> Result<Scene, RenderingError> {
        Scene::from_snapshot(&snapshot(&self.world))
    }

    /// Advances one frame: input, world tick, systems, screen flow and scene.
    pub(crate) fn frame(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        match self.flow.screen() {
            Screen::Game => {}
            Screen::Settings => {
                // Headless settings close on the following frame.
                let _ = self.flow.back();
                return;
            }
            Screen::Title | Screen::Defeat { .. } => return,
        }

        let actions: Vec<ControlAction> = input
            .keys
            .into_iter()
            .filter_map(ControlAction::for_key)
            .collect();
        let mut commands = Vec::new();
        let mut screens = Vec::new();
        self.controls
            .handle(&self.events, &actions, &mut commands, &mut screens);

        self.events.clear();
        if !screens.is_empty() {
            for request in screens {
                let _ = self.flow.request(request, &mut self.audio);
            }
            if let Screen::Defeat {
                score,
                enemies_defeated,
            } = self.flow.screen()
            {
                info!(score, enemies_defeated, "session over");
            }
            return;
        }

        for command in commands {
            world::apply(&mut self.world, command, &mut self.events);
        }
        world::apply(&mut self.world, Command::Tick { dt }, &mut self.events);

        let events = std::mem::take(&mut self.events);
        self.observe(&events);
        self.events = events;

        match self.scene() {
            Ok(next) => *scene = next,
            Err(error) => warn!(%error, "scene not updated"),
        }
    }

    fn observe(&mut self, events: &[Event]) {
        self.journal.handle(events);
        self.analytics.handle(events);
        for event in events {
            let effect = match event {
                Event::ProjectileThrown { .. } => "throw",
                Event::PlayerDamaged { .. } => "hit",
                Event::StructurePlaced { .. } => "build",
                _ => continue,
            };
            self.audio.play_sound_effect(effect);
        }
    }
}

fn snapshot(world: &World) -> SceneSnapshot {
    SceneSnapshot {
        grid: query::grid(world),
        tile_size: query::tile_size(world),
        player: query::player(world),
        enemies: query::enemies(world),
        allies: query::allies(world),
        structures: query::structures(world),
        tokens: query::tokens(world),
        projectiles: query::projectiles(world),
        hud: query::hud(world),
        flash: query::flash(world),
    }
}
