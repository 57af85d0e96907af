#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Monkey Tribe Wars adapters.

mod audio;
mod screens;

pub use audio::{AudioService, Volume, BACKGROUND_MUSIC};
pub use screens::{Screen, ScreenFlow};

use anyhow::Result as AnyResult;
use glam::Vec2;
use monkey_tribe_core::{
    CellCoord, EntitySnapshot, FlashKind, GridSize, HudSnapshot, ProjectileSnapshot, ResourceKind,
    StructureKind, StructureSnapshot, Team, TokenSnapshot,
};
use monkey_tribe_system_controls::Key;
use std::{error::Error, fmt, time::Duration};

/// Number of tiles visible along each axis of the camera viewport.
pub const VIEWPORT_TILES: f32 = 10.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Untinted white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgba_u8(red, green, blue, 255)
    }

    /// Creates a color from byte RGBA values.
    #[must_use]
    pub const fn from_rgba_u8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: alpha as f32 / 255.0,
        }
    }

    /// Translucent full-screen overlay drawn while a flash is active.
    #[must_use]
    pub const fn flash(kind: FlashKind) -> Self {
        match kind {
            FlashKind::Hit => Self::from_rgba_u8(255, 0, 0, 32),
            FlashKind::Heal => Self::from_rgba_u8(0, 255, 0, 32),
        }
    }
}

/// Input captured by the backend during a single frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Keys pressed since the previous frame, in press order.
    pub keys: Vec<Key>,
}

/// Named texture a sprite is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    /// The player character.
    Player,
    /// Enemy monkey.
    Enemy,
    /// AI ally.
    Ally,
    /// Hut structure.
    Hut,
    /// Tower structure.
    Tower,
    /// Collectible token of the given kind.
    Token(ResourceKind),
    /// Thrown banana.
    Projectile,
}

impl SpriteKey {
    /// Asset path the backend loads the texture from.
    #[must_use]
    pub const fn asset_path(self) -> &'static str {
        match self {
            Self::Player => "assets/images/characters/player.png",
            Self::Enemy => "assets/images/characters/monkey.png",
            Self::Ally => "assets/images/characters/ally.png",
            Self::Hut => "assets/images/resources/hut.png",
            Self::Tower => "assets/images/resources/tower.png",
            Self::Token(ResourceKind::Wood) => "assets/images/resources/tree-log-small.png",
            Self::Token(ResourceKind::Stone) => "assets/images/resources/resource-stone.png",
            Self::Token(ResourceKind::Food) => "assets/images/resources/burger.png",
            Self::Token(ResourceKind::Currency) => "assets/images/resources/gem-blue.png",
            Self::Projectile => "assets/images/projectiles/banana.png",
        }
    }
}

/// Sprite positioned in world pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    /// Texture drawn for the sprite.
    pub key: SpriteKey,
    /// Centre of the sprite in world pixels.
    pub position: Vec2,
    /// Clockwise rotation in degrees.
    pub rotation_degrees: f32,
    /// Tint applied when drawing.
    pub tint: Color,
}

impl Sprite {
    fn at_cell(key: SpriteKey, cell: CellCoord, tile_size: f32) -> Self {
        let (x, y) = cell.to_pixels(tile_size);
        Self {
            key,
            position: Vec2::new(x, y),
            rotation_degrees: 0.0,
            tint: Color::WHITE,
        }
    }

    fn tinted(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }
}

/// Text lines drawn in screen space on top of the world.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hud {
    /// Lines from top to bottom.
    pub lines: Vec<String>,
}

impl Hud {
    /// Formats the player-facing counters.
    #[must_use]
    pub fn from_snapshot(snapshot: &HudSnapshot) -> Self {
        let inventory = &snapshot.inventory;
        let mut lines = vec![
            format!(
                "Score: {}  Health: {}/{}, Enemies Destroyed: {}",
                snapshot.score, snapshot.health, snapshot.max_health, snapshot.enemies_defeated
            ),
            format!(
                "WOOD: {}  STONE: {}  FOOD: {}",
                inventory.get(ResourceKind::Wood),
                inventory.get(ResourceKind::Stone),
                inventory.get(ResourceKind::Food)
            ),
        ];
        if let Some(kind) = snapshot.active_event {
            lines.push(format!("Event: {kind}"));
        }
        Self { lines }
    }
}

/// Camera centre in world pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World position shown at the centre of the viewport.
    pub center: Vec2,
    /// Size of the visible area in world pixels.
    pub viewport: Vec2,
}

impl Camera {
    /// Centres the camera on `target` while keeping the viewport over the grid.
    ///
    /// The vertical range is widened by one tile on each side so the HUD does
    /// not hide the outermost rows. On grids smaller than the viewport the
    /// camera rests at the lower bound.
    #[must_use]
    pub fn follow(target: Vec2, grid: GridSize, tile_size: f32) -> Self {
        let viewport = Vec2::splat(tile_size * VIEWPORT_TILES);
        let half = viewport / 2.0;
        let extent = Vec2::new(
            grid.columns() as f32 * tile_size,
            grid.rows() as f32 * tile_size,
        );

        let min = Vec2::new(half.x, half.y - tile_size);
        let max = Vec2::new(extent.x - half.x, extent.y - half.y + tile_size);

        Self {
            center: target.min(max).max(min),
            viewport,
        }
    }
}

/// Everything the world exposes for one frame of presentation.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSnapshot {
    /// Grid dimensions.
    pub grid: GridSize,
    /// Tile edge length in pixels.
    pub tile_size: f32,
    /// The player.
    pub player: EntitySnapshot,
    /// Enemies, dead ones included until they are swept.
    pub enemies: Vec<EntitySnapshot>,
    /// Allies.
    pub allies: Vec<EntitySnapshot>,
    /// Placed structures.
    pub structures: Vec<StructureSnapshot>,
    /// Tokens on the ground.
    pub tokens: Vec<TokenSnapshot>,
    /// Projectiles in flight.
    pub projectiles: Vec<ProjectileSnapshot>,
    /// HUD counters.
    pub hud: HudSnapshot,
    /// Flash currently shown, if any.
    pub flash: Option<FlashKind>,
}

/// Scene description combining sprites, HUD, flash overlay and camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Grid dimensions used to draw the tile lines.
    pub grid: GridSize,
    /// Tile edge length in pixels.
    pub tile_size: f32,
    /// Sprites in draw order.
    pub sprites: Vec<Sprite>,
    /// Screen-space text.
    pub hud: Hud,
    /// Full-screen overlay drawn last.
    pub flash: Option<Color>,
    /// Camera following the player.
    pub camera: Camera,
}

impl Scene {
    /// Builds the scene for a world snapshot.
    ///
    /// Draw order is tokens, structures, allies, enemies, projectiles and
    /// finally the player. Structures owned by enemies are tinted red.
    pub fn from_snapshot(snapshot: &SceneSnapshot) -> Result<Self, RenderingError> {
        let tile_size = snapshot.tile_size;
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(RenderingError::InvalidTileSize { tile_size });
        }

        let mut sprites = Vec::with_capacity(
            snapshot.tokens.len()
                + snapshot.structures.len()
                + snapshot.allies.len()
                + snapshot.enemies.len()
                + snapshot.projectiles.len()
                + 1,
        );

        sprites.extend(
            snapshot
                .tokens
                .iter()
                .map(|token| Sprite::at_cell(SpriteKey::Token(token.kind), token.cell, tile_size)),
        );
        sprites.extend(snapshot.structures.iter().map(|structure| {
            let key = match structure.kind {
                StructureKind::Hut => SpriteKey::Hut,
                StructureKind::Tower => SpriteKey::Tower,
            };
            let sprite = Sprite::at_cell(key, structure.cell, tile_size);
            if structure.team == Team::Enemy {
                sprite.tinted(Color::from_rgb_u8(255, 0, 0))
            } else {
                sprite
            }
        }));
        sprites.extend(
            snapshot
                .allies
                .iter()
                .filter(|ally| ally.alive)
                .map(|ally| Sprite::at_cell(SpriteKey::Ally, ally.cell, tile_size)),
        );
        sprites.extend(
            snapshot
                .enemies
                .iter()
                .filter(|enemy| enemy.alive)
                .map(|enemy| Sprite::at_cell(SpriteKey::Enemy, enemy.cell, tile_size)),
        );
        sprites.extend(snapshot.projectiles.iter().map(|projectile| Sprite {
            key: SpriteKey::Projectile,
            position: Vec2::new(projectile.column, projectile.row) * tile_size,
            rotation_degrees: projectile.rotation_degrees,
            tint: Color::WHITE,
        }));

        let player = Sprite::at_cell(SpriteKey::Player, snapshot.player.cell, tile_size);
        let camera = Camera::follow(player.position, snapshot.grid, tile_size);
        sprites.push(player);

        Ok(Self {
            grid: snapshot.grid,
            tile_size,
            sprites,
            hud: Hud::from_snapshot(&snapshot.hud),
            flash: snapshot.flash.map(Color::flash),
            camera,
        })
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Monkey Tribe Wars scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured during the frame, and replaces the scene before it is
    /// drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Tiles must have a positive, finite edge length.
    InvalidTileSize {
        /// Provided tile size that failed validation.
        tile_size: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileSize { tile_size } => {
                write!(f, "tile_size must be positive (received {tile_size})")
            }
        }
    }
}

impl Error for RenderingError {}
