#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for platformer adapters.
//!
//! Everything here is expressed in playfield pixels. Backends scale the
//! playfield to their surface; the simulation never sees screen coordinates.

use anyhow::Result as AnyResult;
use glam::Vec2;
use platformer_core::{Facing, Phase, Tile};
use std::time::Duration;
use thiserror::Error;

/// Vertical amplitude of the coin bob in pixels.
pub const COIN_BOB_AMPLITUDE: f32 = 4.0;

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
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Colors used for placeholder shapes and screen text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Sky behind the level and the title screen.
    pub sky: Color,
    /// Grass tiles.
    pub grass: Color,
    /// Dirt tiles.
    pub dirt: Color,
    /// Stone tiles.
    pub stone: Color,
    /// Lava tiles.
    pub lava: Color,
    /// Wood tiles.
    pub wood: Color,
    /// Coin fill.
    pub gold: Color,
    /// Player body.
    pub player: Color,
    /// Enemy body.
    pub enemy: Color,
    /// Background of the game over screen.
    pub game_over: Color,
    /// Background of the victory screen.
    pub victory: Color,
    /// Light text and outlines.
    pub white: Color,
    /// Dark text.
    pub black: Color,
    /// Game over headline.
    pub red: Color,
    /// Score highlights.
    pub yellow: Color,
}

impl Palette {
    /// Palette of the classic level.
    pub const CLASSIC: Self = Self {
        sky: Color::from_rgb_u8(135, 206, 235),
        grass: Color::from_rgb_u8(34, 139, 34),
        dirt: Color::from_rgb_u8(139, 69, 19),
        stone: Color::from_rgb_u8(120, 120, 120),
        lava: Color::from_rgb_u8(220, 60, 60),
        wood: Color::from_rgb_u8(120, 80, 30),
        gold: Color::from_rgb_u8(255, 215, 0),
        player: Color::from_rgb_u8(40, 100, 240),
        enemy: Color::from_rgb_u8(200, 50, 50),
        game_over: Color::from_rgb_u8(0, 0, 0),
        victory: Color::from_rgb_u8(50, 150, 50),
        white: Color::from_rgb_u8(255, 255, 255),
        black: Color::from_rgb_u8(0, 0, 0),
        red: Color::from_rgb_u8(255, 0, 0),
        yellow: Color::from_rgb_u8(255, 255, 0),
    };

    /// Fill color of a tile, or `None` for tiles that are not drawn.
    #[must_use]
    pub const fn tile(&self, tile: Tile) -> Option<Color> {
        match tile {
            Tile::Empty => None,
            Tile::Grass => Some(self.grass),
            Tile::Dirt => Some(self.dirt),
            Tile::Stone => Some(self.stone),
            Tile::Lava => Some(self.lava),
            Tile::Wood => Some(self.wood),
        }
    }

    /// Color used to clear the frame in the provided phase.
    #[must_use]
    pub const fn background(&self, phase: Phase) -> Color {
        match phase {
            Phase::Menu | Phase::Playing => self.sky,
            Phase::GameOver => self.game_over,
            Phase::Won => self.victory,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Move left is held.
    pub left: bool,
    /// Move right is held.
    pub right: bool,
    /// Jump is held.
    pub jump: bool,
    /// Confirm (start or restart) is held.
    pub confirm: bool,
}

/// Describes the tile grid that adapters render behind the actors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single tile in pixels.
    pub tile_size: f32,
}

impl TileGridPresentation {
    /// Creates a new tile grid descriptor.
    ///
    /// Returns an error when `tile_size` is not a positive, finite length.
    pub fn new(columns: u32, rows: u32, tile_size: f32) -> Result<Self, RenderingError> {
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(RenderingError::InvalidTileSize { tile_size });
        }

        Ok(Self {
            columns,
            rows,
            tile_size,
        })
    }

    /// Top-left corner of the tile at the provided indices.
    #[must_use]
    pub fn tile_origin(&self, column: i32, row: i32) -> Vec2 {
        Vec2::new(column as f32, row as f32) * self.tile_size
    }
}

/// Single non-empty tile to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TilePresentation {
    /// Column index of the tile.
    pub column: i32,
    /// Row index of the tile.
    pub row: i32,
    /// Terrain kind.
    pub tile: Tile,
}

/// Rectangle-shaped actor drawn as a placeholder box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorPresentation {
    /// Top-left corner in pixels.
    pub origin: Vec2,
    /// Width and height in pixels.
    pub size: Vec2,
    /// Direction the actor looks towards.
    pub facing: Facing,
    /// Whether the actor is moving horizontally, which drives its walk cycle.
    pub moving: bool,
}

/// Coin drawn as a disc that bobs around its resting centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoinPresentation {
    /// Resting centre in pixels.
    pub center: Vec2,
    /// Disc radius in pixels.
    pub radius: f32,
    /// Bob phase in radians reported by the world.
    pub bob_phase: f32,
}

impl CoinPresentation {
    /// Centre after applying the cosmetic bob.
    #[must_use]
    pub fn draw_center(&self) -> Vec2 {
        self.center + Vec2::new(0.0, coin_bob_offset(self.bob_phase))
    }
}

/// Values shown in the heads-up display while playing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HudPresentation {
    /// Remaining player health.
    pub health: u32,
    /// Current score.
    pub score: u32,
}

/// Where a line of text is anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// The position is the centre of the text.
    Center,
    /// The position is the top-left corner of the text.
    TopLeft,
}

/// Line of screen text expressed in playfield pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    /// Text to draw.
    pub text: String,
    /// Anchor position.
    pub position: Vec2,
    /// How `position` relates to the text.
    pub anchor: TextAnchor,
    /// Font size in pixels.
    pub font_size: u16,
    /// Text color.
    pub color: Color,
}

impl TextLine {
    fn centered(text: impl Into<String>, position: Vec2, font_size: u16, color: Color) -> Self {
        Self {
            text: text.into(),
            position,
            anchor: TextAnchor::Center,
            font_size,
            color,
        }
    }

    fn top_left(text: impl Into<String>, position: Vec2, font_size: u16, color: Color) -> Self {
        Self {
            text: text.into(),
            position,
            anchor: TextAnchor::TopLeft,
            font_size,
            color,
        }
    }
}

/// Scene description combining the level, its inhabitants and the session phase.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Size of the visible playfield in pixels.
    pub playfield: Vec2,
    /// Tile grid that composes the level.
    pub tile_grid: TileGridPresentation,
    /// Non-empty tiles of the level.
    pub tiles: Vec<TilePresentation>,
    /// The player.
    pub player: ActorPresentation,
    /// Enemies in id order.
    pub enemies: Vec<ActorPresentation>,
    /// Coins that have not been collected yet.
    pub coins: Vec<CoinPresentation>,
    /// Heads-up display values.
    pub hud: HudPresentation,
    /// Session phase, selecting which screen is shown.
    pub phase: Phase,
    /// Title shown on the menu screen.
    pub banner: String,
    /// Time elapsed since the presentation started, used for animation.
    pub elapsed: Duration,
}

impl Scene {
    /// Creates a scene showing the menu with no inhabitants.
    #[must_use]
    pub fn new<T>(playfield: Vec2, tile_grid: TileGridPresentation, banner: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            playfield,
            tile_grid,
            tiles: Vec::new(),
            player: ActorPresentation {
                origin: Vec2::ZERO,
                size: Vec2::ZERO,
                facing: Facing::Right,
                moving: false,
            },
            enemies: Vec::new(),
            coins: Vec::new(),
            hud: HudPresentation::default(),
            phase: Phase::Menu,
            banner: banner.into(),
            elapsed: Duration::ZERO,
        }
    }

    /// Reports whether the level and its actors should be drawn.
    #[must_use]
    pub fn shows_level(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Text drawn on top of the current screen.
    #[must_use]
    pub fn text_lines(&self, palette: &Palette) -> Vec<TextLine> {
        let middle = self.playfield * 0.5;
        match self.phase {
            Phase::Menu => vec![
                TextLine::centered(
                    self.banner.clone(),
                    Vec2::new(middle.x, self.playfield.y / 3.0),
                    54,
                    palette.black,
                ),
                TextLine::centered("Press SPACE to Start", middle, 34, palette.white),
                TextLine::centered(
                    "Arrows/WASD to move, Up/W to jump",
                    middle + Vec2::new(0.0, 50.0),
                    24,
                    palette.black,
                ),
            ],
            Phase::Playing => vec![
                TextLine::top_left(
                    format!("Health: {}", self.hud.health),
                    Vec2::new(12.0, 10.0),
                    24,
                    palette.black,
                ),
                TextLine::top_left(
                    format!("Score: {}", self.hud.score),
                    Vec2::new(self.playfield.x - 170.0, 10.0),
                    24,
                    palette.black,
                ),
            ],
            Phase::GameOver => end_screen(
                "GAME OVER",
                palette.red,
                format!("Final Score: {}", self.hud.score),
                palette.yellow,
                palette.white,
                middle,
            ),
            Phase::Won => end_screen(
                "YOU WIN!",
                palette.gold,
                format!("Score Total: {}", self.hud.score),
                palette.white,
                palette.yellow,
                middle,
            ),
        }
    }
}

fn end_screen(
    headline: &str,
    headline_color: Color,
    score: String,
    score_color: Color,
    prompt_color: Color,
    middle: Vec2,
) -> Vec<TextLine> {
    vec![
        TextLine::centered(headline, middle - Vec2::new(0.0, 20.0), 72, headline_color),
        TextLine::centered(score, middle + Vec2::new(0.0, 40.0), 40, score_color),
        TextLine::centered(
            "Press SPACE to restart",
            middle + Vec2::new(0.0, 110.0),
            28,
            prompt_color,
        ),
    ]
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Colors used for shapes, backgrounds and text.
    pub palette: Palette,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, palette: Palette, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            palette,
            scene,
        }
    }
}

/// Rendering backend capable of presenting platformer scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and may mutate the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// Tiles must have a positive size to be drawn.
    #[error("tile_size must be positive and finite (received {tile_size})")]
    InvalidTileSize {
        /// Provided size that failed validation.
        tile_size: f32,
    },
}

/// Index of the animation frame to show after `elapsed` time.
///
/// Frames advance every `period` and wrap after `frame_count`. A zero period
/// or an empty animation always yields frame zero.
#[must_use]
pub fn animation_frame(elapsed: Duration, period: Duration, frame_count: usize) -> usize {
    if frame_count == 0 || period.is_zero() {
        return 0;
    }
    let steps = elapsed.as_nanos() / period.as_nanos();
    (steps % frame_count as u128) as usize
}

/// Vertical offset applied to a coin with the provided bob phase.
#[must_use]
pub fn coin_bob_offset(bob_phase: f32) -> f32 {
    bob_phase.sin() * COIN_BOB_AMPLITUDE
}
