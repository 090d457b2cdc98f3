#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the platformer engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "PLATFORMER - CLASSIC";

/// Position of the session within its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Title screen shown before the first session starts.
    Menu,
    /// The simulation advances every tick.
    Playing,
    /// The player was destroyed; the session is frozen until restarted.
    GameOver,
    /// Every coin was collected; the session is frozen until restarted.
    Won,
}

/// Horizontal direction an actor is looking towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Looking towards decreasing x.
    Left,
    /// Looking towards increasing x.
    Right,
}

/// Terrain kind stored in a single cell of the level grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Open air.
    #[default]
    Empty,
    /// Top layer of the ground strip.
    Grass,
    /// Lower layer of the ground strip.
    Dirt,
    /// Elevated platforms and pillars.
    Stone,
    /// Molten hazard that destroys bodies sinking into it.
    Lava,
    /// Wooden terrain.
    Wood,
}

impl Tile {
    /// Reports whether the tile blocks body movement.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Grass | Self::Dirt | Self::Stone | Self::Wood)
    }

    /// Reports whether the tile destroys bodies that penetrate it.
    #[must_use]
    pub const fn is_hazard(self) -> bool {
        matches!(self, Self::Lava)
    }
}

/// Signed tile index pair. Negative values address cells left of or above the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    column: i32,
    row: i32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Column index of the tile.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Row index of the tile.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }
}

/// Axis-aligned rectangle measured in whole pixels and anchored at its top-left corner.
///
/// The right and bottom edges are exclusive, so a rectangle at `x = 0` with a
/// width of `12` covers pixels `0..12`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl PixelRect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge.
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Top edge.
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Horizontal centre, rounded towards the left edge.
    #[must_use]
    pub const fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Vertical centre, rounded towards the top edge.
    #[must_use]
    pub const fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    /// Moves the rectangle so its left edge sits at `left`.
    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    /// Moves the rectangle so its exclusive right edge sits at `right`.
    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.width;
    }

    /// Moves the rectangle so its top edge sits at `top`.
    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    /// Moves the rectangle so its exclusive bottom edge sits at `bottom`.
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    /// Moves the rectangle so its horizontal centre sits at `center_x`.
    pub fn set_center_x(&mut self, center_x: i32) {
        self.x = center_x - self.width / 2;
    }

    /// Moves the rectangle so its vertical centre sits at `center_y`.
    pub fn set_center_y(&mut self, center_y: i32) {
        self.y = center_y - self.height / 2;
    }

    /// Reports whether both rectangles share at least one pixel.
    ///
    /// Rectangles that merely touch along an edge do not overlap.
    #[must_use]
    pub const fn overlaps(&self, other: &PixelRect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Velocity expressed in pixels per second.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    /// Horizontal component; positive values move right.
    pub x: f32,
    /// Vertical component; positive values move down.
    pub y: f32,
}

/// Movement intent sampled from the player's controls for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MovementIntent {
    /// Move left. Takes priority when both directions are held.
    pub left: bool,
    /// Move right.
    pub right: bool,
    /// Jump if standing on solid ground.
    pub jump: bool,
}

impl MovementIntent {
    /// Intent that neither moves nor jumps.
    pub const IDLE: Self = Self {
        left: false,
        right: false,
        jump: false,
    };
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a coin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoinId(u32);

impl CoinId {
    /// Creates a new coin identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Reason the player was destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DestroyCause {
    /// The player's feet sank into a lava tile.
    Lava,
    /// The player fell far below the playfield.
    FellOutOfWorld,
    /// Enemy contact drained the last health point.
    HealthDepleted,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Leaves the menu and starts a fresh session.
    StartSession,
    /// Starts a fresh session after the previous one ended.
    RestartSession,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
        /// Player intent sampled for this tick.
        intent: MovementIntent,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the session moved to a new phase.
    PhaseChanged {
        /// Phase that was active before the transition.
        from: Phase,
        /// Phase that became active.
        to: Phase,
    },
    /// Confirms that player, enemies, coins and score returned to their initial state.
    SessionReset,
    /// Confirms that the player left the ground.
    PlayerJumped,
    /// Confirms that the player picked up a coin.
    CoinCollected {
        /// Identifier of the collected coin.
        coin: CoinId,
        /// Score after the reward was applied.
        score: u32,
    },
    /// Reports that an enemy touched the player.
    PlayerDamaged {
        /// Identifier of the enemy that dealt the damage.
        enemy: EnemyId,
        /// Health remaining after the hit.
        health: u32,
    },
    /// Reports that the player was destroyed.
    PlayerDestroyed {
        /// What destroyed the player.
        cause: DestroyCause,
    },
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Hitbox in pixels.
    pub bounds: PixelRect,
    /// Current velocity.
    pub velocity: Velocity,
    /// Remaining health points.
    pub health: u32,
    /// Direction the player looks towards.
    pub facing: Facing,
    /// Whether the last vertical pass ended resting on solid ground.
    pub on_ground: bool,
    /// Whether a lethal condition was reached.
    pub destroyed: bool,
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Hitbox in pixels.
    pub bounds: PixelRect,
    /// Direction of travel.
    pub facing: Facing,
}

/// Read-only snapshot describing all enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single coin used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoinSnapshot {
    /// Unique identifier assigned to the coin.
    pub id: CoinId,
    /// Hitbox in pixels.
    pub bounds: PixelRect,
    /// Whether the coin was picked up.
    pub collected: bool,
    /// Cosmetic bob phase in radians. Has no gameplay effect.
    pub bob_phase: f32,
}

/// Read-only snapshot describing all coins.
#[derive(Clone, Debug, Default)]
pub struct CoinView {
    snapshots: Vec<CoinSnapshot>,
}

impl CoinView {
    /// Creates a new coin view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<CoinSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured coin snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &CoinSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<CoinSnapshot> {
        self.snapshots
    }
}

/// Summary of a single run derived from the world's event stream.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Number of simulation ticks that advanced the session.
    pub ticks: u64,
    /// Simulated time spent playing, in milliseconds.
    pub elapsed_ms: u64,
    /// Number of coins picked up.
    pub coins_collected: u32,
    /// Final score.
    pub score: u32,
    /// Number of jumps performed.
    pub jumps: u32,
    /// Number of enemy hits taken.
    pub hits_taken: u32,
    /// Phase the session ended in, if it ever started.
    pub final_phase: Option<Phase>,
    /// What destroyed the player, if anything did.
    pub destroyed_by: Option<DestroyCause>,
}
