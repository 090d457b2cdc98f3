#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for the tile platformer.
//!
//! The world owns the level grid, the player, the patrolling enemies and the
//! coins. It only changes through [`apply`], which executes a [`Command`] and
//! reports every observable consequence as an [`Event`].

mod actors;
mod body;
mod contacts;
mod level;

use std::time::Duration;

use platformer_core::{
    CoinId, Command, DestroyCause, EnemyId, Event, MovementIntent, Phase, WELCOME_BANNER,
};
use tracing::{debug, info};

use crate::{
    actors::{Enemy, Player},
    contacts::Coin,
    level::{LevelLayout, CLASSIC_LAYOUT},
};

pub use level::TileGrid;

/// Width of the visible playfield in pixels.
pub const PLAYFIELD_WIDTH: i32 = 1200;
/// Height of the visible playfield in pixels.
pub const PLAYFIELD_HEIGHT: i32 = 600;
/// Side length of a tile in pixels.
pub const TILE_SIZE: i32 = 18;

const GRID_COLUMNS: u32 = (PLAYFIELD_WIDTH / TILE_SIZE) as u32;
const GRID_ROWS: u32 = (PLAYFIELD_HEIGHT / TILE_SIZE) as u32;

/// Represents the authoritative platformer session.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    layout: &'static LevelLayout,
    tile_grid: TileGrid,
    player: Player,
    enemies: Vec<Enemy>,
    coins: Vec<Coin>,
    score: u32,
    phase: Phase,
    tick_index: u64,
}

impl World {
    /// Creates a world showing the menu, with every actor at its spawn point.
    #[must_use]
    pub fn new() -> Self {
        let layout = &CLASSIC_LAYOUT;
        let tile_grid = layout.build(GRID_COLUMNS, GRID_ROWS, TILE_SIZE);
        let mut world = Self {
            banner: WELCOME_BANNER,
            layout,
            player: Player::spawn(0, 0, TILE_SIZE),
            enemies: Vec::new(),
            coins: Vec::new(),
            tile_grid,
            score: 0,
            phase: Phase::Menu,
            tick_index: 0,
        };
        world.reset_session();
        world
    }

    fn reset_session(&mut self) {
        let rows = self.tile_grid.rows() as i32;
        let columns = self.tile_grid.columns() as i32;
        let size = self.tile_grid.tile_size();
        let spawn = self.layout.player_spawn;

        self.player = Player::spawn(spawn.column, rows - spawn.rise, size);
        self.enemies = self
            .layout
            .enemies
            .iter()
            .zip(0u32..)
            .map(|(seed, id)| {
                Enemy::spawn(
                    EnemyId::new(id),
                    seed.column,
                    rows - seed.rise,
                    seed.range_tiles,
                    seed.speed,
                    size,
                )
            })
            .collect();
        self.coins = self
            .layout
            .coins
            .iter()
            .zip(0u32..)
            .filter(|(seed, _)| {
                let row = rows - seed.rise;
                (0..columns).contains(&seed.column) && (0..rows).contains(&row)
            })
            .map(|(seed, id)| Coin::spawn(CoinId::new(id), seed.column, rows - seed.rise, size))
            .collect();
        self.score = 0;
        self.tick_index = 0;
    }

    fn remaining_coins(&self) -> usize {
        self.coins.iter().filter(|coin| !coin.is_collected()).count()
    }

    fn enter_phase(&mut self, to: Phase, out_events: &mut Vec<Event>) {
        let from = self.phase;
        self.phase = to;
        info!(?from, ?to, score = self.score, "phase changed");
        out_events.push(Event::PhaseChanged { from, to });
    }

    fn start_session(&mut self, out_events: &mut Vec<Event>) {
        self.reset_session();
        out_events.push(Event::SessionReset);
        self.enter_phase(Phase::Playing, out_events);
    }

    fn tick(&mut self, dt: Duration, intent: MovementIntent, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced { dt });
        let seconds = dt.as_secs_f32();

        let step = self
            .player
            .step(intent, seconds, &self.tile_grid, PLAYFIELD_HEIGHT);
        if step.jumped {
            out_events.push(Event::PlayerJumped);
        }
        if let Some(cause) = step.destroyed {
            debug!(?cause, tick = self.tick_index, "player destroyed");
            out_events.push(Event::PlayerDestroyed { cause });
        }

        let collected = contacts::collect_coins(
            &mut self.coins,
            &self.player.body.bounds,
            seconds,
            &mut self.score,
        );
        for (coin, score) in collected {
            out_events.push(Event::CoinCollected { coin, score });
        }

        let hits = contacts::resolve_enemy_contacts(
            &mut self.enemies,
            &mut self.player,
            seconds,
            &self.tile_grid,
        );
        for (enemy, health) in hits {
            debug!(enemy = enemy.get(), health, "player damaged");
            out_events.push(Event::PlayerDamaged { enemy, health });
            if health == 0 && self.player.destroy(DestroyCause::HealthDepleted) {
                let cause = DestroyCause::HealthDepleted;
                debug!(?cause, tick = self.tick_index, "player destroyed");
                out_events.push(Event::PlayerDestroyed { cause });
            }
        }

        if self.player.is_destroyed() {
            self.enter_phase(Phase::GameOver, out_events);
        } else if self.remaining_coins() == 0 {
            self.enter_phase(Phase::Won, out_events);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartSession => {
            if world.phase == Phase::Menu {
                world.start_session(out_events);
            } else {
                debug!(phase = ?world.phase, "ignoring start outside the menu");
            }
        }
        Command::RestartSession => {
            if matches!(world.phase, Phase::GameOver | Phase::Won) {
                world.start_session(out_events);
            } else {
                debug!(phase = ?world.phase, "ignoring restart of an unfinished session");
            }
        }
        Command::Tick { dt, intent } => {
            if world.phase == Phase::Playing {
                world.tick(dt, intent, out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use platformer_core::{CoinView, EnemyView, Phase, PixelRect, PlayerSnapshot};

    use super::{TileGrid, World, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the level's tile grid.
    #[must_use]
    pub fn tile_grid(world: &World) -> &TileGrid {
        &world.tile_grid
    }

    /// Visible area in pixels, anchored at the origin.
    #[must_use]
    pub fn playfield(_world: &World) -> PixelRect {
        PixelRect::new(0, 0, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot()
    }

    /// Captures a read-only view of the enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(|enemy| enemy.snapshot()).collect())
    }

    /// Captures a read-only view of the coins, collected ones included.
    #[must_use]
    pub fn coin_view(world: &World) -> CoinView {
        CoinView::from_snapshots(world.coins.iter().map(|coin| coin.snapshot()).collect())
    }

    /// Points accumulated in the current session.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Number of coins still waiting to be collected.
    #[must_use]
    pub fn remaining_coins(world: &World) -> usize {
        world.remaining_coins()
    }

    /// Number of ticks simulated since the session last started.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
