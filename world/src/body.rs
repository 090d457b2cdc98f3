//! Kinematic bodies resolved against the tile grid one axis at a time.
//!
//! Every tick integrates gravity first, then moves and resolves along x, then
//! along y. The horizontal-before-vertical order is fixed: it decides how a
//! body slides along corners. Resolution only ever inspects the two tiles at
//! the leading edge of the moving axis.

use platformer_core::{DestroyCause, PixelRect, Velocity};

use crate::level::TileGrid;

/// Downward acceleration in pixels per second squared.
pub(crate) const GRAVITY: f32 = 1200.0;

/// Depth in pixels a body may sink into lava before it is destroyed.
pub(crate) const LAVA_PENETRATION_THRESHOLD: i32 = 4;

/// Distance below the playfield a body's top edge may fall before it is destroyed.
pub(crate) const FALL_OUT_MARGIN: i32 = 200;

/// Longest horizontal or upward distance a body covers in one tick.
const MAX_TICK_TRAVEL: i32 = 4_096;

/// Solid surface met during the vertical pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VerticalContact {
    Floor,
    Ceiling,
}

/// Tile indices covering a rectangle's edges.
#[derive(Clone, Copy, Debug)]
struct EdgeTiles {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
}

impl EdgeTiles {
    fn covering(bounds: &PixelRect, grid: &TileGrid) -> Self {
        Self {
            left: grid.column_at(bounds.left()),
            right: grid.column_at(bounds.right() - 1),
            top: grid.row_at(bounds.top()),
            bottom: grid.row_at(bounds.bottom() - 1),
        }
    }
}

/// Axis-aligned rectangle with a velocity, moved through the tile grid.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct KinematicBody {
    pub(crate) bounds: PixelRect,
    pub(crate) velocity: Velocity,
    pub(crate) on_ground: bool,
}

impl KinematicBody {
    pub(crate) fn new(bounds: PixelRect) -> Self {
        Self {
            bounds,
            velocity: Velocity::default(),
            on_ground: false,
        }
    }

    /// Advances the body by `dt` seconds and reports a lethal condition, if any.
    pub(crate) fn step(
        &mut self,
        dt: f32,
        grid: &TileGrid,
        playfield_height: i32,
    ) -> Option<DestroyCause> {
        self.velocity.y += GRAVITY * dt;
        self.on_ground = false;

        let dx = pixel_delta(self.velocity.x * dt).clamp(-MAX_TICK_TRAVEL, MAX_TICK_TRAVEL);
        if self.sweep_x(dx, grid) {
            self.velocity.x = 0.0;
        }

        let mut dy = pixel_delta(self.velocity.y * dt);
        if self.velocity.y >= 0.0 {
            // Falling or resting bodies always probe the row below them.
            dy = dy.max(1);
        }
        // Falls stop one tile past the fall-out line.
        let fall_limit = playfield_height + FALL_OUT_MARGIN + grid.tile_size();
        dy = dy.clamp(-MAX_TICK_TRAVEL, (fall_limit - self.bounds.top()).max(0));
        match self.sweep_y(dy, grid) {
            Some(VerticalContact::Floor) => {
                self.velocity.y = 0.0;
                self.on_ground = true;
            }
            Some(VerticalContact::Ceiling) => self.velocity.y = 0.0,
            None => {}
        }

        if self.sunk_into_hazard(grid) {
            return Some(DestroyCause::Lava);
        }
        if self.bounds.top() > playfield_height + FALL_OUT_MARGIN {
            return Some(DestroyCause::FellOutOfWorld);
        }
        None
    }

    /// Moves horizontally by `dx` pixels without touching the velocity.
    pub(crate) fn shove_x(&mut self, dx: i32, grid: &TileGrid) {
        let _ = self.sweep_x(dx, grid);
    }

    /// Moves along x in sub-steps of at most one tile. Returns `true` when a wall stopped the body.
    fn sweep_x(&mut self, dx: i32, grid: &TileGrid) -> bool {
        let limit = grid.tile_size();
        let mut remaining = dx;
        while remaining != 0 {
            let step = remaining.clamp(-limit, limit);
            remaining -= step;
            self.bounds.set_left(self.bounds.left() + step);
            if self.resolve_x(step, grid) {
                return true;
            }
        }
        false
    }

    fn resolve_x(&mut self, direction: i32, grid: &TileGrid) -> bool {
        let edges = EdgeTiles::covering(&self.bounds, grid);
        let size = grid.tile_size();
        if direction > 0 {
            if grid.is_solid(edges.right, edges.top) || grid.is_solid(edges.right, edges.bottom) {
                self.bounds.set_right(edges.right * size);
                return true;
            }
        } else if direction < 0
            && (grid.is_solid(edges.left, edges.top) || grid.is_solid(edges.left, edges.bottom))
        {
            self.bounds.set_left((edges.left + 1) * size);
            return true;
        }
        false
    }

    /// Moves along y in sub-steps of at most one tile, stopping at the first contact.
    fn sweep_y(&mut self, dy: i32, grid: &TileGrid) -> Option<VerticalContact> {
        let limit = grid.tile_size();
        let mut remaining = dy;
        while remaining != 0 {
            let step = remaining.clamp(-limit, limit);
            remaining -= step;
            self.bounds.set_top(self.bounds.top() + step);
            if let Some(contact) = self.resolve_y(step, grid) {
                return Some(contact);
            }
        }
        None
    }

    fn resolve_y(&mut self, direction: i32, grid: &TileGrid) -> Option<VerticalContact> {
        let edges = EdgeTiles::covering(&self.bounds, grid);
        let size = grid.tile_size();
        if direction > 0 {
            if grid.is_solid(edges.left, edges.bottom) || grid.is_solid(edges.right, edges.bottom)
            {
                self.bounds.set_bottom(edges.bottom * size);
                return Some(VerticalContact::Floor);
            }
        } else if direction < 0
            && (grid.is_solid(edges.left, edges.top) || grid.is_solid(edges.right, edges.top))
        {
            self.bounds.set_top((edges.top + 1) * size);
            return Some(VerticalContact::Ceiling);
        }
        None
    }

    fn sunk_into_hazard(&self, grid: &TileGrid) -> bool {
        let edges = EdgeTiles::covering(&self.bounds, grid);
        let touching = grid.is_hazard(edges.left, edges.bottom)
            || grid.is_hazard(edges.right, edges.bottom);
        let depth = self.bounds.bottom() - edges.bottom * grid.tile_size();
        touching && depth > LAVA_PENETRATION_THRESHOLD
    }
}

/// Truncates a fractional displacement towards zero.
fn pixel_delta(displacement: f32) -> i32 {
    displacement as i32
}
