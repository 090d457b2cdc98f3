//! Player control and enemy patrol applied on top of kinematic bodies.

use platformer_core::{
    DestroyCause, EnemyId, EnemySnapshot, Facing, MovementIntent, PixelRect, PlayerSnapshot,
};

use crate::{body::KinematicBody, level::TileGrid};

pub(crate) const PLAYER_SIZE: i32 = 12;
pub(crate) const PLAYER_MAX_HEALTH: u32 = 3;
pub(crate) const PLAYER_SPEED: f32 = 180.0;
pub(crate) const JUMP_STRENGTH: f32 = 550.0;

/// Vertical velocity applied to the player when an enemy touches it.
pub(crate) const KNOCKBACK_VELOCITY: f32 = -220.0;
/// Horizontal distance the player is pushed away from an enemy on contact.
pub(crate) const KNOCKBACK_PUSH: i32 = 20;

pub(crate) const ENEMY_SIZE: i32 = 12;

/// Places a rectangle so it is horizontally centred on the tile column and
/// rests on top of the tile row.
fn standing_on(column: i32, row: i32, tile_size: i32, width: i32, height: i32) -> PixelRect {
    let mut bounds = PixelRect::new(0, 0, width, height);
    bounds.set_center_x(column * tile_size + tile_size / 2);
    bounds.set_bottom(row * tile_size);
    bounds
}

/// What happened to the player during a single step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct PlayerStep {
    pub(crate) jumped: bool,
    pub(crate) destroyed: Option<DestroyCause>,
}

#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) body: KinematicBody,
    health: u32,
    facing: Facing,
    destroyed: Option<DestroyCause>,
}

impl Player {
    pub(crate) fn spawn(column: i32, row: i32, tile_size: i32) -> Self {
        let bounds = standing_on(column, row, tile_size, PLAYER_SIZE, PLAYER_SIZE);
        Self {
            body: KinematicBody::new(bounds),
            health: PLAYER_MAX_HEALTH,
            facing: Facing::Right,
            destroyed: None,
        }
    }

    pub(crate) fn is_destroyed(&self) -> bool {
        self.destroyed.is_some() || self.health == 0
    }

    /// Applies intent, then integrates and resolves the body.
    ///
    /// A destroyed player ignores intent. Jumping requires ground contact from
    /// the previous step.
    pub(crate) fn step(
        &mut self,
        intent: MovementIntent,
        dt: f32,
        grid: &TileGrid,
        playfield_height: i32,
    ) -> PlayerStep {
        let intent = if self.is_destroyed() {
            MovementIntent::IDLE
        } else {
            intent
        };

        if intent.left {
            self.body.velocity.x = -PLAYER_SPEED;
            self.facing = Facing::Left;
        } else if intent.right {
            self.body.velocity.x = PLAYER_SPEED;
            self.facing = Facing::Right;
        } else {
            self.body.velocity.x = 0.0;
        }

        let mut outcome = PlayerStep::default();
        if intent.jump && self.body.on_ground {
            self.body.velocity.y = -JUMP_STRENGTH;
            self.body.on_ground = false;
            outcome.jumped = true;
        }

        if let Some(cause) = self.body.step(dt, grid, playfield_height) {
            if self.destroy(cause) {
                outcome.destroyed = Some(cause);
            }
        }
        outcome
    }

    /// Applies one point of enemy damage and knocks the player away from `enemy_center_x`.
    ///
    /// Returns the remaining health.
    pub(crate) fn take_hit(&mut self, enemy_center_x: i32, grid: &TileGrid) -> u32 {
        self.health = self.health.saturating_sub(1);
        self.body.velocity.y = KNOCKBACK_VELOCITY;
        let push = if self.body.bounds.center_x() < enemy_center_x {
            -KNOCKBACK_PUSH
        } else {
            KNOCKBACK_PUSH
        };
        self.body.shove_x(push, grid);
        self.health
    }

    /// Marks the player destroyed and drains its health. Returns `false` if it already was.
    pub(crate) fn destroy(&mut self, cause: DestroyCause) -> bool {
        self.health = 0;
        if self.destroyed.is_some() {
            return false;
        }
        self.destroyed = Some(cause);
        true
    }

    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            bounds: self.body.bounds,
            velocity: self.body.velocity,
            health: self.health,
            facing: self.facing,
            on_ground: self.body.on_ground,
            destroyed: self.is_destroyed(),
        }
    }
}

/// Horizontal oscillator bounded to `[anchor, anchor + range]`.
///
/// Enemies ignore gravity and the grid. The centre is tracked with sub-pixel
/// precision so slow patrols still advance at high frame rates.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) body: KinematicBody,
    center_x: f32,
    anchor: f32,
    range: f32,
}

impl Enemy {
    pub(crate) fn spawn(
        id: EnemyId,
        column: i32,
        row: i32,
        range_tiles: i32,
        speed: f32,
        tile_size: i32,
    ) -> Self {
        let bounds = standing_on(column, row, tile_size, ENEMY_SIZE, ENEMY_SIZE);
        let mut body = KinematicBody::new(bounds);
        body.velocity.x = speed;
        let center_x = bounds.center_x() as f32;
        Self {
            id,
            body,
            center_x,
            anchor: center_x,
            range: (range_tiles * tile_size).max(0) as f32,
        }
    }

    pub(crate) fn patrol(&mut self, dt: f32) {
        let speed = self.body.velocity.x.abs();
        self.center_x += self.body.velocity.x * dt;
        if self.center_x > self.anchor + self.range {
            self.center_x = self.anchor + self.range;
            self.body.velocity.x = -speed;
        } else if self.center_x < self.anchor {
            self.center_x = self.anchor;
            self.body.velocity.x = speed;
        }
        self.body.bounds.set_center_x(self.center_x.round() as i32);
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        let facing = if self.body.velocity.x > 0.0 {
            Facing::Right
        } else {
            Facing::Left
        };
        EnemySnapshot {
            id: self.id,
            bounds: self.body.bounds,
            facing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::GRAVITY;
    use platformer_core::Tile;
    use proptest::prelude::*;

    const TILE: i32 = 18;

    fn flat_ground() -> TileGrid {
        let mut grid = TileGrid::new(30, 10, TILE);
        for column in 0..30 {
            grid.set(column, 8, Tile::Grass);
        }
        grid
    }

    fn grounded_player(grid: &TileGrid) -> Player {
        let mut player = Player::spawn(5, 8, TILE);
        let _ = player.step(MovementIntent::IDLE, 1.0 / 60.0, grid, 1_000);
        assert!(player.body.on_ground);
        player
    }

    #[test]
    fn spawn_centres_on_tile_and_rests_on_row() {
        let player = Player::spawn(2, 31, TILE);
        assert_eq!(player.body.bounds.center_x(), 45);
        assert_eq!(player.body.bounds.bottom(), 558);
        assert_eq!(player.snapshot().health, 3);
        assert_eq!(player.snapshot().facing, Facing::Right);
    }

    #[test]
    fn horizontal_intent_is_instantaneous() {
        let grid = flat_ground();
        let mut player = grounded_player(&grid);

        let _ = player.step(
            MovementIntent {
                left: true,
                ..MovementIntent::IDLE
            },
            1.0 / 60.0,
            &grid,
            1_000,
        );
        assert_eq!(player.body.velocity.x, -PLAYER_SPEED);
        assert_eq!(player.snapshot().facing, Facing::Left);

        let _ = player.step(MovementIntent::IDLE, 1.0 / 60.0, &grid, 1_000);
        assert_eq!(player.body.velocity.x, 0.0);
        assert_eq!(player.snapshot().facing, Facing::Left);
    }

    #[test]
    fn left_wins_when_both_directions_are_held() {
        let grid = flat_ground();
        let mut player = grounded_player(&grid);
        let intent = MovementIntent {
            left: true,
            right: true,
            jump: false,
        };

        let _ = player.step(intent, 1.0 / 60.0, &grid, 1_000);

        assert_eq!(player.body.velocity.x, -PLAYER_SPEED);
    }

    #[test]
    fn jump_from_ground_launches_upward() {
        let grid = flat_ground();
        let mut player = grounded_player(&grid);
        let bottom = player.body.bounds.bottom();
        let dt = 1.0 / 60.0;

        let step = player.step(
            MovementIntent {
                jump: true,
                ..MovementIntent::IDLE
            },
            dt,
            &grid,
            1_000,
        );

        assert!(step.jumped);
        assert!(!player.body.on_ground);
        assert_eq!(player.body.velocity.y, -JUMP_STRENGTH + GRAVITY * dt);
        assert!(player.body.bounds.bottom() < bottom);
    }

    #[test]
    fn airborne_jump_leaves_velocity_unchanged() {
        let grid = flat_ground();
        let mut player = Player::spawn(5, 3, TILE);
        let dt = 1.0 / 60.0;
        let _ = player.step(MovementIntent::IDLE, dt, &grid, 1_000);
        assert!(!player.body.on_ground);
        let before = player.body.velocity.y;

        let step = player.step(
            MovementIntent {
                jump: true,
                ..MovementIntent::IDLE
            },
            dt,
            &grid,
            1_000,
        );

        assert!(!step.jumped);
        assert_eq!(player.body.velocity.y, before + GRAVITY * dt);
    }

    #[test]
    fn hits_push_away_from_the_enemy_and_drain_health() {
        let grid = flat_ground();
        let mut player = grounded_player(&grid);
        let left = player.body.bounds.left();

        let health = player.take_hit(player.body.bounds.center_x() + 3, &grid);

        assert_eq!(health, 2);
        assert_eq!(player.body.bounds.left(), left - KNOCKBACK_PUSH);
        assert_eq!(player.body.velocity.y, KNOCKBACK_VELOCITY);

        let _ = player.take_hit(0, &grid);
        let _ = player.take_hit(0, &grid);
        assert_eq!(player.take_hit(0, &grid), 0);
        assert!(player.is_destroyed());
    }

    #[test]
    fn destroyed_player_ignores_intent() {
        let grid = flat_ground();
        let mut player = grounded_player(&grid);
        assert!(player.destroy(DestroyCause::Lava));
        assert!(!player.destroy(DestroyCause::FellOutOfWorld));

        let step = player.step(
            MovementIntent {
                right: true,
                jump: true,
                ..MovementIntent::IDLE
            },
            1.0 / 60.0,
            &grid,
            1_000,
        );

        assert!(!step.jumped);
        assert_eq!(player.body.velocity.x, 0.0);
        assert_eq!(player.snapshot().health, 0);
    }

    #[test]
    fn enemy_reverses_at_range_bounds() {
        let mut enemy = Enemy::spawn(EnemyId::new(0), 0, 5, 1, 60.0, TILE);
        let anchor = enemy.body.bounds.center_x();

        enemy.patrol(0.5);
        assert_eq!(enemy.body.bounds.center_x(), anchor + TILE);
        assert_eq!(enemy.snapshot().facing, Facing::Left);

        enemy.patrol(1.0);
        assert_eq!(enemy.body.bounds.center_x(), anchor);
        assert_eq!(enemy.snapshot().facing, Facing::Right);
    }

    proptest! {
        #[test]
        fn enemy_patrol_never_escapes_its_range(
            speed in 1.0f32..400.0,
            range_tiles in 0i32..8,
            steps in prop::collection::vec(0.0f32..0.25, 1..400),
        ) {
            let mut enemy = Enemy::spawn(EnemyId::new(1), 6, 27, range_tiles, speed, TILE);
            let anchor = enemy.body.bounds.center_x();
            let upper = anchor + range_tiles * TILE;

            for dt in steps {
                enemy.patrol(dt);
                let center = enemy.snapshot().bounds.center_x();
                prop_assert!(center >= anchor && center <= upper);
            }
        }
    }
}
