//! Overlap tests between the player and the other actors.

use platformer_core::{CoinId, CoinSnapshot, EnemyId, PixelRect};

use crate::{
    actors::{Enemy, Player},
    level::TileGrid,
};

pub(crate) const COIN_SIZE: i32 = 14;
pub(crate) const COIN_REWARD: u32 = 10;

/// Radians per second the cosmetic bob advances.
const BOB_RATE: f32 = 6.0;

#[derive(Clone, Debug)]
pub(crate) struct Coin {
    pub(crate) id: CoinId,
    bounds: PixelRect,
    collected: bool,
    bob_phase: f32,
}

impl Coin {
    pub(crate) fn spawn(id: CoinId, column: i32, row: i32, tile_size: i32) -> Self {
        let mut bounds = PixelRect::new(0, 0, COIN_SIZE, COIN_SIZE);
        bounds.set_center_x(column * tile_size + tile_size / 2);
        bounds.set_center_y(row * tile_size + tile_size / 2);
        Self {
            id,
            bounds,
            collected: false,
            bob_phase: 0.0,
        }
    }

    pub(crate) fn is_collected(&self) -> bool {
        self.collected
    }

    pub(crate) fn snapshot(&self) -> CoinSnapshot {
        CoinSnapshot {
            id: self.id,
            bounds: self.bounds,
            collected: self.collected,
            bob_phase: self.bob_phase,
        }
    }
}

/// Advances every coin's bob and collects the ones the player overlaps.
///
/// Returns the collected coins paired with the score after each reward.
pub(crate) fn collect_coins(
    coins: &mut [Coin],
    player: &PixelRect,
    dt: f32,
    score: &mut u32,
) -> Vec<(CoinId, u32)> {
    let mut collected = Vec::new();
    for coin in coins.iter_mut() {
        coin.bob_phase += dt * BOB_RATE;
        if !coin.collected && coin.bounds.overlaps(player) {
            coin.collected = true;
            *score = score.saturating_add(COIN_REWARD);
            collected.push((coin.id, *score));
        }
    }
    collected
}

/// Patrols every enemy and applies damage for each one touching the player.
///
/// Contact is evaluated right after the enemy moves, so a knockback from one
/// enemy is visible to the next. A destroyed player takes no further damage.
/// Returns the enemies that hit the player paired with the health left after each hit.
pub(crate) fn resolve_enemy_contacts(
    enemies: &mut [Enemy],
    player: &mut Player,
    dt: f32,
    grid: &TileGrid,
) -> Vec<(EnemyId, u32)> {
    let mut hits = Vec::new();
    for enemy in enemies.iter_mut() {
        enemy.patrol(dt);
        if player.is_destroyed() {
            continue;
        }
        if player.body.bounds.overlaps(&enemy.body.bounds) {
            let health = player.take_hit(enemy.body.bounds.center_x(), grid);
            hits.push((enemy.id, health));
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use platformer_core::Tile;

    const TILE: i32 = 18;

    fn floor() -> TileGrid {
        let mut grid = TileGrid::new(40, 10, TILE);
        for column in 0..40 {
            grid.set(column, 8, Tile::Grass);
        }
        grid
    }

    #[test]
    fn coin_is_centred_on_its_tile() {
        let coin = Coin::spawn(CoinId::new(0), 8, 26, TILE);
        let bounds = coin.snapshot().bounds;
        assert_eq!(bounds.center_x(), 8 * TILE + 9);
        assert_eq!(bounds.center_y(), 26 * TILE + 9);
        assert_eq!(bounds.width(), COIN_SIZE);
    }

    #[test]
    fn coins_are_collected_once() {
        let mut coins = vec![
            Coin::spawn(CoinId::new(0), 2, 2, TILE),
            Coin::spawn(CoinId::new(1), 20, 2, TILE),
        ];
        let player = coins[0].snapshot().bounds;
        let mut score = 0;

        let first = collect_coins(&mut coins, &player, 0.1, &mut score);
        let second = collect_coins(&mut coins, &player, 0.1, &mut score);

        assert_eq!(first, vec![(CoinId::new(0), COIN_REWARD)]);
        assert!(second.is_empty());
        assert_eq!(score, COIN_REWARD);
        assert!(coins[0].is_collected());
        assert!(!coins[1].is_collected());
    }

    #[test]
    fn bob_advances_for_collected_coins_too() {
        let mut coins = vec![Coin::spawn(CoinId::new(0), 2, 2, TILE)];
        let player = coins[0].snapshot().bounds;
        let mut score = 0;

        let _ = collect_coins(&mut coins, &player, 0.5, &mut score);
        let _ = collect_coins(&mut coins, &player, 0.5, &mut score);

        assert!((coins[0].snapshot().bob_phase - 6.0).abs() < 1e-5);
    }

    #[test]
    fn knockback_separates_the_player_after_a_hit() {
        let grid = floor();
        let mut player = Player::spawn(10, 8, TILE);
        let mut enemies = vec![Enemy::spawn(EnemyId::new(3), 10, 8, 0, 40.0, TILE)];

        let hits = resolve_enemy_contacts(&mut enemies, &mut player, 1.0 / 60.0, &grid);
        assert_eq!(hits, vec![(EnemyId::new(3), 2)]);

        // Pushed 20 px away, so the next tick no longer overlaps.
        let hits = resolve_enemy_contacts(&mut enemies, &mut player, 1.0 / 60.0, &grid);
        assert!(hits.is_empty());
    }

    #[test]
    fn pinned_player_loses_health_every_tick() {
        let mut grid = floor();
        for row in 0..8 {
            grid.set(11, row, Tile::Stone);
        }
        let mut player = Player::spawn(10, 8, TILE);
        let mut enemies = vec![Enemy::spawn(EnemyId::new(0), 10, 8, 0, 0.0, TILE)];

        let drained: Vec<Vec<(EnemyId, u32)>> = (0..3)
            .map(|_| resolve_enemy_contacts(&mut enemies, &mut player, 1.0 / 60.0, &grid))
            .collect();

        assert_eq!(
            drained,
            vec![
                vec![(EnemyId::new(0), 2)],
                vec![(EnemyId::new(0), 1)],
                vec![(EnemyId::new(0), 0)],
            ]
        );
        assert_eq!(player.body.bounds.right(), 11 * TILE);
        assert!(player.is_destroyed());
    }

    #[test]
    fn destroyed_player_is_not_hit() {
        let grid = floor();
        let mut player = Player::spawn(10, 8, TILE);
        let _ = player.destroy(platformer_core::DestroyCause::Lava);
        let mut enemies = vec![Enemy::spawn(EnemyId::new(0), 10, 8, 0, 40.0, TILE)];

        let hits = resolve_enemy_contacts(&mut enemies, &mut player, 1.0 / 60.0, &grid);

        assert!(hits.is_empty());
    }
}
