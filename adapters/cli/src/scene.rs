//! Translation of world queries into the rendering scene.

use anyhow::Result;
use glam::Vec2;
use platformer_core::{PixelRect, Tile};
use platformer_rendering::{
    ActorPresentation, CoinPresentation, HudPresentation, Scene, TileGridPresentation,
    TilePresentation,
};
use platformer_system_bootstrap::Bootstrap;
use platformer_world::{query, World};

/// Horizontal speed above which an actor is drawn walking.
const MOVING_THRESHOLD: f32 = 10.0;

/// Builds the initial scene, including the static level tiles.
pub(crate) fn build_scene(world: &World, bootstrap: &Bootstrap) -> Result<Scene> {
    let grid = bootstrap.tile_grid(world);
    let playfield = bootstrap.playfield(world);
    let tile_grid =
        TileGridPresentation::new(grid.columns(), grid.rows(), grid.tile_size() as f32)?;

    let mut scene = Scene::new(
        Vec2::new(playfield.width() as f32, playfield.height() as f32),
        tile_grid,
        bootstrap.welcome_banner(world),
    );
    scene.tiles = grid
        .tiles()
        .filter(|(_, tile)| *tile != Tile::Empty)
        .map(|(coord, tile)| TilePresentation {
            column: coord.column(),
            row: coord.row(),
            tile,
        })
        .collect();
    refresh_scene(world, &mut scene);
    Ok(scene)
}

/// Copies the dynamic parts of the world into the scene.
pub(crate) fn refresh_scene(world: &World, scene: &mut Scene) {
    let player = query::player(world);
    scene.player = ActorPresentation {
        origin: origin(&player.bounds),
        size: size(&player.bounds),
        facing: player.facing,
        moving: player.velocity.x.abs() > MOVING_THRESHOLD,
    };

    scene.enemies.clear();
    scene
        .enemies
        .extend(query::enemy_view(world).iter().map(|enemy| ActorPresentation {
            origin: origin(&enemy.bounds),
            size: size(&enemy.bounds),
            facing: enemy.facing,
            moving: true,
        }));

    scene.coins.clear();
    scene.coins.extend(
        query::coin_view(world)
            .iter()
            .filter(|coin| !coin.collected)
            .map(|coin| CoinPresentation {
                center: Vec2::new(coin.bounds.center_x() as f32, coin.bounds.center_y() as f32),
                radius: coin.bounds.width() as f32 * 0.5,
                bob_phase: coin.bob_phase,
            }),
    );

    scene.hud = HudPresentation {
        health: player.health,
        score: query::score(world),
    };
    scene.phase = query::phase(world);
}

fn origin(bounds: &PixelRect) -> Vec2 {
    Vec2::new(bounds.left() as f32, bounds.top() as f32)
}

fn size(bounds: &PixelRect) -> Vec2 {
    Vec2::new(bounds.width() as f32, bounds.height() as f32)
}
