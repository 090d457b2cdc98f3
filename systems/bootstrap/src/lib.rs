#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the platformer experience.

use platformer_core::PixelRect;
use platformer_world::{query, TileGrid, World};

/// Produces data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown on the title screen.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the tile grid required for rendering.
    #[must_use]
    pub fn tile_grid<'world>(&self, world: &'world World) -> &'world TileGrid {
        query::tile_grid(world)
    }

    /// Exposes the playfield the presentation layer should size its window to.
    #[must_use]
    pub fn playfield(&self, world: &World) -> PixelRect {
        query::playfield(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platformer_core::WELCOME_BANNER;

    #[test]
    fn greets_with_the_world_banner() {
        let world = World::new();
        let bootstrap = Bootstrap;

        assert_eq!(bootstrap.welcome_banner(&world), WELCOME_BANNER);
        assert_eq!(bootstrap.tile_grid(&world).columns(), 66);
        assert_eq!(bootstrap.playfield(&world), PixelRect::new(0, 0, 1200, 600));
    }
}
