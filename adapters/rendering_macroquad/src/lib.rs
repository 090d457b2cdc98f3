#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the platformer.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! Every actor is drawn as a placeholder shape: boxes for the player and the
//! enemies, discs for coins and filled squares for tiles.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use platformer_core::Facing;
use platformer_rendering::{
    animation_frame, ActorPresentation, Color, CoinPresentation, FrameInput, Palette,
    Presentation, RenderingBackend, Scene, TextAnchor, TextLine,
};
use std::{collections::VecDeque, time::Duration};
use tracing::info;

const LEFT_KEYS: [KeyCode; 2] = [KeyCode::Left, KeyCode::A];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::Right, KeyCode::D];
const JUMP_KEYS: [KeyCode; 2] = [KeyCode::Up, KeyCode::W];
const CONFIRM_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::Enter];

const PLAYER_FRAME_PERIOD: Duration = Duration::from_millis(150);
const ENEMY_FRAME_PERIOD: Duration = Duration::from_millis(160);
const COIN_FRAME_PERIOD: Duration = Duration::from_millis(100);
const WALK_FRAMES: usize = 2;

/// Maps the set of held keys to the input of a single frame.
///
/// Arrows and WASD move, Up and W jump, Space and Enter confirm.
pub fn frame_input_from_keys<F>(is_down: F) -> FrameInput
where
    F: Fn(KeyCode) -> bool,
{
    let any = |keys: &[KeyCode]| keys.iter().any(|key| is_down(*key));
    FrameInput {
        left: any(&LEFT_KEYS),
        right: any(&RIGHT_KEYS),
        jump: any(&JUMP_KEYS),
        confirm: any(&CONFIRM_KEYS),
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame rate metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            palette,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.playfield.x.round() as i32,
            window_height: scene.playfield.y.round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut fps_counter = FpsCounter::default();

            loop {
                if is_key_pressed(KeyCode::Escape) {
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = frame_input_from_keys(is_key_down);

                update_scene(frame_dt, frame_input, &mut scene);

                let metrics = SceneMetrics::from_scene(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                macroquad::window::clear_background(to_macroquad_color(
                    palette.background(scene.phase),
                ));
                if scene.shows_level() {
                    draw_tiles(&scene, &palette, &metrics);
                    draw_coins(&scene, &palette, &metrics);
                    for enemy in &scene.enemies {
                        let frame = animation_frame(scene.elapsed, ENEMY_FRAME_PERIOD, WALK_FRAMES);
                        draw_actor(enemy, palette.enemy, frame, &palette, &metrics);
                    }
                    let frame = if scene.player.moving {
                        animation_frame(scene.elapsed, PLAYER_FRAME_PERIOD, WALK_FRAMES)
                    } else {
                        0
                    };
                    draw_actor(&scene.player, palette.player, frame, &palette, &metrics);
                }
                for line in scene.text_lines(&palette) {
                    draw_text_line(&line, &metrics);
                }

                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                    }) = fps_counter.record_frame(frame_dt)
                    {
                        info!(fps = per_second, trailing_ten_seconds, "frame rate");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Uniform scale and letterbox offset mapping playfield pixels to the screen.
#[derive(Clone, Copy, Debug)]
struct SceneMetrics {
    scale: f32,
    offset: Vec2,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let playfield = scene.playfield;
        let scale = if playfield.x <= f32::EPSILON || playfield.y <= f32::EPSILON {
            1.0
        } else {
            (screen_width / playfield.x).min(screen_height / playfield.y)
        };
        let offset = ((Vec2::new(screen_width, screen_height) - playfield * scale) * 0.5)
            .max(Vec2::ZERO);
        Self { scale, offset }
    }

    fn to_screen(&self, position: Vec2) -> Vec2 {
        self.offset + position * self.scale
    }
}

fn draw_tiles(scene: &Scene, palette: &Palette, metrics: &SceneMetrics) {
    let grid = scene.tile_grid;
    let side = grid.tile_size * metrics.scale;
    for tile in &scene.tiles {
        let Some(color) = palette.tile(tile.tile) else {
            continue;
        };
        let origin = metrics.to_screen(grid.tile_origin(tile.column, tile.row));
        macroquad::shapes::draw_rectangle(origin.x, origin.y, side, side, to_macroquad_color(color));
    }
}

fn draw_coins(scene: &Scene, palette: &Palette, metrics: &SceneMetrics) {
    // Two-frame shimmer standing in for the spinning coin sprite.
    let shimmer = animation_frame(scene.elapsed, COIN_FRAME_PERIOD, WALK_FRAMES);
    let fill = if shimmer == 0 {
        palette.gold
    } else {
        palette.gold.lighten(0.25)
    };
    for coin in &scene.coins {
        draw_coin(coin, fill, palette.white, metrics);
    }
}

fn draw_coin(coin: &CoinPresentation, fill: Color, outline: Color, metrics: &SceneMetrics) {
    let center = metrics.to_screen(coin.draw_center());
    let radius = coin.radius * metrics.scale;
    macroquad::shapes::draw_circle(center.x, center.y, radius, to_macroquad_color(fill));
    macroquad::shapes::draw_circle_lines(
        center.x,
        center.y,
        radius,
        metrics.scale.max(1.0),
        to_macroquad_color(outline),
    );
}

fn draw_actor(
    actor: &ActorPresentation,
    body: Color,
    frame: usize,
    palette: &Palette,
    metrics: &SceneMetrics,
) {
    let origin = metrics.to_screen(actor.origin);
    let size = actor.size * metrics.scale;
    let fill = if frame == 0 { body } else { body.lighten(0.2) };
    macroquad::shapes::draw_rectangle(origin.x, origin.y, size.x, size.y, to_macroquad_color(fill));

    let eye = eye_position(actor);
    let eye_screen = metrics.to_screen(eye);
    let eye_size = 3.0 * metrics.scale;
    macroquad::shapes::draw_rectangle(
        eye_screen.x,
        eye_screen.y,
        eye_size,
        eye_size,
        to_macroquad_color(palette.white),
    );
}

/// Top-left corner of the 3 px eye drawn on the side the actor faces.
fn eye_position(actor: &ActorPresentation) -> Vec2 {
    let inset = 2.0;
    let x = match actor.facing {
        Facing::Left => actor.origin.x + inset,
        Facing::Right => actor.origin.x + actor.size.x - inset - 3.0,
    };
    Vec2::new(x, actor.origin.y + inset)
}

fn draw_text_line(line: &TextLine, metrics: &SceneMetrics) {
    let font_size = (f32::from(line.font_size) * metrics.scale).round().max(1.0);
    let dimensions = macroquad::text::measure_text(&line.text, None, font_size as u16, 1.0);
    let anchor = metrics.to_screen(line.position);
    let (x, y) = match line.anchor {
        TextAnchor::Center => (
            anchor.x - dimensions.width * 0.5,
            anchor.y + dimensions.height * 0.5,
        ),
        TextAnchor::TopLeft => (anchor.x, anchor.y + dimensions.offset_y),
    };
    let _ = macroquad::text::draw_text(&line.text, x, y, font_size, to_macroquad_color(line.color));
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
