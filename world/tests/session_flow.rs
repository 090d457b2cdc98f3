use std::time::Duration;

use platformer_core::{Command, DestroyCause, Event, MovementIntent, Phase};
use platformer_world::{self as world, query, World, PLAYFIELD_HEIGHT, TILE_SIZE};

const FRAME: Duration = Duration::from_micros(16_667);

const LEFT: MovementIntent = MovementIntent {
    left: true,
    right: false,
    jump: false,
};

const RIGHT: MovementIntent = MovementIntent {
    left: false,
    right: true,
    jump: false,
};

fn run(world: &mut World, intent: MovementIntent, ticks: usize) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        world::apply(
            world,
            Command::Tick {
                dt: FRAME,
                intent,
            },
            &mut events,
        );
    }
    events
}

fn started() -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartSession, &mut events);
    assert_eq!(query::phase(&world), Phase::Playing);
    world
}

#[test]
fn walking_off_the_left_edge_ends_in_game_over() {
    let mut world = started();

    let events = run(&mut world, LEFT, 300);

    assert_eq!(query::phase(&world), Phase::GameOver);
    assert!(events.contains(&Event::PlayerDestroyed {
        cause: DestroyCause::FellOutOfWorld,
    }));
    assert_eq!(
        events.last(),
        Some(&Event::PhaseChanged {
            from: Phase::Playing,
            to: Phase::GameOver,
        })
    );
    let player = query::player(&world);
    assert!(player.bounds.top() > PLAYFIELD_HEIGHT + 200);
    assert_eq!(player.health, 0);
}

#[test]
fn restart_after_game_over_restores_the_opening_state() {
    let mut world = started();
    let opening_player = query::player(&world);
    let opening_enemies = query::enemy_view(&world).into_vec();
    let _ = run(&mut world, LEFT, 300);
    assert_eq!(query::phase(&world), Phase::GameOver);

    let mut events = Vec::new();
    world::apply(&mut world, Command::RestartSession, &mut events);

    assert_eq!(query::phase(&world), Phase::Playing);
    assert_eq!(query::score(&world), 0);
    assert_eq!(query::player(&world), opening_player);
    assert_eq!(query::player(&world).health, 3);
    assert_eq!(query::enemy_view(&world).into_vec(), opening_enemies);
    assert!(query::coin_view(&world).iter().all(|coin| !coin.collected));
}

#[test]
fn pillar_stops_a_player_walking_right() {
    let mut world = started();

    let events = run(&mut world, RIGHT, 240);

    assert_eq!(query::phase(&world), Phase::Playing);
    let player = query::player(&world);
    assert_eq!(player.bounds.right(), 28 * TILE_SIZE);
    assert!(player.on_ground);
    assert_eq!(player.velocity.x, 0.0);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::PlayerDamaged { .. })));
}

#[test]
fn each_tick_reports_elapsed_time() {
    let mut world = started();

    let events = run(&mut world, MovementIntent::IDLE, 5);

    let advanced = events
        .iter()
        .filter(|event| matches!(event, Event::TimeAdvanced { dt } if *dt == FRAME))
        .count();
    assert_eq!(advanced, 5);
    assert_eq!(query::tick_index(&world), 5);
}
