use std::time::Duration;

use platformer_core::{
    CoinId, Command, DestroyCause, EnemyId, Event, MovementIntent, Phase, RunReport,
};
use platformer_system_analytics::Analytics;
use platformer_world::{self as world, query, World};

const FRAME: Duration = Duration::from_millis(20);

#[test]
fn report_tracks_scoring_damage_and_outcome() {
    let mut analytics = Analytics::new();

    analytics.handle(&[
        Event::SessionReset,
        Event::PhaseChanged {
            from: Phase::Menu,
            to: Phase::Playing,
        },
        Event::TimeAdvanced { dt: FRAME },
        Event::PlayerJumped,
        Event::CoinCollected {
            coin: CoinId::new(2),
            score: 10,
        },
        Event::TimeAdvanced { dt: FRAME },
        Event::PlayerDamaged {
            enemy: EnemyId::new(0),
            health: 2,
        },
    ]);
    assert!(!analytics.is_finished());

    analytics.handle(&[
        Event::TimeAdvanced { dt: FRAME },
        Event::PlayerDestroyed {
            cause: DestroyCause::Lava,
        },
        Event::PhaseChanged {
            from: Phase::Playing,
            to: Phase::GameOver,
        },
    ]);

    assert!(analytics.is_finished());
    assert_eq!(
        analytics.report(),
        &RunReport {
            ticks: 3,
            elapsed_ms: 60,
            coins_collected: 1,
            score: 10,
            jumps: 1,
            hits_taken: 1,
            final_phase: Some(Phase::GameOver),
            destroyed_by: Some(DestroyCause::Lava),
        }
    );
}

#[test]
fn session_reset_discards_the_previous_run() {
    let mut analytics = Analytics::new();
    analytics.handle(&[
        Event::TimeAdvanced { dt: FRAME },
        Event::PlayerJumped,
        Event::PhaseChanged {
            from: Phase::Playing,
            to: Phase::Won,
        },
    ]);

    analytics.handle(&[
        Event::SessionReset,
        Event::PhaseChanged {
            from: Phase::Won,
            to: Phase::Playing,
        },
    ]);

    assert_eq!(
        analytics.report(),
        &RunReport {
            final_phase: Some(Phase::Playing),
            ..RunReport::default()
        }
    );
}

#[test]
fn report_agrees_with_the_world_after_a_scripted_run() {
    let mut world = World::new();
    let mut analytics = Analytics::new();
    let mut events = Vec::new();

    world::apply(&mut world, Command::StartSession, &mut events);
    for _ in 0..300 {
        world::apply(
            &mut world,
            Command::Tick {
                dt: FRAME,
                intent: MovementIntent {
                    left: true,
                    right: false,
                    jump: false,
                },
            },
            &mut events,
        );
    }
    analytics.handle(&events);

    let report = analytics.report();
    assert_eq!(report.ticks, query::tick_index(&world));
    assert_eq!(report.elapsed_ms, report.ticks * 20);
    assert_eq!(report.score, query::score(&world));
    assert_eq!(report.final_phase, Some(query::phase(&world)));
    assert_eq!(report.final_phase, Some(Phase::GameOver));
    assert_eq!(report.destroyed_by, Some(DestroyCause::FellOutOfWorld));
}
