//! Scripted runs without a window.

use std::{fmt::Write as _, time::Duration};

use platformer_core::{Command, Event, Phase, RunReport};
use platformer_system_analytics::Analytics;
use platformer_world::{apply, query, World};
use tracing::{debug, info};

use crate::script::InputScript;

/// Starts a session and replays `script` at a fixed step until it runs out or the session ends.
pub(crate) fn run_script(script: &InputScript, dt: Duration) -> RunReport {
    let mut world = World::new();
    let mut analytics = Analytics::new();
    let mut events = Vec::new();

    apply(&mut world, Command::StartSession, &mut events);
    analytics.handle(&events);

    for intent in script.intents() {
        if query::phase(&world) != Phase::Playing {
            break;
        }
        events.clear();
        apply(&mut world, Command::Tick { dt, intent }, &mut events);
        for event in &events {
            if !matches!(event, Event::TimeAdvanced { .. }) {
                debug!(tick = query::tick_index(&world), ?event, "world event");
            }
        }
        analytics.handle(&events);
    }

    let report = analytics.report().clone();
    info!(
        ticks = report.ticks,
        score = report.score,
        phase = ?report.final_phase,
        "scripted run finished"
    );
    report
}

/// Renders a report as human readable lines.
pub(crate) fn format_report(report: &RunReport) -> String {
    let mut text = String::new();
    let phase = report
        .final_phase
        .map_or_else(|| "-".to_owned(), |phase| format!("{phase:?}"));
    let _ = writeln!(text, "phase:    {phase}");
    let _ = writeln!(text, "ticks:    {}", report.ticks);
    let _ = writeln!(text, "elapsed:  {} ms", report.elapsed_ms);
    let _ = writeln!(text, "score:    {}", report.score);
    let _ = writeln!(text, "coins:    {}", report.coins_collected);
    let _ = writeln!(text, "jumps:    {}", report.jumps);
    let _ = writeln!(text, "hits:     {}", report.hits_taken);
    if let Some(cause) = report.destroyed_by {
        let _ = writeln!(text, "destroyed by: {cause:?}");
    }
    text
}
