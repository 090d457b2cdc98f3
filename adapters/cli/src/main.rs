#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the platformer.

mod headless;
mod scene;
mod script;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use platformer_core::{Command, Event, Phase};
use platformer_rendering::{FrameInput, Palette, Presentation, RenderingBackend};
use platformer_rendering_macroquad::MacroquadBackend;
use platformer_system_analytics::Analytics;
use platformer_system_bootstrap::Bootstrap;
use platformer_system_controls::{ControlInput, Controls};
use platformer_world::{apply, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::script::InputScript;

/// Longest step, in milliseconds, fed into the simulation.
const MAX_DT_MS: u64 = 100;
/// Longest frame the windowed loop feeds into the simulation.
const MAX_FRAME_DT: Duration = Duration::from_millis(MAX_DT_MS);

/// Command-line arguments for launching the platformer.
#[derive(Debug, Parser)]
#[command(name = "platformer", about = "Tile-based platformer", version)]
struct CliArgs {
    /// Enables or disables vertical sync for the window.
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    vsync: bool,
    /// Logs frame rate statistics while the window is open.
    #[arg(long)]
    show_fps: bool,
    /// Replays an input script without opening a window and prints a run report.
    #[arg(long)]
    headless: bool,
    /// Input script replayed by headless runs, e.g. `right*120,right+jump*5,idle*30`.
    #[arg(long, default_value = "right*120,right+jump*5,idle*30")]
    script: String,
    /// Fixed simulation step in milliseconds for headless runs.
    #[arg(
        long,
        value_name = "MS",
        default_value_t = 16,
        value_parser = clap::value_parser!(u64).range(1..=MAX_DT_MS)
    )]
    dt_ms: u64,
    /// Prints the headless run report as JSON.
    #[arg(long)]
    json: bool,
}

/// Entry point for the platformer command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    if args.headless {
        run_headless(&args)
    } else {
        run_windowed(&args)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run_headless(args: &CliArgs) -> Result<()> {
    let script = InputScript::parse(&args.script)
        .with_context(|| format!("failed to parse input script `{}`", args.script))?;
    info!(
        ticks = script.total_ticks(),
        dt_ms = args.dt_ms,
        "replaying input script"
    );

    let report = headless::run_script(&script, Duration::from_millis(args.dt_ms));
    if args.json {
        let json =
            serde_json::to_string_pretty(&report).context("failed to serialise run report")?;
        println!("{json}");
    } else {
        print!("{}", headless::format_report(&report));
    }
    Ok(())
}

fn run_windowed(args: &CliArgs) -> Result<()> {
    let mut world = World::new();
    let bootstrap = Bootstrap;
    let scene = scene::build_scene(&world, &bootstrap)?;
    let presentation = Presentation::new(
        bootstrap.welcome_banner(&world),
        Palette::CLASSIC,
        scene,
    );

    let mut controls = Controls::new();
    let mut analytics = Analytics::new();
    let mut events: Vec<Event> = Vec::new();
    let mut commands: Vec<Command> = Vec::new();

    let backend = MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps);

    backend.run(presentation, move |frame_dt, input, scene| {
        let dt = frame_dt.min(MAX_FRAME_DT);
        scene.elapsed = scene.elapsed.saturating_add(frame_dt);

        commands.clear();
        controls.handle(&events, control_input(input), dt, &mut commands);
        events.clear();
        for command in commands.drain(..) {
            apply(&mut world, command, &mut events);
        }

        let was_finished = analytics.is_finished();
        analytics.handle(&events);
        if analytics.is_finished() && !was_finished {
            let report = analytics.report();
            info!(
                phase = ?report.final_phase.unwrap_or(Phase::Menu),
                score = report.score,
                ticks = report.ticks,
                jumps = report.jumps,
                hits = report.hits_taken,
                "session finished"
            );
        }

        scene::refresh_scene(&world, scene);
    })
}

fn control_input(input: FrameInput) -> ControlInput {
    ControlInput {
        left: input.left,
        right: input.right,
        jump: input.jump,
        confirm: input.confirm,
    }
}
