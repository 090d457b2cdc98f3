#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns sampled player input into world commands.

use std::time::Duration;

use platformer_core::{Command, Event, MovementIntent, Phase};

/// Input sampled from the player's device for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlInput {
    /// Move left is held.
    pub left: bool,
    /// Move right is held.
    pub right: bool,
    /// Jump is held.
    pub jump: bool,
    /// Confirm (start or restart) is held.
    pub confirm: bool,
}

impl ControlInput {
    fn intent(self) -> MovementIntent {
        MovementIntent {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }
}

/// Tracks the session phase from world events and emits the commands a frame of input requests.
///
/// Confirm only fires on the frame it is first pressed, so holding it across
/// a game over does not immediately restart the session.
#[derive(Debug)]
pub struct Controls {
    phase: Phase,
    confirm_held: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            phase: Phase::Menu,
            confirm_held: false,
        }
    }
}

impl Controls {
    /// Creates a controls system that assumes the world starts in the menu.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase last announced by the world.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Consumes world events and the frame's input to emit commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        input: ControlInput,
        dt: Duration,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if let Event::PhaseChanged { to, .. } = event {
                self.phase = *to;
            }
        }

        let confirm_pressed = input.confirm && !self.confirm_held;
        self.confirm_held = input.confirm;

        match self.phase {
            Phase::Menu => {
                if confirm_pressed {
                    out.push(Command::StartSession);
                }
            }
            Phase::GameOver | Phase::Won => {
                if confirm_pressed {
                    out.push(Command::RestartSession);
                }
            }
            Phase::Playing => out.push(Command::Tick {
                dt,
                intent: input.intent(),
            }),
        }
    }
}
