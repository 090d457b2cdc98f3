#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic analytics system that folds world events into a run report.

use std::time::Duration;

use platformer_core::{Event, Phase, RunReport};

/// Pure analytics system summarising the most recent session.
///
/// A [`Event::SessionReset`] discards the previous summary, so the report
/// always describes the session currently running or last finished.
#[derive(Debug, Default)]
pub struct Analytics {
    report: RunReport,
    elapsed: Duration,
}

impl Analytics {
    /// Creates a new analytics system with an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Summary accumulated so far.
    #[must_use]
    pub fn report(&self) -> &RunReport {
        &self.report
    }

    /// Reports whether the tracked session reached a terminal phase.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.report.final_phase, Some(Phase::GameOver | Phase::Won))
    }

    /// Consumes world events, updating the report.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::SessionReset => {
                    self.report = RunReport::default();
                    self.elapsed = Duration::ZERO;
                }
                Event::TimeAdvanced { dt } => {
                    self.report.ticks = self.report.ticks.saturating_add(1);
                    self.elapsed = self.elapsed.saturating_add(*dt);
                    self.report.elapsed_ms =
                        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX);
                }
                Event::PhaseChanged { to, .. } => self.report.final_phase = Some(*to),
                Event::PlayerJumped => self.report.jumps = self.report.jumps.saturating_add(1),
                Event::CoinCollected { score, .. } => {
                    self.report.coins_collected = self.report.coins_collected.saturating_add(1);
                    self.report.score = *score;
                }
                Event::PlayerDamaged { .. } => {
                    self.report.hits_taken = self.report.hits_taken.saturating_add(1);
                }
                Event::PlayerDestroyed { cause } => self.report.destroyed_by = Some(*cause),
            }
        }
    }
}
