//! Parser for the compact input scripts replayed by headless runs.
//!
//! A script is a comma separated list of segments. Each segment names the
//! actions held during it, joined by `+`, optionally followed by `*N` to hold
//! them for `N` ticks: `right*120,right+jump*5,idle*30`.

use platformer_core::MovementIntent;
use thiserror::Error;

const SEGMENT_DELIMITER: char = ',';
const ACTION_DELIMITER: char = '+';
const REPEAT_DELIMITER: char = '*';

/// Errors that can occur while parsing an input script.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// The script contained no segments.
    #[error("input script is empty")]
    Empty,
    /// A segment between two commas was blank.
    #[error("segment {index} is empty")]
    EmptySegment {
        /// Zero-based position of the segment.
        index: usize,
    },
    /// An action name was not recognised.
    #[error("unknown action `{0}` (expected left, right, jump or idle)")]
    UnknownAction(String),
    /// The repeat count was not a positive integer.
    #[error("invalid repeat count `{0}`")]
    InvalidRepeat(String),
}

/// Intent held for a number of consecutive ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ScriptSegment {
    intent: MovementIntent,
    ticks: u32,
}

/// Parsed input script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct InputScript {
    segments: Vec<ScriptSegment>,
}

impl InputScript {
    pub(crate) fn parse(source: &str) -> Result<Self, ScriptError> {
        if source.trim().is_empty() {
            return Err(ScriptError::Empty);
        }

        let segments = source
            .split(SEGMENT_DELIMITER)
            .enumerate()
            .map(|(index, segment)| parse_segment(index, segment.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    /// Number of ticks the script spans.
    pub(crate) fn total_ticks(&self) -> u64 {
        self.segments
            .iter()
            .map(|segment| u64::from(segment.ticks))
            .sum()
    }

    /// Intent for every tick, in order.
    pub(crate) fn intents(&self) -> impl Iterator<Item = MovementIntent> + '_ {
        self.segments.iter().flat_map(|segment| {
            std::iter::repeat(segment.intent).take(segment.ticks as usize)
        })
    }
}

fn parse_segment(index: usize, segment: &str) -> Result<ScriptSegment, ScriptError> {
    if segment.is_empty() {
        return Err(ScriptError::EmptySegment { index });
    }

    let (actions, ticks) = match segment.split_once(REPEAT_DELIMITER) {
        Some((actions, repeat)) => (actions, parse_repeat(repeat.trim())?),
        None => (segment, 1),
    };

    let mut intent = MovementIntent::IDLE;
    for action in actions.split(ACTION_DELIMITER).map(str::trim) {
        match action {
            "left" => intent.left = true,
            "right" => intent.right = true,
            "jump" => intent.jump = true,
            "idle" => {}
            other => return Err(ScriptError::UnknownAction(other.to_owned())),
        }
    }

    Ok(ScriptSegment { intent, ticks })
}

fn parse_repeat(repeat: &str) -> Result<u32, ScriptError> {
    match repeat.parse::<u32>() {
        Ok(ticks) if ticks > 0 => Ok(ticks),
        _ => Err(ScriptError::InvalidRepeat(repeat.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_combined_actions_and_repeats() {
        let script = InputScript::parse("right*3, right+jump*2,idle").expect("valid script");

        assert_eq!(script.total_ticks(), 6);
        let intents: Vec<MovementIntent> = script.intents().collect();
        assert_eq!(intents.len(), 6);
        assert!(intents[0].right && !intents[0].jump);
        assert!(intents[3].right && intents[3].jump);
        assert_eq!(intents[5], MovementIntent::IDLE);
    }

    #[test]
    fn rejects_unknown_actions() {
        assert_eq!(
            InputScript::parse("right*3,dash*2"),
            Err(ScriptError::UnknownAction("dash".to_owned()))
        );
    }

    #[test]
    fn rejects_bad_repeat_counts() {
        assert_eq!(
            InputScript::parse("left*0"),
            Err(ScriptError::InvalidRepeat("0".to_owned()))
        );
        assert_eq!(
            InputScript::parse("left*many"),
            Err(ScriptError::InvalidRepeat("many".to_owned()))
        );
    }

    #[test]
    fn rejects_empty_scripts_and_segments() {
        assert_eq!(InputScript::parse("  "), Err(ScriptError::Empty));
        assert_eq!(
            InputScript::parse("left,,right"),
            Err(ScriptError::EmptySegment { index: 1 })
        );
    }

    #[test]
    fn error_messages_name_the_offending_token() {
        let error = InputScript::parse("hop").expect_err("unknown action");
        assert!(error.to_string().contains("`hop`"));
    }
}
