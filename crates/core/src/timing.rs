//! Frame timing - the DAS/ARR input timeline and NES gravity cadence.

use serde::{Deserialize, Serialize};

/// Cyclic schedule of which frames accept horizontal or rotational inputs.
///
/// Parsed from strings over `{X, .}` such as `"X..."` (one input every four
/// frames), the usual way tap speeds are written down.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct InputTimeline {
    frames: Vec<bool>,
}

impl InputTimeline {
    pub fn parse(s: &str) -> Result<InputTimeline, TimelineError> {
        if s.is_empty() {
            return Err(TimelineError::Empty);
        }
        let frames = s
            .chars()
            .map(|c| match c {
                'X' => Ok(true),
                '.' => Ok(false),
                other => Err(TimelineError::InvalidChar(other)),
            })
            .collect::<Result<Vec<bool>, TimelineError>>()?;
        if !frames.contains(&true) {
            return Err(TimelineError::NoInputFrames);
        }
        Ok(InputTimeline { frames })
    }

    #[inline]
    pub fn is_input_frame(&self, frame: u32) -> bool {
        self.frames[frame as usize % self.frames.len()]
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl std::str::FromStr for InputTimeline {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputTimeline::parse(s)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimelineError {
    Empty,
    NoInputFrames,
    InvalidChar(char),
}

impl std::fmt::Display for TimelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimelineError::Empty => write!(f, "input frame timeline is empty"),
            TimelineError::NoInputFrames => {
                write!(f, "input frame timeline never allows an input")
            }
            TimelineError::InvalidChar(c) => {
                write!(f, "input frame timeline contains '{}', expected 'X' or '.'", c)
            }
        }
    }
}

impl std::error::Error for TimelineError {}

/// Frames per row of descent at a given level.
pub fn gravity(level: u32) -> u32 {
    if level <= 18 {
        3
    } else if level < 29 {
        2
    } else {
        1
    }
}

/// The piece descends on every Nth frame, where N is the gravity period.
#[inline]
pub fn is_gravity_frame(frame: u32, gravity: u32) -> bool {
    frame % gravity == gravity - 1
}

/// Lowest y the piece can occupy when its Nth consecutive input fires,
/// for N in 0..=6, assuming inputs start on frame 0.
///
/// The tuck finder consults this to reject tucks that would need the piece
/// higher than gravity allows by the time the prerequisite inputs have been
/// consumed.
pub fn min_y_by_inputs(timeline: &InputTimeline, gravity: u32, initial_y: i32) -> [i32; 7] {
    let mut values = [initial_y; 7];
    let mut y = initial_y;
    let mut inputs = 0;
    let mut frame = 0u32;
    while inputs < 6 {
        if timeline.is_input_frame(frame) {
            inputs += 1;
            values[inputs] = y;
        }
        if is_gravity_frame(frame, gravity) {
            y += 1;
        }
        frame += 1;
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(InputTimeline::parse(""), Err(TimelineError::Empty));
        assert_eq!(
            InputTimeline::parse("...."),
            Err(TimelineError::NoInputFrames)
        );
        assert_eq!(
            InputTimeline::parse("X..A"),
            Err(TimelineError::InvalidChar('A'))
        );
    }

    #[test]
    fn test_timeline_cycles() {
        let timeline = InputTimeline::parse("X...").unwrap();
        assert!(timeline.is_input_frame(0));
        assert!(!timeline.is_input_frame(1));
        assert!(!timeline.is_input_frame(3));
        assert!(timeline.is_input_frame(4));
        assert!(timeline.is_input_frame(400));
    }

    #[test]
    fn test_gravity_table() {
        assert_eq!(gravity(0), 3);
        assert_eq!(gravity(18), 3);
        assert_eq!(gravity(19), 2);
        assert_eq!(gravity(28), 2);
        assert_eq!(gravity(29), 1);
        assert_eq!(gravity(35), 1);
    }

    #[test]
    fn test_gravity_frames() {
        assert!(!is_gravity_frame(0, 3));
        assert!(!is_gravity_frame(1, 3));
        assert!(is_gravity_frame(2, 3));
        assert!(is_gravity_frame(5, 3));
        assert!(is_gravity_frame(0, 1));
    }

    #[test]
    fn test_min_y_by_inputs_tap_every_fourth_frame() {
        let timeline = InputTimeline::parse("X...").unwrap();
        // Inputs land on frames 0, 4, 8, 12, 16, 20; gravity 3 pulls the
        // piece down on frames 2, 5, 8, 11, 14, 17.
        let values = min_y_by_inputs(&timeline, 3, -1);
        assert_eq!(values, [-1, -1, 0, 1, 3, 4, 5]);
    }

    #[test]
    fn test_min_y_by_inputs_every_frame() {
        let timeline = InputTimeline::parse("X").unwrap();
        let values = min_y_by_inputs(&timeline, 1, -1);
        // Input k fires on frame k - 1, after k - 1 gravity drops.
        assert_eq!(values, [-1, -1, 0, 1, 2, 3, 4]);
    }
}
