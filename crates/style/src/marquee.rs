//! Keyframes of the marquee button text.
//!
//! All three keyframes move the span horizontally via `transform`:
//! - `centerToLeft`: from center to the left edge (`0` to `-travel`)
//! - `rightToLeft`: enters at the right edge and leaves at the left (`+travel` to `-travel`)
//! - `returnToCenter`: from the captured position back to `0`

use crate::animation::{
    AnimationList, AnimationSpec, FillMode, Iterations, Timing, parse_animation_list,
};
use std::time::Duration;

pub const CENTER_TO_LEFT: &str = "centerToLeft";
pub const RIGHT_TO_LEFT: &str = "rightToLeft";
pub const RETURN_TO_CENTER: &str = "returnToCenter";

pub const CURRENT_LEFT_VAR: &str = "--current-left";
pub const CURRENT_TRANSFORM_VAR: &str = "--current-transform";

pub const EDGE_RUN: Duration = Duration::from_secs(2);
pub const LOOP_PERIOD: Duration = Duration::from_secs(3);
pub const RETURN_RUN: Duration = Duration::from_millis(500);

/// Hover-enter list: one run to the edge, then a loop starting once that run ends.
pub fn enter_animation() -> AnimationList {
    AnimationList(vec![
        AnimationSpec::new(CENTER_TO_LEFT, EDGE_RUN)
            .timing(Timing::Linear)
            .iterations(Iterations::Count(1.0)),
        AnimationSpec::new(RIGHT_TO_LEFT, LOOP_PERIOD)
            .timing(Timing::Linear)
            .iterations(Iterations::Infinite)
            .delay(EDGE_RUN),
    ])
}

/// Hover-leave list: a single return that holds its end state.
pub fn return_animation() -> AnimationList {
    AnimationList(vec![
        AnimationSpec::new(RETURN_TO_CENTER, RETURN_RUN).fill(FillMode::Forwards),
    ])
}

/// Inputs the keyframes need beyond elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyframeInputs {
    /// Distance in px from center to either edge.
    pub travel_px: f32,
    /// Start of `returnToCenter`, read from `--current-transform`.
    pub return_from_px: f32,
}

/// Horizontal offset produced by an animation value at `elapsed` since it was
/// applied. `None` means no animation currently has an effect.
///
/// Later entries in the list win over earlier ones, as in CSS.
pub fn sample_translate(animation: &str, elapsed: Duration, inputs: KeyframeInputs) -> Option<f32> {
    let list = parse_animation_list(animation);
    let mut out = None;
    for spec in &list.0 {
        let Some(p) = spec.progress(elapsed) else {
            continue;
        };
        let travel = inputs.travel_px;
        let value = match spec.name.as_str() {
            CENTER_TO_LEFT => -travel * p,
            RIGHT_TO_LEFT => travel - 2.0 * travel * p,
            RETURN_TO_CENTER => inputs.return_from_px * (1.0 - p),
            other => {
                log::trace!("no keyframes named {other:?}");
                continue;
            }
        };
        out = Some(value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUTS: KeyframeInputs = KeyframeInputs {
        travel_px: 100.0,
        return_from_px: 0.0,
    };

    fn at(ms: u64) -> Option<f32> {
        sample_translate(&enter_animation().to_string(), Duration::from_millis(ms), INPUTS)
    }

    #[test]
    fn enter_moves_to_the_edge_then_loops() {
        assert_eq!(at(0), Some(0.0));
        assert_eq!(at(1000), Some(-50.0));
        // Loop starts at the right edge once the first run is over.
        assert_eq!(at(2000), Some(100.0));
        assert_eq!(at(3500), Some(0.0));
        // Period of three seconds.
        assert_eq!(at(5000), Some(100.0));
    }

    #[test]
    fn return_starts_from_captured_offset_and_holds() {
        let inputs = KeyframeInputs {
            travel_px: 100.0,
            return_from_px: -40.0,
        };
        let value = return_animation().to_string();
        assert_eq!(sample_translate(&value, Duration::ZERO, inputs), Some(-40.0));
        assert_eq!(sample_translate(&value, Duration::from_secs(3), inputs), Some(0.0));
    }

    #[test]
    fn unknown_and_empty_have_no_effect() {
        assert_eq!(sample_translate("", Duration::ZERO, INPUTS), None);
        assert_eq!(sample_translate("spin 1s", Duration::ZERO, INPUTS), None);
    }
}
