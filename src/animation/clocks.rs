//! Stateless periodic clocks driven only by frame index and frame rate.

use crate::foundation::core::{Fps, FrameIndex};

/// Cursor half period (visible, then hidden), in seconds.
pub const CURSOR_HALF_PERIOD_SECS: f64 = 0.53;
/// Time for one breathing swing (1.0 to 1.02 or back), in seconds.
pub const BREATHING_HALF_PERIOD_SECS: f64 = 2.0;
/// Resting breathing scale.
pub const BREATHING_MIN: f64 = 1.0;
/// Peak breathing scale.
pub const BREATHING_MAX: f64 = 1.02;
/// One terminal line appears every this many seconds.
pub const TERMINAL_LINE_INTERVAL_SECS: f64 = 0.5;

/// Natural frequency of the breathing response, in rad/s.
const BREATHING_OMEGA: f64 = 100.0 / 11.0;

/// `floor(frame / (fps * half_period_secs)) mod 2 == 0`.
pub fn cursor_visible(frame: FrameIndex, fps: Fps, half_period_secs: f64) -> bool {
    let span = fps.as_f64() * half_period_secs;
    if span.is_nan() || span <= 0.0 {
        return true;
    }
    let phase = (frame.0 as f64 / span).floor() as u64;
    phase % 2 == 0
}

/// UI breathing scale in `[BREATHING_MIN, BREATHING_MAX)`.
///
/// A critically damped response settles from 1.0 toward 1.02 over one half period, then plays
/// back in reverse, so the value is continuous at every swing boundary and never overshoots.
pub fn breathing_scale(frame: FrameIndex, fps: Fps, half_period_secs: f64) -> f64 {
    if !(half_period_secs > 0.0 && half_period_secs.is_finite()) {
        return BREATHING_MIN;
    }
    let period = half_period_secs * 2.0;
    let phase = fps.frames_to_secs(frame.0).rem_euclid(period);
    let t = if phase < half_period_secs {
        phase
    } else {
        period - phase
    };
    BREATHING_MIN + (BREATHING_MAX - BREATHING_MIN) * spring_progress(t)
}

/// Unit step response of a critically damped oscillator: `1 - e^(-wt) (1 + wt)`.
fn spring_progress(t: f64) -> f64 {
    let x = BREATHING_OMEGA * t.max(0.0);
    1.0 - (-x).exp() * (1.0 + x)
}

/// Terminal lines shown at `frame`: `min(floor(frame / (fps * interval)) + 1, line_count)`.
pub fn terminal_lines_visible(
    frame: FrameIndex,
    fps: Fps,
    interval_secs: f64,
    line_count: usize,
) -> usize {
    let span = fps.as_f64() * interval_secs;
    if span.is_nan() || span <= 0.0 {
        return line_count;
    }
    let shown = (frame.0 as f64 / span).floor() as usize;
    shown.saturating_add(1).min(line_count)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clocks.rs"]
mod tests;
