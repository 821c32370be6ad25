//! Deterministic typing cadence.
//!
//! Each character waits a pseudo-random 50..150 ms after the previous one, keyed only by its
//! index, so "how much is typed by frame N" can be recomputed anywhere without history.
//! Opening brackets add a 500 ms pause.
//!
//! Indices count UTF-16 code units, the unit the script generator's consumers index strings by.
//! A char outside the Basic Multilingual Plane spends one delay per surrogate and is revealed
//! whole once its last unit has elapsed.

use crate::foundation::core::Fps;

const HASH_MUL: u64 = 9301;
const HASH_ADD: u64 = 49297;
const HASH_MOD: u64 = 233_280;

/// Fastest per-character delay, in milliseconds.
pub const BASE_DELAY_MS: f64 = 50.0;
/// Width of the per-character jitter band, in milliseconds.
pub const JITTER_MS: f64 = 100.0;
/// Extra pause after an opening bracket, in milliseconds.
pub const BRACKET_PAUSE_MS: f64 = 500.0;

/// Delay before `ch` (at UTF-16 offset `index`) appears, relative to the previous unit.
pub fn typing_delay_ms(ch: char, index: usize) -> f64 {
    let base = jitter_delay_ms(index);
    if is_opening_bracket(ch) {
        base + BRACKET_PAUSE_MS
    } else {
        base
    }
}

fn jitter_delay_ms(index: usize) -> f64 {
    // (i * a + c) mod m == ((i mod m) * a + c) mod m; reducing first keeps u64 from overflowing.
    let i = index as u64 % HASH_MOD;
    let hash = (i * HASH_MUL + HASH_ADD) % HASH_MOD;
    let normalized = hash as f64 / HASH_MOD as f64;
    BASE_DELAY_MS + normalized * JITTER_MS
}

/// Add the delays of every UTF-16 unit of `ch` to `accumulated_ms`, one unit at a time.
fn accumulate_char(accumulated_ms: f64, ch: char, utf16_index: usize) -> f64 {
    if ch.len_utf16() == 1 {
        return accumulated_ms + typing_delay_ms(ch, utf16_index);
    }
    // Surrogate halves are never brackets.
    (0..ch.len_utf16()).fold(accumulated_ms, |acc, k| {
        acc + jitter_delay_ms(utf16_index + k)
    })
}

fn is_opening_bracket(ch: char) -> bool {
    matches!(ch, '{' | '(' | '[')
}

/// `floor(ms / 1000 * fps)`.
pub fn ms_to_frames(ms: f64, fps: Fps) -> u64 {
    (ms / 1000.0 * fps.as_f64()).floor().max(0.0) as u64
}

/// Number of leading chars of `content` visible `relative_frame` frames into its action.
///
/// Reference walk over the content; [`RevealTable`] memoizes the same accumulation.
pub fn reveal_cutoff_scan(content: &str, relative_frame: u64, fps: Fps) -> usize {
    let mut accumulated_ms = 0.0;
    let mut utf16_index = 0;
    let mut cutoff = 0;
    for (i, ch) in content.chars().enumerate() {
        accumulated_ms = accumulate_char(accumulated_ms, ch, utf16_index);
        utf16_index += ch.len_utf16();
        if relative_frame >= ms_to_frames(accumulated_ms, fps) {
            cutoff = i + 1;
        } else {
            break;
        }
    }
    cutoff
}

/// Per-action prefix table of reveal frames, built once per timeline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealTable {
    /// Relative frame at which char `i` becomes visible. Non-decreasing.
    reveal_frames: Vec<u64>,
    /// Byte offset just past char `i`.
    prefix_ends: Vec<usize>,
}

impl RevealTable {
    /// Accumulate the typing delays of `content` at `fps`.
    pub fn new(content: &str, fps: Fps) -> Self {
        let mut reveal_frames = Vec::with_capacity(content.len());
        let mut prefix_ends = Vec::with_capacity(content.len());
        let mut accumulated_ms = 0.0;
        let mut utf16_index = 0;

        for (byte_idx, ch) in content.char_indices() {
            accumulated_ms = accumulate_char(accumulated_ms, ch, utf16_index);
            utf16_index += ch.len_utf16();
            reveal_frames.push(ms_to_frames(accumulated_ms, fps));
            prefix_ends.push(byte_idx + ch.len_utf8());
        }

        Self {
            reveal_frames,
            prefix_ends,
        }
    }

    /// Number of chars covered by the table.
    pub fn len(&self) -> usize {
        self.reveal_frames.len()
    }

    /// `true` for empty content.
    pub fn is_empty(&self) -> bool {
        self.reveal_frames.is_empty()
    }

    /// Largest prefix length whose reveal frame is `<= relative_frame`.
    pub fn cutoff(&self, relative_frame: u64) -> usize {
        self.reveal_frames.partition_point(|&f| f <= relative_frame)
    }

    /// Relative frame at which the whole content is visible.
    pub fn full_reveal_frame(&self) -> u64 {
        self.reveal_frames.last().copied().unwrap_or(0)
    }

    /// Visible prefix of `content`, which must be the string the table was built from.
    pub fn revealed<'c>(&self, content: &'c str, relative_frame: u64) -> &'c str {
        let cutoff = self.cutoff(relative_frame);
        let end = match cutoff {
            0 => 0,
            n => self.prefix_ends[n - 1],
        };
        &content[..end]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/typing.rs"]
mod tests;
