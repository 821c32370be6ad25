use crate::{
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::error::{CodecastError, CodecastResult},
    script::model::{CodeAction, Script},
    timeline::typing::RevealTable,
};

/// One action placed on the timeline, `[start_secs, end_secs)`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Interval {
    /// The placed action.
    pub action: CodeAction,
    /// Absolute start, in seconds.
    pub start_secs: f64,
    /// Absolute end (exclusive), in seconds.
    pub end_secs: f64,
    /// `floor(start_secs * fps)`.
    pub start_frame: FrameIndex,
    /// `floor(end_secs * fps)`.
    pub end_frame: FrameIndex,
    #[serde(skip)]
    reveal: RevealTable,
}

impl Interval {
    /// Memoized reveal frames of this action's content.
    pub fn reveal(&self) -> &RevealTable {
        &self.reveal
    }

    /// Frame span `[start_frame, end_frame)`.
    pub fn frames(&self) -> FrameRange {
        FrameRange {
            start: self.start_frame,
            end: self.end_frame,
        }
    }

    /// `start_secs <= t < end_secs`.
    pub fn contains_secs(&self, t: f64) -> bool {
        self.start_secs <= t && t < self.end_secs
    }
}

/// Immutable placement of a script's actions, built once per render job.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Timeline {
    fps: Fps,
    intervals: Vec<Interval>,
    total_duration_secs: f64,
}

impl Timeline {
    /// Place `actions` back to back starting at 0 s.
    ///
    /// Fails on the first action whose duration is not a finite, positive number of seconds, or
    /// whose end time no longer maps to a frame index.
    /// Nothing is clamped: a bad duration would otherwise shift every later action against the
    /// narration.
    #[tracing::instrument(skip(actions), fields(actions = actions.len()))]
    pub fn build(actions: &[CodeAction], fps: Fps) -> CodecastResult<Self> {
        let mut intervals = Vec::with_capacity(actions.len());
        let mut current_secs = 0.0f64;

        for (i, action) in actions.iter().enumerate() {
            let d = action.duration_secs;
            if !(d.is_finite() && d > 0.0) {
                return Err(CodecastError::validation(format!(
                    "action {i} ('{}') has duration {d}s; durations must be finite and > 0",
                    action.file
                )));
            }

            let start_secs = current_secs;
            let end_secs = current_secs + d;
            let Some(end_frame) = fps.secs_to_frames_checked(end_secs) else {
                return Err(CodecastError::validation(format!(
                    "action {i} ('{}') ends at {end_secs}s, beyond u64 frames at {} fps",
                    action.file,
                    fps.get()
                )));
            };
            current_secs = end_secs;

            intervals.push(Interval {
                action: action.clone(),
                start_secs,
                end_secs,
                start_frame: FrameIndex(fps.secs_to_frames_floor(start_secs)),
                end_frame: FrameIndex(end_frame),
                reveal: RevealTable::new(&action.content, fps),
            });
        }

        tracing::debug!(
            intervals = intervals.len(),
            total_duration_secs = current_secs,
            "timeline built"
        );

        Ok(Self {
            fps,
            intervals,
            total_duration_secs: current_secs,
        })
    }

    /// Build from a script's action list.
    pub fn from_script(script: &Script, fps: Fps) -> CodecastResult<Self> {
        Self::build(&script.code_actions, fps)
    }

    /// Frame rate the frame indices were derived at.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Intervals in action order.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Sum of all action durations, in seconds.
    pub fn total_duration_secs(&self) -> f64 {
        self.total_duration_secs
    }

    /// Number of placed actions.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// `true` when no action was placed.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// First interval containing `t` seconds, with its index.
    pub fn interval_at_secs(&self, t: f64) -> Option<(usize, &Interval)> {
        // Intervals are contiguous and strictly increasing, so the first interval ending after
        // `t` is the only candidate.
        let idx = self.intervals.partition_point(|iv| iv.end_secs <= t);
        let iv = self.intervals.get(idx)?;
        iv.contains_secs(t).then_some((idx, iv))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
