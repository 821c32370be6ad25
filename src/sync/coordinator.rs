use crate::{
    foundation::core::{Fps, FrameIndex, FrameRange},
    timeline::builder::Timeline,
};

/// Sample rate audio collaborators mix narration at.
pub const MIX_SAMPLE_RATE: u32 = 48_000;

/// Where the narration audio lives.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "snake_case")]
pub enum NarrationSource {
    /// Fetched by URL.
    Remote(String),
    /// Served from the render job's static asset directory.
    Static(String),
}

impl NarrationSource {
    /// Classify a stored audio URL. Empty URLs mean "no narration".
    pub fn from_url(url: &str) -> Option<Self> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }
        if url.starts_with("http") {
            return Some(Self::Remote(url.to_string()));
        }
        Some(Self::Static(url.replacen("/uploads/", "", 1)))
    }
}

/// Narration track placement handed to the audio mixer.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NarrationTrack {
    /// Audio location.
    pub source: NarrationSource,
    /// Frames the narration plays over; always starts at 0.
    pub range: FrameRange,
    /// One past the last sample at [`MIX_SAMPLE_RATE`].
    pub end_sample: u64,
}

/// Single source of truth for how long a tutorial video runs.
pub struct SyncCoordinator;

impl SyncCoordinator {
    /// `floor(total_duration_secs * fps)`: the frame the narration stops at.
    pub fn audio_end_frame(timeline: &Timeline) -> FrameIndex {
        FrameIndex(
            timeline
                .fps()
                .secs_to_frames_floor(timeline.total_duration_secs()),
        )
    }

    /// Frames to render, `[0, audio_end_frame)`.
    pub fn render_range(timeline: &Timeline) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: Self::audio_end_frame(timeline),
        }
    }

    /// Narration placement for `audio_url`, or `None` when the tutorial has no audio.
    #[tracing::instrument(skip(timeline))]
    pub fn narration_track(timeline: &Timeline, audio_url: &str) -> Option<NarrationTrack> {
        let source = NarrationSource::from_url(audio_url)?;
        let range = Self::render_range(timeline);
        let end_sample = frame_to_sample(range.len_frames(), timeline.fps(), MIX_SAMPLE_RATE);
        tracing::debug!(end_frame = range.end.0, end_sample, "narration track placed");
        Some(NarrationTrack {
            source,
            range,
            end_sample,
        })
    }
}

/// Frames to samples, rounding half up.
pub fn frame_to_sample(frame_delta: u64, fps: Fps, sample_rate: u32) -> u64 {
    let num = u128::from(frame_delta) * u128::from(sample_rate);
    let den = u128::from(fps.get());
    ((num + (den / 2)) / den) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/sync/coordinator.rs"]
mod tests;
