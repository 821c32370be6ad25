use crate::foundation::error::{CodecastError, CodecastResult};

/// Zero-based global frame index.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Convert a signed index supplied by a host render loop, rejecting negatives.
    pub fn from_signed(frame: i64) -> CodecastResult<Self> {
        u64::try_from(frame)
            .map(Self)
            .map_err(|_| CodecastError::validation(format!("frame index must be >= 0, got {frame}")))
    }
}

/// Half-open frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> CodecastResult<Self> {
        if start.0 > end.0 {
            return Err(CodecastError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// `true` when the range holds no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// `true` when `f` lies in `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Integer frame rate in frames per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Fps(u32);

impl Fps {
    /// Build a frame rate, rejecting zero.
    pub fn new(fps: u32) -> CodecastResult<Self> {
        if fps == 0 {
            return Err(CodecastError::validation("fps must be > 0"));
        }
        Ok(Self(fps))
    }

    /// Build a frame rate from a signed value supplied at an API boundary.
    pub fn from_signed(fps: i64) -> CodecastResult<Self> {
        let v = u32::try_from(fps)
            .map_err(|_| CodecastError::validation(format!("fps must be > 0, got {fps}")))?;
        Self::new(v)
    }

    /// Frames per second as an integer.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Frames per second as `f64`.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// Timeline position of the start of `frame`, in seconds.
    pub fn frames_to_secs(self, frame: u64) -> f64 {
        frame as f64 / self.as_f64()
    }

    /// `floor(secs * fps)`, saturating at zero.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }

    /// `floor(secs * fps)`, or `None` when the product is negative, non-finite, or past `u64`.
    pub fn secs_to_frames_checked(self, secs: f64) -> Option<u64> {
        let frames = (secs * self.as_f64()).floor();
        // u64::MAX as f64 rounds up to 2^64, which itself does not fit.
        (frames.is_finite() && frames >= 0.0 && frames < u64::MAX as f64).then_some(frames as u64)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self(30)
    }
}

impl TryFrom<u32> for Fps {
    type Error = CodecastError;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl From<Fps> for u32 {
    fn from(fps: Fps) -> Self {
        fps.0
    }
}

/// One per-render-call question: "what does frame `frame` look like at `fps`?".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameQuery {
    /// Frame being resolved.
    pub frame: FrameIndex,
    /// Frame rate of the hosting render loop.
    pub fps: Fps,
}

impl FrameQuery {
    /// Validate raw host inputs: `frame >= 0` and `fps > 0`.
    pub fn new(frame: i64, fps: i64) -> CodecastResult<Self> {
        Ok(Self {
            frame: FrameIndex::from_signed(frame)?,
            fps: Fps::from_signed(fps)?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
