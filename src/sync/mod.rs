//! Audio/video duration agreement.

/// Render range and narration track placement.
pub mod coordinator;
