//! codecast resolves the display state of narrated coding-tutorial videos, one frame at a time.
//!
//! A tutorial script is an ordered list of code actions (create / update / delete a file), each
//! with a duration. The actions are placed back to back on a [`Timeline`]; for any frame index
//! the [`FrameResolver`] answers which action is on screen, how much of its content has been
//! "typed", and what the periodic UI clocks (cursor blink, panel breathing, terminal feed) show.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `Script` JSON from the external script generator
//! 2. **Build**: `Script + Fps -> Timeline` (validated once, immutable afterwards)
//! 3. **Resolve**: `Timeline + FrameIndex -> ResolvedFrameState` (pure, any order, any thread)
//! 4. **Sync**: `Timeline -> render range + NarrationTrack` via [`SyncCoordinator`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Stateless frames**: resolving frame N never depends on having resolved any other frame,
//!   so frames can be rendered out of order, retried, or split across workers.
//! - **Fail fast**: bad durations, negative frames and zero frame rates are rejected when the
//!   timeline or query is built; nothing is silently clamped.
//! - **Bit-reproducible typing**: the per-character delay generator is fixed arithmetic keyed
//!   by character index, identical on every run and machine.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod eval;
mod foundation;
mod render;
mod script;
mod sync;
mod timeline;

pub use animation::clocks::{
    BREATHING_HALF_PERIOD_SECS, BREATHING_MAX, BREATHING_MIN, CURSOR_HALF_PERIOD_SECS,
    TERMINAL_LINE_INTERVAL_SECS, breathing_scale, cursor_visible, terminal_lines_visible,
};
pub use eval::resolver::{
    ActionState, Caret, DEFAULT_TERMINAL_LOG, FrameResolver, PanelOpts, ResolvedFrameState,
};
pub use foundation::core::{Fps, FrameIndex, FrameQuery, FrameRange};
pub use foundation::error::{CodecastError, CodecastResult};
pub use render::fingerprint::{FrameFingerprint, fingerprint_sequence, fingerprint_state};
pub use render::pipeline::{ResolveStats, ResolveThreading, resolve_frames, resolve_render_range};
pub use script::model::{ActionKind, CodeAction, Script};
pub use script::sample::sample_script;
pub use sync::coordinator::{
    MIX_SAMPLE_RATE, NarrationSource, NarrationTrack, SyncCoordinator, frame_to_sample,
};
pub use timeline::builder::{Interval, Timeline};
pub use timeline::typing::{
    BASE_DELAY_MS, BRACKET_PAUSE_MS, JITTER_MS, RevealTable, ms_to_frames, reveal_cutoff_scan,
    typing_delay_ms,
};
