use crate::{
    animation::clocks,
    foundation::core::{FrameIndex, FrameQuery},
    foundation::error::{CodecastError, CodecastResult},
    script::model::CodeAction,
    timeline::builder::Timeline,
};

/// Terminal output shown under the editor when no log is supplied.
pub const DEFAULT_TERMINAL_LOG: &[&str] = &[
    "$ npm install",
    "added 1247 packages in 45s",
    "",
    "$ npm run dev",
    "> next dev",
    "",
    "  ▲ Next.js 14.0.0",
    "  - Local:        http://localhost:3000",
    "",
    "✓ Ready in 2.3s",
    "○ Compiling / ...",
    "✓ Compiled / in 1.2s",
];

/// Presentation knobs for the periodic clocks and the terminal feed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PanelOpts {
    /// Cursor visible/hidden half period, in seconds.
    pub cursor_half_period_secs: f64,
    /// Duration of one breathing swing, in seconds.
    pub breathing_half_period_secs: f64,
    /// Seconds between terminal lines.
    pub terminal_line_interval_secs: f64,
    /// Lines revealed in the terminal panel.
    pub terminal_log: Vec<String>,
}

impl Default for PanelOpts {
    fn default() -> Self {
        Self {
            cursor_half_period_secs: clocks::CURSOR_HALF_PERIOD_SECS,
            breathing_half_period_secs: clocks::BREATHING_HALF_PERIOD_SECS,
            terminal_line_interval_secs: clocks::TERMINAL_LINE_INTERVAL_SECS,
            terminal_log: DEFAULT_TERMINAL_LOG
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl PanelOpts {
    /// Parse options from JSON; missing fields keep their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> CodecastResult<Self> {
        let opts: Self = serde_json::from_reader(r)
            .map_err(|e| CodecastError::serde(format!("parse panel options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// All periods must be finite and > 0.
    pub fn validate(&self) -> CodecastResult<()> {
        for (name, v) in [
            ("cursor_half_period_secs", self.cursor_half_period_secs),
            ("breathing_half_period_secs", self.breathing_half_period_secs),
            ("terminal_line_interval_secs", self.terminal_line_interval_secs),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(CodecastError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Active action and typed prefix at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ActionState<'t> {
    /// Index of the active action in the script, if any.
    pub action_index: Option<usize>,
    /// The active action, if any.
    pub active_action: Option<&'t CodeAction>,
    /// Frames elapsed since the active action started (0 when idle).
    pub relative_frame: u64,
    /// Typed prefix of the active action's content.
    pub revealed_content: &'t str,
}

impl ActionState<'_> {
    fn idle() -> Self {
        Self {
            action_index: None,
            active_action: None,
            relative_frame: 0,
            revealed_content: "",
        }
    }
}

/// Editor caret after the revealed text, 1-based line and 0-based column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Caret {
    /// Line count of the revealed text.
    pub line: usize,
    /// Chars on the last revealed line.
    pub column: usize,
}

impl Caret {
    /// Caret position after `text`.
    pub fn after(text: &str) -> Self {
        let line = text.split('\n').count();
        let column = text.rsplit('\n').next().map_or(0, |l| l.chars().count());
        Self { line, column }
    }
}

/// Everything a presenter needs to draw one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedFrameState<'t> {
    /// Resolved frame.
    pub frame: FrameIndex,
    /// Index of the active action, if any.
    pub action_index: Option<usize>,
    /// Active action, if any.
    pub active_action: Option<&'t CodeAction>,
    /// Typed prefix of the active action's content.
    pub revealed_content: &'t str,
    /// Cursor blink state.
    pub cursor_visible: bool,
    /// Panel breathing scale in `[1.0, 1.02)`.
    pub breathing_scale: f64,
    /// Caret after the revealed text.
    pub caret: Caret,
    /// Status bar label: action kind, or `READY` when idle.
    pub status_label: &'static str,
    /// Terminal lines shown so far.
    pub terminal_lines: &'t [String],
}

/// Stateless resolver from a timeline and frame index to display state.
pub struct FrameResolver;

impl FrameResolver {
    /// Resolve a validated host query against `timeline`.
    ///
    /// The query's frame rate must be the one the timeline was built at, and `opts` must pass
    /// [`PanelOpts::validate`].
    #[tracing::instrument(level = "trace", skip(timeline, opts))]
    pub fn resolve<'t>(
        timeline: &'t Timeline,
        query: FrameQuery,
        opts: &'t PanelOpts,
    ) -> CodecastResult<ResolvedFrameState<'t>> {
        opts.validate()?;
        if query.fps != timeline.fps() {
            return Err(CodecastError::validation(format!(
                "query fps {} does not match timeline fps {}",
                query.fps.get(),
                timeline.fps().get()
            )));
        }
        Ok(Self::state_at(timeline, query.frame, opts))
    }

    /// Active action and revealed content at `frame`.
    pub fn resolve_action(timeline: &Timeline, frame: FrameIndex) -> ActionState<'_> {
        let fps = timeline.fps();
        let current_secs = fps.frames_to_secs(frame.0);
        let Some((idx, iv)) = timeline.interval_at_secs(current_secs) else {
            return ActionState::idle();
        };

        let relative_frame = frame.0.saturating_sub(iv.start_frame.0);
        ActionState {
            action_index: Some(idx),
            active_action: Some(&iv.action),
            relative_frame,
            revealed_content: iv.reveal().revealed(&iv.action.content, relative_frame),
        }
    }

    /// Full display state at `frame`. Infallible for a built timeline.
    pub fn state_at<'t>(
        timeline: &'t Timeline,
        frame: FrameIndex,
        opts: &'t PanelOpts,
    ) -> ResolvedFrameState<'t> {
        let fps = timeline.fps();
        let action = Self::resolve_action(timeline, frame);
        let shown = clocks::terminal_lines_visible(
            frame,
            fps,
            opts.terminal_line_interval_secs,
            opts.terminal_log.len(),
        );

        ResolvedFrameState {
            frame,
            action_index: action.action_index,
            active_action: action.active_action,
            revealed_content: action.revealed_content,
            cursor_visible: clocks::cursor_visible(frame, fps, opts.cursor_half_period_secs),
            breathing_scale: clocks::breathing_scale(frame, fps, opts.breathing_half_period_secs),
            caret: Caret::after(action.revealed_content),
            status_label: action.active_action.map_or("READY", |a| a.kind.label()),
            terminal_lines: &opts.terminal_log[..shown],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/resolver.rs"]
mod tests;
