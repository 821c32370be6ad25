use rayon::prelude::*;

use crate::{
    eval::resolver::{FrameResolver, PanelOpts, ResolvedFrameState},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{CodecastError, CodecastResult},
    render::fingerprint::{FrameFingerprint, fingerprint_sequence},
    sync::coordinator::SyncCoordinator,
    timeline::builder::Timeline,
};

#[derive(Clone, Debug)]
/// Threading and chunking controls for multi-frame resolution.
pub struct ResolveThreading {
    /// Resolve chunks on a rayon pool when `true`.
    pub parallel: bool,
    /// Chunk size in frames.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for ResolveThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Counters and digest for one resolved range.
pub struct ResolveStats {
    /// Frames resolved.
    pub frames_total: u64,
    /// Frames with an active action.
    pub frames_active: u64,
    /// Order-sensitive digest of every resolved state.
    pub digest: FrameFingerprint,
}

/// Resolve every frame of `range`, sequentially or in parallel chunks.
///
/// Output is in frame order and identical for every threading configuration. Invalid panel
/// options are rejected before any frame is resolved.
#[tracing::instrument(skip(timeline, opts, threading))]
pub fn resolve_frames<'t>(
    timeline: &'t Timeline,
    range: FrameRange,
    opts: &'t PanelOpts,
    threading: &ResolveThreading,
) -> CodecastResult<(Vec<ResolvedFrameState<'t>>, ResolveStats)> {
    opts.validate()?;
    let len = range.len_frames();
    let mut out = Vec::with_capacity(len.min(1 << 16) as usize);

    if !threading.parallel {
        out.extend(
            (range.start.0..range.end.0)
                .map(|f| FrameResolver::state_at(timeline, FrameIndex(f), opts)),
        );
        return Ok(with_stats(out));
    }

    let pool = build_thread_pool(threading.threads)?;
    let chunk_size = normalized_chunk_size(threading.chunk_size);

    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = chunk_start.saturating_add(chunk_size).min(range.end.0);
        let mut frames: Vec<ResolvedFrameState<'t>> = pool.install(|| {
            (chunk_start..chunk_end)
                .into_par_iter()
                .map(|f| FrameResolver::state_at(timeline, FrameIndex(f), opts))
                .collect()
        });
        tracing::trace!(chunk_start, chunk_end, "chunk resolved");
        out.append(&mut frames);
        chunk_start = chunk_end;
    }

    Ok(with_stats(out))
}

/// Resolve the whole video: `[0, audio_end_frame)`.
pub fn resolve_render_range<'t>(
    timeline: &'t Timeline,
    opts: &'t PanelOpts,
    threading: &ResolveThreading,
) -> CodecastResult<(Vec<ResolvedFrameState<'t>>, ResolveStats)> {
    resolve_frames(
        timeline,
        SyncCoordinator::render_range(timeline),
        opts,
        threading,
    )
}

fn with_stats(frames: Vec<ResolvedFrameState<'_>>) -> (Vec<ResolvedFrameState<'_>>, ResolveStats) {
    let stats = ResolveStats {
        frames_total: frames.len() as u64,
        frames_active: frames.iter().filter(|s| s.active_action.is_some()).count() as u64,
        digest: fingerprint_sequence(&frames),
    };
    tracing::debug!(
        frames_total = stats.frames_total,
        frames_active = stats.frames_active,
        digest = %stats.digest,
        "range resolved"
    );
    (frames, stats)
}

fn build_thread_pool(threads: Option<usize>) -> CodecastResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CodecastError::validation(
            "resolve threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CodecastError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
