//! Range resolution for hosting render loops.
//!
//! Nothing here draws pixels: presenters consume the resolved states.

/// Stable digests of resolved states.
pub mod fingerprint;
/// Sequential and parallel range resolution.
pub mod pipeline;
