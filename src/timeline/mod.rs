/// Placement of actions into absolute intervals.
pub mod builder;
/// Deterministic per-character typing cadence.
pub mod typing;
