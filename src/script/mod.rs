//! Script boundary: the ordered code actions produced by the external script generator.

/// Action and script types with JSON loading.
pub mod model;
/// Built-in demo script.
pub mod sample;
