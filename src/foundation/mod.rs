/// Frame indices, ranges, frame rates and host queries.
pub mod core;
/// Error taxonomy.
pub mod error;
