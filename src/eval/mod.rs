/// Per-frame resolution of action, typed content and clocks.
pub mod resolver;
