/// Cursor blink, breathing and terminal feed clocks.
pub mod clocks;
