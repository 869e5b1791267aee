//! Fixed-geometry text frames for the character display.

pub mod formatter;
pub mod frame;
pub mod layout;

// Re-export commonly used items
pub use formatter::format;
pub use frame::DisplayFrame;
pub use layout::{LayoutVersion, DISPLAY_COLS, DISPLAY_ROWS};
