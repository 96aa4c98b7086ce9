//! UI building blocks for the jnana TUI.

pub mod layout;
pub mod widgets;

pub use layout::*;
pub use widgets::*;
