//! Theme components for the TUI.
//!
//! This module provides [`Theme`], the Catppuccin Latte/Mocha palettes
//! behind the light/dark toggle.

mod colors;

pub use colors::Theme;
