//! Text layout utilities.
//!
//! - [`wrap_text`] - Wrap message content to the transcript width
//! - [`visual_width`], [`truncate_to_width`] - Unicode-aware width handling

mod width;
mod wrap;

pub use width::{truncate_to_width, visual_width};
pub use wrap::wrap_text;
