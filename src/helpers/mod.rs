//! Helper functions shared by the renderer and the page templates

mod date;
mod html;

pub use date::*;
pub use html::*;
