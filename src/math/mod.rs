mod color;
mod rect;

pub use color::Rgba;
pub use rect::{Bounds, Rect};
