mod budget;
mod color;
mod placement;

pub use budget::{safe_duration, MIN_SAFETY_MARGIN_MS, MIN_USABLE_MS};
pub use color::Rgb;
pub use placement::place;
