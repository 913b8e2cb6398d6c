pub mod clock;
pub mod sink;

pub use clock::*;
pub use sink::*;
