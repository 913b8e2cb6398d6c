pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod loaders;
pub mod math;
pub mod protocol;
pub mod traits;
pub mod transport;
pub mod types;

pub use crate::core::{BurstReport, DrawProgress, DrawScheduler, Session, SessionSummary};
pub use error::{ClientError, Result};
pub use loaders::{decode_image, load_image};
pub use math::{place, safe_duration};
