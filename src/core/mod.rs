pub mod clock;
pub mod scheduler;
pub mod session;

pub use clock::{SteppingClock, SystemClock};
pub use scheduler::{BurstReport, DrawProgress, DrawScheduler};
pub use session::{establish, Credentials, Session, SessionSummary};
