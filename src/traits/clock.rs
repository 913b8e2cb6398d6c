use std::time::Duration;

/// Elapsed-time source polled by the draw scheduler
pub trait Clock {
    /// Restart the measurement from now
    fn restart(&mut self);

    /// Time since the last restart
    fn elapsed(&self) -> Duration;
}
