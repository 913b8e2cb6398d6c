use crate::error::Result;
use crate::math::Rgb;
use crate::protocol::Command;

/// Destination for the commands a burst produces
pub trait DrawSink {
    /// Set one absolute canvas pixel
    fn draw(&mut self, x: u64, y: u64, color: Rgb) -> Result<()>;

    /// Signal the end of a burst, sent exactly once per burst
    fn finish_burst(&mut self) -> Result<()>;
}

/// Records commands in memory instead of sending them
impl DrawSink for Vec<Command> {
    fn draw(&mut self, x: u64, y: u64, color: Rgb) -> Result<()> {
        self.push(Command::Pixel { x, y, color });
        Ok(())
    }

    fn finish_burst(&mut self) -> Result<()> {
        self.push(Command::Done);
        Ok(())
    }
}
