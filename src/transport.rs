use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use log::{debug, trace};

use crate::error::Result;
use crate::math::Rgb;
use crate::protocol::Command;
use crate::traits::DrawSink;

/// Newline-delimited duplex channel to the server
///
/// Writes are buffered; `PX` lines go out in bulk and the buffer is flushed
/// whenever a burst finishes or a request expects a reply.
pub struct LineTransport<R, W: Write> {
    reader: R,
    writer: BufWriter<W>,
    line: String,
}

pub type TcpTransport = LineTransport<BufReader<TcpStream>, TcpStream>;

impl TcpTransport {
    /// Connect to `address` ("host:port")
    ///
    /// Reads block forever unless `read_timeout` is given.
    pub fn connect(address: &str, read_timeout: Option<Duration>) -> Result<Self> {
        let stream = TcpStream::connect(address)?;
        stream.set_nodelay(true)?;
        stream.set_read_timeout(read_timeout)?;
        debug!("Connected to {}", address);

        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self::new(reader, stream))
    }

    /// Second handle on the socket that can stop a blocked read from another thread
    pub fn interrupt_handle(&self) -> Result<InterruptHandle> {
        Ok(InterruptHandle {
            stream: self.writer.get_ref().try_clone()?,
        })
    }
}

impl<R: BufRead, W: Write> LineTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer: BufWriter::new(writer),
            line: String::new(),
        }
    }

    /// Queue one command line
    pub fn send(&mut self, command: &Command) -> Result<()> {
        trace!("-> {}", command);
        writeln!(self.writer, "{command}")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Send a command and push it out immediately
    pub fn request(&mut self, command: &Command) -> Result<()> {
        self.send(command)?;
        self.flush()
    }

    /// Block until the next line arrives; `None` once the server closed the stream
    pub fn recv_line(&mut self) -> Result<Option<String>> {
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }

        let line = self.line.trim_end_matches(&['\r', '\n'][..]);
        trace!("<- {}", line);
        Ok(Some(line.to_owned()))
    }
}

impl<R: BufRead, W: Write> DrawSink for LineTransport<R, W> {
    fn draw(&mut self, x: u64, y: u64, color: Rgb) -> Result<()> {
        self.send(&Command::Pixel { x, y, color })
    }

    fn finish_burst(&mut self) -> Result<()> {
        self.request(&Command::Done)
    }
}

/// Unblocks a pending read by shutting down the read half of the socket
///
/// Writes are unaffected, so a burst in progress can still finish.
#[derive(Debug)]
pub struct InterruptHandle {
    stream: TcpStream,
}

impl InterruptHandle {
    pub fn interrupt(&self) {
        if let Err(err) = self.stream.shutdown(Shutdown::Read) {
            debug!("Socket shutdown after interrupt failed: {}", err);
        }
    }
}
