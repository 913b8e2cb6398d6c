use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::core::clock::SystemClock;
use crate::core::scheduler::{DrawProgress, DrawScheduler};
use crate::error::{ClientError, Result};
use crate::math::safe_duration;
use crate::protocol::{self, Command, Directive};
use crate::traits::Clock;
use crate::transport::LineTransport;
use crate::types::CanvasBounds;

/// Login name and password, both without whitespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Log in and fetch the canvas size
///
/// The connection is unusable after an error; callers drop it.
pub fn establish<R: BufRead, W: Write>(
    transport: &mut LineTransport<R, W>,
    credentials: &Credentials,
) -> Result<CanvasBounds> {
    transport.request(&Command::Login {
        username: credentials.username.clone(),
        password: credentials.password.clone(),
    })?;
    let reply = transport
        .recv_line()?
        .ok_or_else(|| ClientError::Auth("connection closed before login reply".into()))?;
    protocol::parse_login_reply(&reply)?;
    info!("Logged in as {}", credentials.username);

    transport.request(&Command::Size)?;
    let reply = transport
        .recv_line()?
        .ok_or_else(|| ClientError::ProtocolParse("connection closed before SIZE reply".into()))?;
    protocol::parse_size_reply(&reply)
}

/// Totals over one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub bursts: u64,
    pub pixels_drawn: u64,
    pub pixels_skipped: u64,
    pub passes_started: u64,
    /// Sum of the server's `DONE <n>` acknowledgements
    pub pixels_acknowledged: u64,
    pub server_errors: u64,
}

/// Directive loop of an established connection
pub struct Session<R, W: Write, C = SystemClock> {
    transport: LineTransport<R, W>,
    scheduler: DrawScheduler<C>,
    progress: DrawProgress,
    cancel: Arc<AtomicBool>,
    summary: SessionSummary,
}

impl<R: BufRead, W: Write, C: Clock> Session<R, W, C> {
    pub fn new(transport: LineTransport<R, W>, scheduler: DrawScheduler<C>) -> Self {
        Self {
            transport,
            scheduler,
            progress: DrawProgress::new(),
            cancel: Arc::new(AtomicBool::new(false)),
            summary: SessionSummary::default(),
        }
    }

    /// Stop before the next directive once `cancel` is set
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Serve directives until the server closes the stream or the session is cancelled
    ///
    /// A blank line counts as the server closing the session, same as end of
    /// stream. Waits for the next directive without a timeout.
    pub fn run(&mut self) -> Result<SessionSummary> {
        while !self.is_cancelled() {
            let line = match self.transport.recv_line()? {
                Some(line) if !line.trim().is_empty() => line,
                Some(_) => {
                    info!("Server sent an empty message, closing session");
                    break;
                }
                None if self.is_cancelled() => {
                    debug!("Read interrupted");
                    break;
                }
                None => {
                    info!("Server closed connection");
                    break;
                }
            };

            self.handle(protocol::parse_directive(&line))?;
        }

        Ok(self.summary)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    fn handle(&mut self, directive: Directive) -> Result<()> {
        match directive {
            Directive::Start { quota, duration_ms } => {
                let usable_ms = safe_duration(duration_ms);
                debug!(
                    "START: {} pixels in {}ms, drawing for {}ms",
                    quota, duration_ms, usable_ms
                );

                let report =
                    self.scheduler
                        .burst(&mut self.progress, quota, usable_ms, &mut self.transport)?;

                debug!(
                    "Burst: {} drawn, {} off-canvas, {} new placements in {:?}",
                    report.drawn, report.skipped, report.placements, report.elapsed
                );
                let summary = &mut self.summary;
                summary.bursts = summary.bursts.saturating_add(1);
                summary.pixels_drawn = summary.pixels_drawn.saturating_add(report.drawn);
                summary.pixels_skipped = summary.pixels_skipped.saturating_add(report.skipped);
                summary.passes_started = summary.passes_started.saturating_add(report.placements);
            }
            Directive::Acknowledged { pixels } => {
                debug!("Server accepted {} pixels", pixels);
                self.summary.pixels_acknowledged =
                    self.summary.pixels_acknowledged.saturating_add(pixels);
            }
            Directive::ServerError(message) => {
                warn!("Error from server: {}", message);
                self.summary.server_errors = self.summary.server_errors.saturating_add(1);
            }
            Directive::Malformed(line) => warn!("Ignoring malformed directive: {:?}", line),
            Directive::Other(line) => debug!("From server: {}", line),
        }
        Ok(())
    }
}
