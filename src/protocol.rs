//! Line-based text protocol spoken with the pixelstrom server
//!
//! Client commands:
//! ```text
//! LOGIN <username> <password>
//! SIZE
//! PX <x> <y> <rrggbb>
//! DONE
//! ```
//!
//! Server lines:
//! ```text
//! LOGIN SUCCEEDED
//! SIZE <width> <height>
//! START <pixel_count> <duration_ms>
//! DONE <num_pixels>
//! ERROR <message>
//! ```

use std::fmt;

use crate::error::{ClientError, Result};
use crate::math::Rgb;
use crate::types::CanvasBounds;

pub const LOGIN_SUCCEEDED: &str = "LOGIN SUCCEEDED";

/// Line sent from client to server, `Display` omits the trailing newline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, password: String },
    Size,
    Pixel { x: u64, y: u64, color: Rgb },
    Done,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Login { username, password } => write!(f, "LOGIN {username} {password}"),
            Command::Size => f.write_str("SIZE"),
            Command::Pixel { x, y, color } => write!(f, "PX {x} {y} {color}"),
            Command::Done => f.write_str("DONE"),
        }
    }
}

/// Line received from the server once the session is running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Our slot begins: draw at most `quota` pixels within `duration_ms`
    Start { quota: u64, duration_ms: u64 },
    /// The server accepted `pixels` pixels from the last burst
    Acknowledged { pixels: u64 },
    /// Non-fatal error reported by the server
    ServerError(String),
    /// A known keyword with arguments we could not parse
    Malformed(String),
    /// Anything else, including the HELP text
    Other(String),
}

/// Classify one server line, without its line terminator
pub fn parse_directive(line: &str) -> Directive {
    let line = line.trim_end_matches(&['\r', '\n'][..]);

    if let Some(message) = line.strip_prefix("ERROR ") {
        return Directive::ServerError(message.to_owned());
    }

    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("START") => match (parse_u64(parts.next()), parse_u64(parts.next()), parts.next()) {
            (Some(quota), Some(duration_ms), None) => Directive::Start { quota, duration_ms },
            _ => Directive::Malformed(line.to_owned()),
        },
        Some("DONE") => match (parse_u64(parts.next()), parts.next()) {
            (Some(pixels), None) => Directive::Acknowledged { pixels },
            _ => Directive::Malformed(line.to_owned()),
        },
        _ => Directive::Other(line.to_owned()),
    }
}

/// Accept only the exact success reply
pub fn parse_login_reply(line: &str) -> Result<()> {
    let reply = line.trim();
    if reply == LOGIN_SUCCEEDED {
        Ok(())
    } else {
        Err(ClientError::Auth(reply.to_owned()))
    }
}

/// Parse `SIZE <width> <height>` with positive dimensions
pub fn parse_size_reply(line: &str) -> Result<CanvasBounds> {
    let reply = line.trim();
    let mut parts = reply.split_whitespace();

    let size = match (parts.next(), parse_u32(parts.next()), parse_u32(parts.next()), parts.next()) {
        (Some("SIZE"), Some(width), Some(height), None) if width > 0 && height > 0 => {
            Some(CanvasBounds::new(width, height))
        }
        _ => None,
    };

    size.ok_or_else(|| ClientError::ProtocolParse(format!("expected SIZE reply, got {reply:?}")))
}

fn parse_u64(token: Option<&str>) -> Option<u64> {
    token?.parse().ok()
}

fn parse_u32(token: Option<&str>) -> Option<u32> {
    token?.parse().ok()
}
