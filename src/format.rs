//! Record formatting shared by every emission path.
//!
//! ```text
//! <timestamp:25+> <LEVEL:5+> [<tag>] <message>[ (<file>:<line>)]
//! ```

use std::borrow::Cow;

use chrono::{DateTime, Local, Timelike};

use crate::caller::CallSite;
use crate::level::Level;

/// Placeholder used when the call site cannot be resolved.
pub const UNKNOWN_FILE: &str = "???";

/// Render `YYYYMMDD HH:MM:SS.fffff` with exactly five fractional digits.
pub fn timestamp(now: &DateTime<Local>) -> String {
    // Leap seconds report nanos >= 1e9; clamp so the field stays 5 digits.
    let frac = (now.nanosecond() % 1_000_000_000) / 10_000;
    format!("{}.{:05}", now.format("%Y%m%d %H:%M:%S"), frac)
}

/// Replace raw CR and LF with their two-character escapes so every record
/// occupies exactly one physical line.
pub fn escape(message: &str) -> Cow<'_, str> {
    if !message.contains(['\r', '\n']) {
        return Cow::Borrowed(message);
    }
    let mut out = String::with_capacity(message.len() + 8);
    for ch in message.chars() {
        match ch {
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Last path segment of `path`, accepting both separators.
pub fn short_file(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Build a complete record, without the trailing line terminator.
///
/// `location` is `None` when the call stack is hidden. `Some(None)` means the
/// call stack is shown but the site could not be resolved.
pub fn format_record(
    now: &DateTime<Local>,
    level: Level,
    tag: &str,
    message: &str,
    location: Option<Option<CallSite>>,
) -> String {
    let ts = timestamp(now);
    let message = escape(message);
    let level = level.as_upper_str();

    match location {
        None => format!("{:<25} {:<5} [{}] {}", ts, level, tag, message),
        Some(site) => {
            let (file, line) = match site {
                Some(site) => (short_file(site.file), site.line),
                None => (UNKNOWN_FILE, 0),
            };
            format!(
                "{:<25} {:<5} [{}] {} ({}:{})",
                ts, level, tag, message, file, line
            )
        }
    }
}
