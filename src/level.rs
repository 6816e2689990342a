//! # Severity Levels
//!
//! Levels are plain integers ordered from least to most verbose:
//!
//! | Level   | Value |
//! |---------|-------|
//! | `FATAL` | 0     |
//! | `ERROR` | 1     |
//! | `WARN`  | 2     |
//! | `INFO`  | 3     |
//! | `DEBUG` | 4     |
//!
//! A logger whose threshold is `T` emits a record at severity `L` when
//! `T >= L`. `DEBUG` is therefore the most permissive threshold.
//!
//! `Level` is a newtype over `u32` rather than an enum so that any value a
//! caller stores as a threshold stays representable. Values outside the five
//! named ones render as `unknown`.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

/// Record severity. Lower values are more severe; a threshold permits
/// every level numerically at or below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u32);

impl Level {
    pub const FATAL: Level = Level(0);
    pub const ERROR: Level = Level(1);
    pub const WARN: Level = Level(2);
    pub const INFO: Level = Level(3);
    pub const DEBUG: Level = Level(4);

    /// Wrap a raw value. No validation is done; out-of-range values are legal.
    pub const fn from_u32(value: u32) -> Self {
        Level(value)
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Canonical lowercase name, or `"unknown"`.
    pub const fn as_str(self) -> &'static str {
        match self.0 {
            0 => "fatal",
            1 => "error",
            2 => "warn",
            3 => "info",
            4 => "debug",
            _ => "unknown",
        }
    }

    /// Uppercase name as it appears in formatted records.
    pub const fn as_upper_str(self) -> &'static str {
        match self.0 {
            0 => "FATAL",
            1 => "ERROR",
            2 => "WARN",
            3 => "INFO",
            4 => "DEBUG",
            _ => "UNKNOWN",
        }
    }

    /// Parse a level name.
    ///
    /// Matching is case-sensitive. `"warning"` is accepted as an alias for
    /// `warn`. Anything unrecognized, including the empty string, yields
    /// [`Level::INFO`]; this function never fails.
    pub fn parse(text: &str) -> Self {
        match text {
            "fatal" => Level::FATAL,
            "error" => Level::ERROR,
            "warn" | "warning" => Level::WARN,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            _ => Level::INFO,
        }
    }

    /// Whether a threshold of `self` lets a record at `severity` through.
    pub const fn permits(self, severity: Level) -> bool {
        self.0 >= severity.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Level::parse(s))
    }
}

impl From<u32> for Level {
    fn from(value: u32) -> Self {
        Level(value)
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl From<tracing::Level> for Level {
    /// `TRACE` has no counterpart and folds into `DEBUG`.
    fn from(level: tracing::Level) -> Self {
        if level == tracing::Level::ERROR {
            Level::ERROR
        } else if level == tracing::Level::WARN {
            Level::WARN
        } else if level == tracing::Level::INFO {
            Level::INFO
        } else {
            Level::DEBUG
        }
    }
}

static GLOBAL_LEVEL: AtomicU32 = AtomicU32::new(Level::INFO.as_u32());

/// Threshold assigned to newly constructed loggers.
pub fn global_level() -> Level {
    Level(GLOBAL_LEVEL.load(Ordering::Relaxed))
}

/// Change the threshold future [`Logger`](crate::Logger)s start with.
/// Existing loggers are not touched.
pub fn set_global_level(level: Level) {
    GLOBAL_LEVEL.store(level.0, Ordering::Relaxed);
}

/// True when the global level is at least `DEBUG`.
pub fn debug_enabled() -> bool {
    global_level().permits(Level::DEBUG)
}
