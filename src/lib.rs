//! # clog - Minimal Leveled Logging
//!
//! clog writes one line of text per call:
//!
//! ```text
//! 20180307 09:05:04.12345   INFO  [r-42] request done in 12ms (handler.rs:88)
//! └── timestamp (25) ─────┘ └LEVEL┘ └tag─┘ └── message ───────┘ └ call site ┘
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────┐    ┌──────────────┐
//! │ global / !   │───►│      Logger      │───►│  Write sink  │
//! │ macros       │    │ • threshold      │    │ stdout, file │
//! └──────────────┘    │ • context fmt    │    │ MemorySink.. │
//! ┌──────────────┐    │ • caller resolver│    └──────────────┘
//! │ LoggerLayer  │───►│ • format_record  │
//! │ (tracing)    │    └──────────────────┘
//! └──────────────┘             ▲
//!                     ┌──────────────────┐
//!                     │  LoggerConfig    │
//!                     │  TOML + env      │
//!                     └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use clog::{Context, Level};
//!
//! clog::set_level_by_string("debug");
//! clog::debug!(None, "cache warmed with {} entries", 128);
//!
//! clog::set_context_formatter(clog::value_formatter("rid", "--"));
//! let ctx = Context::background().with_value("rid", "r-42");
//! clog::info!(Some(&ctx), "request accepted");
//!
//! clog::log(Level::WARN, "r-42", "unfiltered record");
//! ```

pub mod bridge;
pub mod caller;
pub mod config;
pub mod context;
pub mod format;
pub mod global;
pub mod level;
pub mod logger;
pub mod sink;

pub use bridge::LoggerLayer;
pub use caller::{CallSite, CallerResolver, TrackedCaller, UnknownCaller};
pub use config::{ConfigError, LoggerConfig, OutputTarget};
pub use context::{default_context_formatter, value_formatter, Context, ContextFormatter};
pub use global::{
    debug, default_logger, error, fatal, info, log, logf, set_context_formatter, set_level_by_string,
    set_output, warn,
};
pub use level::{debug_enabled, global_level, set_global_level, Level};
pub use logger::Logger;
pub use sink::MemorySink;
