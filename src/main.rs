//! # clog-demo
//!
//! Writes a handful of records to a temporary file the way a host service
//! would, then prints the file.
//!
//! ```text
//! clog-demo [LOG_FILE]
//! ```
//!
//! The logger configuration is read with [`LoggerConfig::load`], so
//! `CLOG_LEVEL=debug clog-demo` also shows debug records.

use std::fs;
use std::path::PathBuf;

use clog::{Context, Level, LoggerConfig, OutputTarget};

const KEY_REQUEST_ID: &str = "rid";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("clog-demo.log"));
    let _ = fs::remove_file(&path);
    println!("temp log file {}", path.display());

    let mut config = LoggerConfig::load();
    config.output = OutputTarget::File(path.clone());
    config.apply_to(clog::default_logger())?;

    clog::info!(None, "test clog");
    clog::log(Level::INFO, "r123", "request receive");
    clog::log(Level::INFO, "r123", "request process");
    clog::logf!(Level::INFO, "r123", "request response: {}", "hello");

    clog::set_context_formatter(clog::value_formatter(KEY_REQUEST_ID, "--"));
    let ctx = Context::background();
    clog::warn!(Some(&ctx), "cant get ctx info");

    let ctx = ctx.with_value(KEY_REQUEST_ID, "test-id");
    clog::info!(Some(&ctx), "context info");
    clog::debug!(Some(&ctx), "visible with CLOG_LEVEL=debug");

    clog::default_logger().flush();
    print!("{}", fs::read_to_string(&path)?);
    Ok(())
}
