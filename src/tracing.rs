//! Log output for the binary and the test suite.
//!
//! Everything goes to stderr; stdout carries only command output. Filter
//! directives come from `IDPICK_LOG`, then `RUST_LOG`, then the level the caller
//! asks for.

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Environment variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "IDPICK_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber at `level`. Later calls are no-ops.
///
/// Under a test harness the level is raised to `DEBUG` and output is captured
/// per test.
pub fn init(level: Level) {
    INIT.call_once(|| {
        let is_test =
            std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let filter = filter(if is_test { Level::DEBUG } else { level });

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(level >= Level::DEBUG)
            .without_time()
            .compact();

        if is_test {
            let _ = builder.with_test_writer().try_init();
        } else if let Err(e) = builder.with_writer(std::io::stderr).try_init() {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}

fn filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()))
}
