use std::env;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Log to stderr at `RUST_LOG` (default INFO); stdout is reserved for data.
pub fn init() {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
