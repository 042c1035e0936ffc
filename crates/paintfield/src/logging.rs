//! Log output for the terminal app.
//!
//! The terminal belongs to the UI, so logs only go to a file. The filter is
//! read from `PAINTFIELD_LOG` and defaults to `info`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PAINTFIELD_LOG";

/// Install a subscriber appending to `path`.
pub fn init(path: &Path) -> color_eyre::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}
