//! # Polymap
//!
//! Draw polygons on a map, label them with a name and a price, and keep
//! them across sessions.
//!
//! ## Architecture
//!
//! Polymap is organized as a workspace with multiple crates:
//!
//! 1. **polymap-core** - Coordinates, polygon records, colors, price
//!    formatting, errors, and the event bus
//! 2. **polymap-settings** - Configuration files and platform directories
//! 3. **polymap-store** - The persisted, observable polygon collection
//! 4. **polymap-designer** - Drawing sessions, labels, and map overlays
//! 5. **polymap** - The command-line binary that integrates all crates

pub mod cli;

pub use polymap_designer as designer;
pub use polymap_settings as settings;
pub use polymap_store as store;

pub use polymap_core::{
    format_price, Color, Coordinate, CurrencyFormat, PolygonDraft, PolygonId, PolygonRecord,
    ValidationError,
};

pub use polymap_settings::{Config, SettingsManager};

pub use polymap_store::{FileStorage, MemoryStorage, PolygonStore, PolygonUiController};

pub use polymap_designer::{AddPolygonFlow, DrawingSession, HeadlessSurface, MapEvent, MapView};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so command output on stdout stays clean
/// - A global level from `verbosity`: warn by default, -v info, -vv debug,
///   -vvv trace
/// - Per-target RUST_LOG directives (e.g. `polymap_store=trace`); a bare
///   global level in RUST_LOG is overridden by the one above
pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(log_level(verbosity).into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(verbosity >= 2);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Global log level for a `-v` count.
fn log_level(verbosity: u8) -> tracing::Level {
    match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}
