use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    fmt::time::ChronoLocal, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::internal_prelude::*;

/// The default log level for the given amount of `-v` flags.
pub fn verbosity_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the `-v` flags.
/// Logs always go to stderr, stdout is reserved for the descendants.
pub fn install_tracing(verbosity: u8) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_level(verbosity).into())
        .from_env()
        .wrap_err("RUST_LOG env variable is invalid")?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(verbosity >= 3)
        .with_timer(ChronoLocal::new("%H:%M:%S".into()))
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();

    Ok(())
}
