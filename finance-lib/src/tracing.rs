use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;

/// Installs the global subscriber. Logs go to stderr so that command output stays clean.
pub fn init(level: LevelFilter) -> Result<(), anyhow::Error> {
    let subscriber = registry::Registry::default()
        .with(level)
        .with(tracing_subscriber::fmt::Layer::default().with_writer(std::io::stderr));
    tracing::subscriber::set_global_default(subscriber)
        .context("Unable to set up tracing subscriber")?;
    Ok(())
}

/// Maps a repeated `-v` flag to a level, starting at warnings.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
