use std::path::Path;

use anyhow::Context;
use watcher_engine::Engine;
use watcher_logging::watch_info;

use super::config::{load_or_default, CONFIG_FILENAME};
use super::logging::{self, LogDestination};

/// Sets up logging and config, then runs the watcher until the process is killed.
pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::Both);

    let config = load_or_default(Path::new(CONFIG_FILENAME))?;
    let engine = Engine::from_config(&config).context("invalid watcher configuration")?;

    // Effects run one at a time.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;

    watch_info!(
        "Watching {} every {:?}",
        config.search.search_url,
        config.poll_interval()
    );
    runtime.block_on(engine.run_forever());
    Ok(())
}
