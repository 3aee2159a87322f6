use std::path::Path;
use std::thread;
use std::time::Duration;

use rand::Rng;
use tracing::{error, info};

use crate::config::ScenarioConfig;
use crate::generator::{errors::GeneratorError, operations};
use crate::snapshot;

/// Generate one snapshot from `config` and atomically replace the feed file.
pub fn publish_once<R: Rng + ?Sized>(
    rng: &mut R,
    config: &ScenarioConfig,
    path: &Path,
) -> Result<(), GeneratorError> {
    let snapshot =
        operations::generate_snapshot(rng, &config.feed.symbols(), &config.feed.metrics());

    snapshot::write_snapshot(path, &snapshot).inspect_err(|e| {
        error!(
            event = "core.generator.publish_failed",
            path = %path.display(),
            error = %e
        );
    })?;

    Ok(())
}

/// Run the generator loop: publish a snapshot, then sleep `interval_secs`.
///
/// `ticks` bounds the number of snapshots; `None` runs until the process is
/// killed. The first failed write ends the loop with an error. Returns the
/// number of snapshots published.
pub fn run_generator(config: &ScenarioConfig, ticks: Option<u64>) -> Result<u64, GeneratorError> {
    config.validate()?;

    let path = config.feed.path();
    let interval = Duration::from_secs(config.generator.interval_secs());
    let mut rng = operations::make_rng(config.generator.seed);

    info!(
        event = "core.generator.started",
        path = %path.display(),
        interval_secs = interval.as_secs(),
        ticks = ?ticks,
        seeded = config.generator.seed.is_some()
    );

    let mut published = 0u64;
    loop {
        publish_once(&mut rng, config, &path)?;
        published += 1;

        info!(
            event = "core.generator.tick_completed",
            path = %path.display(),
            tick = published
        );

        if ticks.is_some_and(|limit| published >= limit) {
            break;
        }
        thread::sleep(interval);
    }

    info!(
        event = "core.generator.completed",
        path = %path.display(),
        published = published
    );

    Ok(published)
}
