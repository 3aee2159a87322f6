use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::MetricSpec;
use crate::snapshot::{Percent, Snapshot};

/// Build the generator's RNG, reproducible when a seed is given.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draw one snapshot: for every symbol, one whole percentage per metric,
/// uniform over the metric's inclusive range.
pub fn generate_snapshot<R: Rng + ?Sized>(
    rng: &mut R,
    symbols: &[String],
    metrics: &[MetricSpec],
) -> Snapshot {
    let mut snapshot = Snapshot::new(metrics.iter().map(|m| m.name.clone()).collect());

    for symbol in symbols {
        let cells = metrics
            .iter()
            .map(|metric| Percent::from_whole(rng.gen_range(metric.min..=metric.max)).to_string())
            .collect();
        snapshot.push_row(symbol.clone(), cells);
    }

    snapshot
}
