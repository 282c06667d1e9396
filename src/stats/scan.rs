use crate::calendar::resolve_window;
use crate::error::{Result, StatsError};
use crate::model::{LaunchOptions, StatsOptions, StatsResult};
use chrono::{DateTime, FixedOffset};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use super::aggregate::Aggregator;
use super::filter::PathFilter;

pub fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {pos}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Analyzing commits");
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// One unit per folder, or a single unit over every folder when merging.
/// Units whose window cannot be resolved carry the error from the start.
pub fn build_units(opts: &LaunchOptions, now: DateTime<FixedOffset>) -> Vec<StatsResult> {
    let folder_sets: Vec<Vec<PathBuf>> = if opts.merge {
        vec![opts.folders.clone()]
    } else {
        opts.folders.iter().map(|folder| vec![folder.clone()]).collect()
    };

    folder_sets
        .into_iter()
        .map(|folders| {
            let mut unit = StatsResult::new(StatsOptions::for_folders(opts, folders));
            match resolve_window(now, &opts.delta, opts.duration_in_weeks) {
                Ok(window) => unit.prepare(window),
                Err(e) => unit.error = Some(e),
            }
            unit
        })
        .collect()
}

/// Scan every unit on its own thread and return the results in submission
/// order.
///
/// Unless running for the dashboard, `on_ready` sees each result as soon as
/// it and all units submitted before it are done. Pattern errors are reported
/// before any thread starts; a failure of every unit is `AllUnitsFailed`.
pub fn launch<F>(
    opts: &LaunchOptions,
    now: DateTime<FixedOffset>,
    progress: &ProgressBar,
    mut on_ready: F,
) -> Result<Vec<StatsResult>>
where
    F: FnMut(&StatsResult),
{
    PathFilter::new(&opts.pattern_to_exclude, &opts.pattern_to_include)?;

    let units = build_units(opts, now);
    let total = units.len();

    let results = thread::scope(|scope| {
        let (tx, rx) = mpsc::channel();
        for (index, mut unit) in units.into_iter().enumerate() {
            let tx = tx.clone();
            let progress = progress.clone();
            scope.spawn(move || {
                run_unit(&mut unit, &progress);
                let _ = tx.send((index, unit));
            });
        }
        drop(tx);

        let mut pending = BTreeMap::new();
        let mut ordered = Vec::with_capacity(total);
        for (index, unit) in rx {
            pending.insert(index, unit);
            while let Some(unit) = pending.remove(&ordered.len()) {
                if !opts.dashboard {
                    progress.suspend(|| on_ready(&unit));
                }
                ordered.push(unit);
            }
        }
        ordered
    });
    progress.finish_and_clear();

    let failed = results.iter().filter(|r| !r.is_ok()).count();
    if total > 0 && failed == total {
        return Err(StatsError::AllUnitsFailed(total));
    }
    Ok(results)
}

/// Aggregate every folder of `unit` into it. A folder that fails contributes
/// nothing; the unit only carries an error when no folder could be scanned.
pub fn run_unit(unit: &mut StatsResult, progress: &ProgressBar) {
    if unit.error.is_some() {
        return;
    }
    let Some(window) = unit.window else {
        return;
    };
    let aggregator = match Aggregator::new(&unit.options, window) {
        Ok(aggregator) => aggregator,
        Err(e) => {
            unit.error = Some(e);
            return;
        }
    };

    let folders = unit.options.folders.clone();
    let merged = folders.len() > 1;
    let mut scanned = 0usize;
    let mut last_error = None;

    for folder in &folders {
        let mut scratch = unit.scratch();
        match aggregator.scan_folder(&mut scratch, folder, progress) {
            Ok(()) => {
                unit.absorb(&scratch);
                scanned += 1;
            }
            Err(e) => {
                if merged {
                    warn!(folder = %folder.display(), error = %e, "error scanning folder repository");
                } else {
                    debug!(folder = %folder.display(), error = %e, "error scanning folder repository");
                }
                last_error = Some(e);
            }
        }
    }

    if scanned == 0 {
        unit.error = last_error;
    }
}
