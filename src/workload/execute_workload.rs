use super::{config::WorkloadConfig, report::Probe, report::WorkloadReport};
use crate::sync::rwlock::ReaderWriterLock;
use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use rand::Rng;
use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

/// Run the workload described by `config` against a fresh [`ReaderWriterLock`].
pub fn execute_workload(config: &WorkloadConfig) -> Result<WorkloadReport> {
    execute_workload_on(Arc::new(ReaderWriterLock::new()), config)
}

/// Run the workload described by `config` against `rwlock`.
///
/// Every reader and writer thread acquires the lock `config.iterations` times through the
/// scoped guards and holds it for a random time up to `config.max_hold`.
pub fn execute_workload_on(
    rwlock: Arc<ReaderWriterLock>,
    config: &WorkloadConfig,
) -> Result<WorkloadReport> {
    config.validate()?;
    info!("Starting workload: {}", config);

    let probe = Arc::new(Probe::default());
    let max_hold_nanos = u64::try_from(config.max_hold.as_nanos())
        .context("max_hold does not fit into u64 nanoseconds")?;
    let start = Instant::now();

    let mut handles: Vec<(String, JoinHandle<()>)> = vec![];
    for i in 0..config.readers {
        let name = format!("reader-{}", i);
        let rwlock = rwlock.clone();
        let probe = probe.clone();
        let iterations = config.iterations;
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                let mut rng = rand::rng();
                for _ in 0..iterations {
                    let _guard = rwlock.read();
                    probe.enter_read();
                    hold(rng.random_range(0..=max_hold_nanos));
                    probe.exit_read();
                }
            })
            .with_context(|| format!("Failed to spawn {}", name))?;
        handles.push((name, handle));
    }
    for i in 0..config.writers {
        let name = format!("writer-{}", i);
        let rwlock = rwlock.clone();
        let probe = probe.clone();
        let iterations = config.iterations;
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                let mut rng = rand::rng();
                for _ in 0..iterations {
                    let _guard = rwlock.write();
                    probe.enter_write();
                    hold(rng.random_range(0..=max_hold_nanos));
                    probe.exit_write();
                }
            })
            .with_context(|| format!("Failed to spawn {}", name))?;
        handles.push((name, handle));
    }

    // Join everyone before reporting a failure so no thread outlives the run
    let mut panicked = vec![];
    for (name, handle) in handles {
        match handle.join() {
            Ok(()) => debug!("{} finished", name),
            Err(_) => panicked.push(name),
        }
    }
    if !panicked.is_empty() {
        return Err(anyhow!("Workload threads panicked: {}", panicked.join(", ")));
    }

    let report = probe.report(start.elapsed());
    info!("Workload finished: {}", report);
    Ok(report)
}

/// Stay inside the critical section for `nanos` nanoseconds.
fn hold(nanos: u64) {
    if nanos == 0 {
        thread::yield_now();
    } else {
        thread::sleep(Duration::from_nanos(nanos));
    }
}
