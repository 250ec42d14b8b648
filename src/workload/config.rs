use anyhow::{bail, Result};
use std::{fmt, time::Duration};

/// Shape of a reader/writer workload run by [`super::execute_workload::execute_workload`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkloadConfig {
    /// Number of reader threads.
    pub readers: usize,
    /// Number of writer threads.
    pub writers: usize,
    /// Acquisitions performed by every thread.
    pub iterations: usize,
    /// Upper bound of the random time a thread holds the lock per acquisition.
    pub max_hold: Duration,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            readers: 8,
            writers: 2,
            iterations: 1000,
            max_hold: Duration::from_micros(50),
        }
    }
}

impl WorkloadConfig {
    /// set number of reader threads.
    pub fn with_readers(mut self, readers: usize) -> Self {
        self.readers = readers;
        self
    }

    /// set number of writer threads.
    pub fn with_writers(mut self, writers: usize) -> Self {
        self.writers = writers;
        self
    }

    /// set acquisitions per thread.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// set maximum hold time per acquisition.
    pub fn with_max_hold(mut self, max_hold: Duration) -> Self {
        self.max_hold = max_hold;
        self
    }

    /// Reject workloads that would not acquire the lock at all.
    pub fn validate(&self) -> Result<()> {
        if self.readers + self.writers == 0 {
            bail!("Workload needs at least one reader or writer thread.");
        }
        if self.iterations == 0 {
            bail!("Workload needs at least one iteration per thread.");
        }
        Ok(())
    }
}

impl fmt::Display for WorkloadConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "readers: {}, writers: {}, iterations: {}, max_hold: {:?}",
            self.readers, self.writers, self.iterations, self.max_hold
        )
    }
}
