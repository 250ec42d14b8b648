use std::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

/// Records who is inside the critical section of a workload.
///
/// The probe uses its own atomics, independent of the lock under test, so a broken
/// lock shows up as violations instead of being hidden by the lock's own counters.
#[derive(Debug, Default)]
pub(crate) struct Probe {
    active_readers: AtomicUsize,
    active_writers: AtomicUsize,
    max_concurrent_readers: AtomicUsize,
    reads: AtomicUsize,
    writes: AtomicUsize,
    violations: AtomicUsize,
}

impl Probe {
    /// Register a reader entering; a writer inside at the same time is a violation.
    pub(crate) fn enter_read(&self) {
        let readers = self.active_readers.fetch_add(1, Ordering::SeqCst) + 1;
        if self.active_writers.load(Ordering::SeqCst) != 0 {
            self.violations.fetch_add(1, Ordering::SeqCst);
        }
        self.max_concurrent_readers
            .fetch_max(readers, Ordering::SeqCst);
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn exit_read(&self) {
        self.active_readers.fetch_sub(1, Ordering::SeqCst);
    }

    /// Register a writer entering; anybody else inside at the same time is a violation.
    pub(crate) fn enter_write(&self) {
        let writers = self.active_writers.fetch_add(1, Ordering::SeqCst) + 1;
        if writers != 1 || self.active_readers.load(Ordering::SeqCst) != 0 {
            self.violations.fetch_add(1, Ordering::SeqCst);
        }
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn exit_write(&self) {
        self.active_writers.fetch_sub(1, Ordering::SeqCst);
    }

    pub(crate) fn report(&self, elapsed: Duration) -> WorkloadReport {
        WorkloadReport {
            reads: self.reads.load(Ordering::SeqCst),
            writes: self.writes.load(Ordering::SeqCst),
            max_concurrent_readers: self.max_concurrent_readers.load(Ordering::SeqCst),
            violations: self.violations.load(Ordering::SeqCst),
            elapsed,
        }
    }
}

/// Outcome of a workload run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkloadReport {
    /// Completed read acquisitions.
    pub reads: usize,
    /// Completed write acquisitions.
    pub writes: usize,
    /// Highest number of readers seen inside the critical section at once.
    pub max_concurrent_readers: usize,
    /// Times a reader met a writer, or a writer met anybody, inside the critical section.
    pub violations: usize,
    /// Wall clock time of the run.
    pub elapsed: Duration,
}

impl WorkloadReport {
    /// No exclusivity violation was observed.
    pub fn is_sound(&self) -> bool {
        self.violations == 0
    }
}

impl fmt::Display for WorkloadReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "reads: {}, writes: {}, max_concurrent_readers: {}, violations: {}, elapsed: {:?}",
            self.reads, self.writes, self.max_concurrent_readers, self.violations, self.elapsed
        )
    }
}
