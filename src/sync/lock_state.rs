use std::fmt;

/// Counters of a [`super::rwlock::ReaderWriterLock`].
///
/// Inside the lock this struct lives behind the internal gate; outside it is only
/// ever seen as a copied snapshot, which may be stale as soon as it is returned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LockState {
    /// Number of threads currently holding read access.
    pub readers: usize,
    /// Whether a thread currently holds write access (0 or 1).
    pub writers: usize,
    /// Number of threads waiting for write access; never includes the current writer.
    pub pending_writers: usize,
}

/// Coarse classification of a [`LockState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Nobody holds the lock.
    /// There may still be pending writers about to be admitted.
    Idle,
    /// One or more readers hold the lock. The `usize` is the number of active readers.
    Shared(usize),
    /// A single writer holds the lock.
    Exclusive,
}

impl LockState {
    /// All counters at zero.
    pub const fn new() -> Self {
        Self {
            readers: 0,
            writers: 0,
            pending_writers: 0,
        }
    }

    /// A new reader may be admitted: no active writer and no writer waiting.
    #[inline]
    pub(crate) fn admits_reader(&self) -> bool {
        self.writers == 0 && self.pending_writers == 0
    }

    /// A writer may be admitted: nobody holds the lock.
    #[inline]
    pub(crate) fn admits_writer(&self) -> bool {
        self.writers == 0 && self.readers == 0
    }

    pub fn status(&self) -> Status {
        match (self.readers, self.writers) {
            (0, 0) => Status::Idle,
            (n, 0) => Status::Shared(n),
            _ => Status::Exclusive,
        }
    }

    /// Checks the mutual exclusion invariants:
    /// - at most one writer
    /// - no readers while a writer is active
    pub fn is_consistent(&self) -> bool {
        self.writers <= 1 && !(self.writers == 1 && self.readers > 0)
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "LockState {{readers: {}, writers: {}, pending_writers: {}}}",
            self.readers, self.writers, self.pending_writers
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Status::Idle => write!(f, "Idle"),
            Status::Shared(n) => write!(f, "Shared({})", n),
            Status::Exclusive => write!(f, "Exclusive"),
        }
    }
}
