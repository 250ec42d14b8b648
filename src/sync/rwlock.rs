use super::{
    guard::{ReadGuard, WriteGuard},
    lock_state::LockState,
};
use log::trace;
use parking_lot::{const_mutex, Condvar, Mutex};

/// A reader/writer lock which prefers waiting writers over newly arriving readers.
///
/// Any number of readers may hold the lock at once, or exactly one writer. As soon as
/// a writer announces itself in [`ReaderWriterLock::lock_write`], new readers queue
/// behind it, so a steady stream of readers cannot starve a writer.
///
/// The lock does not own the resource it protects. Callers pair
/// `lock_read`/`unlock_read` and `lock_write`/`unlock_write` around their accesses,
/// or use [`ReaderWriterLock::read`] and [`ReaderWriterLock::write`] which release on drop.
///
/// # Contract
///
/// Unbalanced unlocks, recursive locking and dropping a held lock are caller errors.
/// Debug builds assert on counter underflow, release builds leave the counters corrupted.
#[derive(Debug, Default)]
pub struct ReaderWriterLock {
    /// Internal gate, every counter access happens while holding it
    state: Mutex<LockState>,
    /// Notified whenever an admission predicate may have become true
    cond: Condvar,
}

impl ReaderWriterLock {
    /// Create a new lock with all counters at zero.
    pub const fn new() -> Self {
        Self {
            state: const_mutex(LockState::new()),
            cond: Condvar::new(),
        }
    }

    /// Acquire read access by:
    /// - Waiting until there is neither an active writer nor a pending writer
    /// - Registering the new reader by incrementing `readers`
    pub fn lock_read(&self) {
        let mut state = self.state.lock();

        // Queue behind active and pending writers, re-check after every wake-up
        while !state.admits_reader() {
            self.cond.wait(&mut state);
        }
        state.readers += 1;

        trace!("read lock acquired: {}", *state);
    }

    /// Release read access by:
    /// - Decrementing `readers` to unregister the reader
    /// - Waking all waiters if this was the last reader
    pub fn unlock_read(&self) {
        let mut state = self.state.lock();
        debug_assert!(
            state.readers > 0,
            "unlock_read called without an active reader: {}",
            *state
        );
        state.readers -= 1;

        trace!("read lock released: {}", *state);

        // Only writers wait on `readers`, and they can proceed once it reaches 0
        if state.readers == 0 {
            self.cond.notify_all();
        }
    }

    /// Acquire write access by:
    /// - Announcing the writer in `pending_writers`, which blocks new readers
    /// - Waiting until there are no active readers and no active writer
    /// - Moving from `pending_writers` to `writers`
    pub fn lock_write(&self) {
        let mut state = self.state.lock();
        state.pending_writers += 1;

        while !state.admits_writer() {
            self.cond.wait(&mut state);
        }
        state.pending_writers -= 1;
        state.writers = 1;

        trace!("write lock acquired: {}", *state);
    }

    /// Release write access by:
    /// - Resetting `writers` to 0
    /// - Waking all waiting readers and writers so they re-evaluate admission
    pub fn unlock_write(&self) {
        let mut state = self.state.lock();
        debug_assert_eq!(
            state.writers, 1,
            "unlock_write called without an active writer: {}",
            *state
        );
        state.writers = 0;

        trace!("write lock released: {}", *state);

        self.cond.notify_all();
    }

    /// Whether a writer holds the lock at the instant of the check.
    ///
    /// The result may be stale as soon as it is returned.
    pub fn is_writing(&self) -> bool {
        self.state.lock().writers == 1
    }

    /// Snapshot of the counters, with the same staleness caveat as [`Self::is_writing`].
    pub fn state(&self) -> LockState {
        *self.state.lock()
    }

    /// Acquire read access and return a guard which releases it when dropped.
    pub fn read(&self) -> ReadGuard<'_> {
        self.lock_read();
        ReadGuard::new(self)
    }

    /// Acquire write access and return a guard which releases it when dropped.
    pub fn write(&self) -> WriteGuard<'_> {
        self.lock_write();
        WriteGuard::new(self)
    }
}
