use super::rwlock::ReaderWriterLock;

/// Shared read access to a [`ReaderWriterLock`], released when dropped.
///
/// Created by [`ReaderWriterLock::read`].
#[must_use = "if unused the read lock is released immediately"]
#[derive(Debug)]
pub struct ReadGuard<'a> {
    rwlock: &'a ReaderWriterLock,
}

impl<'a> ReadGuard<'a> {
    /// The caller must already hold read access on `rwlock`.
    pub(crate) fn new(rwlock: &'a ReaderWriterLock) -> Self {
        Self { rwlock }
    }

    /// The lock this guard holds read access on.
    pub fn lock(&self) -> &'a ReaderWriterLock {
        self.rwlock
    }
}

impl Drop for ReadGuard<'_> {
    fn drop(&mut self) {
        self.rwlock.unlock_read();
    }
}

/// Exclusive write access to a [`ReaderWriterLock`], released when dropped.
///
/// Created by [`ReaderWriterLock::write`].
#[must_use = "if unused the write lock is released immediately"]
#[derive(Debug)]
pub struct WriteGuard<'a> {
    rwlock: &'a ReaderWriterLock,
}

impl<'a> WriteGuard<'a> {
    /// The caller must already hold write access on `rwlock`.
    pub(crate) fn new(rwlock: &'a ReaderWriterLock) -> Self {
        Self { rwlock }
    }

    /// The lock this guard holds write access on.
    pub fn lock(&self) -> &'a ReaderWriterLock {
        self.rwlock
    }
}

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        self.rwlock.unlock_write();
    }
}
