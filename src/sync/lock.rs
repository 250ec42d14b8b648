use parking_lot::{const_mutex, lock_api::RawMutex as _, Condvar, RawMutex};
use std::{
    fmt, hint, mem,
    sync::atomic::{AtomicBool, Ordering},
};

/// Exclusive lock with explicit `lock`/`unlock` calls.
pub trait Lock {
    /// Block until the lock is acquired.
    fn lock(&self);

    /// Release the lock.
    ///
    /// # Safety
    ///
    /// The lock must be held by the current context.
    unsafe fn unlock(&self);

    /// Run `f` while holding the lock, releasing it on every exit path (including unwinding).
    fn locked<R>(&self, f: impl FnOnce() -> R) -> R
    where
        Self: Sized,
    {
        struct Unlock<'a, L: Lock>(&'a L);

        impl<L: Lock> Drop for Unlock<'_, L> {
            fn drop(&mut self) {
                // safety: constructed right after `lock()` returned
                unsafe { self.0.unlock() }
            }
        }

        self.lock();
        let _unlock = Unlock(self);
        f()
    }
}

/// Blocking mutex; waiting threads are parked rather than spinning.
pub struct Mutex {
    raw: RawMutex,
}

impl Mutex {
    pub const fn new() -> Self {
        Self { raw: RawMutex::INIT }
    }

    /// Whether the mutex is held by anyone right now.
    pub fn is_locked(&self) -> bool {
        self.raw.is_locked()
    }
}

impl Default for Mutex {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Mutex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutex")
            .field("locked", &self.is_locked())
            .finish()
    }
}

impl Lock for Mutex {
    fn lock(&self) {
        self.raw.lock();
    }

    unsafe fn unlock(&self) {
        self.raw.unlock();
    }
}

/// Unfair spin lock for very short critical sections.
///
/// Waiters busy-wait and no ordering is given among them.
#[derive(Debug, Default)]
pub struct Spin {
    locked: AtomicBool,
}

impl Spin {
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

impl Lock for Spin {
    fn lock(&self) {
        loop {
            if self
                .locked
                .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
                .is_ok()
            {
                return;
            }
            // Wait for a release before retrying the exchange
            while self.locked.load(Ordering::Relaxed) {
                hint::spin_loop();
            }
        }
    }

    unsafe fn unlock(&self) {
        debug_assert!(self.is_locked(), "Spin unlocked while not locked");
        self.locked.store(false, Ordering::Release);
    }
}

/// Mutex paired with a condition variable.
///
/// A holder may [`wait`](ConditionLock::wait) for a notification, giving the lock up while
/// blocked. Other threads wake waiters with [`signal`](ConditionLock::signal) (one) or
/// [`broadcast`](ConditionLock::broadcast) (all). Wake-ups may be spurious, so callers
/// re-check their condition in a loop.
#[derive(Debug, Default)]
pub struct ConditionLock {
    mutex: parking_lot::Mutex<()>,
    cond: Condvar,
}

impl ConditionLock {
    pub const fn new() -> Self {
        Self {
            mutex: const_mutex(()),
            cond: Condvar::new(),
        }
    }

    /// Release the lock, block until notified and re-acquire the lock before returning.
    ///
    /// # Safety
    ///
    /// The lock must be held by the current context.
    pub unsafe fn wait(&self) {
        // safety: the caller holds the mutex, the guard stands in for that acquisition
        let mut guard = self.mutex.make_guard_unchecked();
        self.cond.wait(&mut guard);
        // The mutex is held again, keep it locked for the matching `unlock`
        mem::forget(guard);
    }

    /// Wake one waiting thread, if any.
    pub fn signal(&self) -> bool {
        self.cond.notify_one()
    }

    /// Wake all waiting threads and return how many were woken.
    pub fn broadcast(&self) -> usize {
        self.cond.notify_all()
    }
}

impl Lock for ConditionLock {
    fn lock(&self) {
        mem::forget(self.mutex.lock());
    }

    unsafe fn unlock(&self) {
        self.mutex.force_unlock();
    }
}
