//! A reader/writer lock that admits many concurrent readers or a single writer and keeps
//! writers from starving under continuous read traffic.
//!
//! A writer announces itself before it waits. From that moment new readers queue behind it,
//! so only the readers admitted earlier can delay the writer.
//!
//! ```
//! use rwlock::ReaderWriterLock;
//!
//! let rwlock = ReaderWriterLock::new();
//!
//! rwlock.lock_read();
//! assert!(!rwlock.is_writing());
//! rwlock.unlock_read();
//!
//! {
//!     let _guard = rwlock.write();
//!     assert!(rwlock.is_writing());
//! }
//! assert!(!rwlock.is_writing());
//! ```
//!
//! Besides the reader/writer lock the crate carries plain exclusive locks
//! ([`Mutex`], [`Spin`], [`ConditionLock`]) and a multi-threaded workload driver
//! in [`workload`] used by the `rwlock` binary.

pub mod sync;
pub mod workload;

pub use sync::{
    guard::{ReadGuard, WriteGuard},
    lock::{ConditionLock, Lock, Mutex, Spin},
    lock_state::{LockState, Status},
    rwlock::ReaderWriterLock,
};
