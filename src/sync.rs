pub mod guard;
pub mod lock;
pub mod lock_state;
pub mod rwlock;
