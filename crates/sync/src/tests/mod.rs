// Unit tests for the global backend slot and thread subsystem bring-up.
//
// Both touch process-wide state, so every test here takes `GLOBAL_STATE` first.

use std::sync::Mutex;

use crate::*;

static GLOBAL_STATE: Mutex<()> = Mutex::new(());

/// Host-style backend with its own name and thread id; `mutex_init` always fails.
struct BrokenBackend;

impl LockBackend for BrokenBackend {
    fn name(&self) -> &'static str {
        "threads_broken"
    }

    fn mutex_init(&self, _lock: &mut RawLock) -> Result<(), LockError> {
        Err(LockError::OutOfMemory)
    }

    unsafe fn mutex_destroy(&self, _lock: &mut RawLock) -> Result<(), LockError> {
        Ok(())
    }

    unsafe fn mutex_lock(&self, _lock: RawLock) -> Result<(), LockError> {
        Ok(())
    }

    unsafe fn mutex_unlock(&self, _lock: RawLock) -> Result<(), LockError> {
        Ok(())
    }

    fn thread_id(&self) -> u64 {
        0
    }
}

static BROKEN_BACKEND: BrokenBackend = BrokenBackend;

/// Put the registration slot back to the default backend.
fn restore_default() {
    unsafe { register_lock_backend(default_backend()) };
}

mod registry;
