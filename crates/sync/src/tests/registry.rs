use super::*;

#[test]
fn test_default_backend_is_noop() {
    assert_eq!(default_backend().name(), "threads_noop");
    assert_eq!(default_backend().thread_id(), NOOP_THREAD_ID);
}

#[test]
fn test_registration_changes_active_backend() {
    let _serial = GLOBAL_STATE.lock().unwrap();

    unsafe { register_lock_backend(&BROKEN_BACKEND) };
    assert_eq!(active_backend_name(), "threads_broken");
    assert_eq!(current_thread_id(), 0);

    restore_default();
    assert_eq!(active_backend_name(), "threads_noop");
    assert_eq!(current_thread_id(), NOOP_THREAD_ID);
}

#[cfg(unix)]
#[test]
fn test_dynamic_lock_keeps_its_backend_after_swap() {
    let _serial = GLOBAL_STATE.lock().unwrap();

    unsafe { register_lock_backend(pthread_backend()) };
    let lock = DynamicLock::new();
    restore_default();

    assert_eq!(lock.backend_name(), "threads_pthread");
    let _guard = lock.lock();
}
