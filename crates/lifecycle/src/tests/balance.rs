use super::*;

#[test]
fn test_single_epoch_call_order() {
    let lc = Lifecycle::new();
    let mock = MockSubsystems::new();

    assert_eq!(init!(lc, mock), Ok(()));
    assert_eq!(mock.calls(), [THREADS_INIT, CRYPTO_INIT, SOCKET_INIT]);

    assert_eq!(finalize!(lc, mock), Ok(()));
    assert_eq!(mock.calls(), CLEAN_EPOCH);
    assert_eq!(lc.count(), 0);
}

#[test]
fn test_nested_init_reuses_cached_result() {
    let lc = Lifecycle::new();
    let mock = MockSubsystems::new();

    let first = init!(lc, mock);
    let second = init!(lc, mock);
    assert_eq!(first, second);
    assert_eq!(lc.count(), 2);
    assert_eq!(mock.count(THREADS_INIT), 1);

    assert_eq!(finalize!(lc, mock), Ok(()));
    assert_eq!(lc.count(), 1);
    assert_eq!(mock.count(SOCKET_CLEANUP), 0);

    assert_eq!(finalize!(lc, mock), Ok(()));
    assert_eq!(lc.count(), 0);
    assert_eq!(mock.calls(), CLEAN_EPOCH);
}

#[test]
fn test_balanced_sequences_return_to_idle() {
    for n in 0..6 {
        let lc = Lifecycle::new();
        let mock = MockSubsystems::new();

        for _ in 0..n {
            assert_eq!(init!(lc, mock), Ok(()));
        }
        for _ in 0..n {
            assert_eq!(finalize!(lc, mock), Ok(()));
        }

        assert_eq!(lc.count(), 0);
        if n == 0 {
            assert!(mock.calls().is_empty());
        } else {
            assert_eq!(mock.calls(), CLEAN_EPOCH);
        }
    }
}

#[test]
fn test_finalize_at_zero_is_noop() {
    let lc = Lifecycle::new();
    let mock = MockSubsystems::new();

    assert_eq!(finalize!(lc, mock), Ok(()));
    assert_eq!(finalize!(lc, mock), Ok(()));
    assert_eq!(lc.count(), 0);
    assert!(mock.calls().is_empty());

    // 多余的 finalize 不会让计数变成负数，下一次 init 仍然启动
    assert_eq!(init!(lc, mock), Ok(()));
    assert_eq!(lc.count(), 1);
    assert_eq!(mock.count(THREADS_INIT), 1);
}

#[test]
fn test_second_epoch_runs_bring_up_again() {
    let lc = Lifecycle::new();
    let mock = MockSubsystems::new();

    init!(lc, mock).unwrap();
    finalize!(lc, mock).unwrap();
    init!(lc, mock).unwrap();
    finalize!(lc, mock).unwrap();

    let expected: Vec<_> = CLEAN_EPOCH.iter().chain(CLEAN_EPOCH.iter()).copied().collect();
    assert_eq!(mock.calls(), expected);
}

#[test]
fn test_cached_result_visibility() {
    let lc = Lifecycle::new();
    let mock = MockSubsystems::new();

    assert_eq!(lc.cached_result(), None);
    init!(lc, mock).unwrap();
    assert_eq!(lc.cached_result(), Some(Ok(())));
    finalize!(lc, mock).unwrap();
    assert_eq!(lc.cached_result(), None);
}
