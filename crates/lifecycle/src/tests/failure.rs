use super::*;

#[test]
fn test_crypto_failure_short_circuits() {
    let lc = Lifecycle::new();
    let mock = MockSubsystems::new();
    mock.fail_crypto(-1);

    let err = init!(lc, mock).unwrap_err();
    assert_eq!(
        err,
        InitError {
            stage: Stage::Crypto,
            code: -1,
        }
    );
    assert_eq!(err.to_status(), -1);
    assert_eq!(mock.calls(), [THREADS_INIT, CRYPTO_INIT]);

    assert_eq!(finalize!(lc, mock), Ok(()));
    assert_eq!(lc.count(), 0);
    // 启动失败的周期不执行任何关闭步骤
    assert_eq!(mock.calls(), [THREADS_INIT, CRYPTO_INIT]);
}

#[test]
fn test_threads_failure_stops_before_crypto() {
    let lc = Lifecycle::new();
    let mock = MockSubsystems::new();
    mock.fail_threads(-12);

    assert_eq!(
        init!(lc, mock),
        Err(InitError {
            stage: Stage::Threads,
            code: -12,
        })
    );
    assert_eq!(mock.calls(), [THREADS_INIT]);
    finalize!(lc, mock).unwrap();
    assert_eq!(mock.calls(), [THREADS_INIT]);
}

#[test]
fn test_socket_failure_skips_teardown() {
    let lc = Lifecycle::new();
    let mock = MockSubsystems::new();
    mock.fail_socket(5);

    assert_eq!(init!(lc, mock).unwrap_err().stage, Stage::Sockets);
    finalize!(lc, mock).unwrap();
    assert_eq!(mock.calls(), [THREADS_INIT, CRYPTO_INIT, SOCKET_INIT]);
}

#[test]
fn test_failure_is_cached_for_the_epoch() {
    let lc = Lifecycle::new();
    let mock = MockSubsystems::new();
    mock.fail_crypto(-1);

    let first = init!(lc, mock);
    // 修复后同一周期内仍然看到旧结果
    mock.fail_crypto(0);
    let second = init!(lc, mock);
    assert_eq!(first, second);
    assert!(second.is_err());
    assert_eq!(mock.count(CRYPTO_INIT), 1);
    assert_eq!(lc.cached_result(), Some(first));
}

#[test]
fn test_next_epoch_retries_after_failure() {
    let lc = Lifecycle::new();
    let mock = MockSubsystems::new();
    mock.fail_crypto(-1);

    assert!(init!(lc, mock).is_err());
    finalize!(lc, mock).unwrap();

    mock.fail_crypto(0);
    mock.clear();
    assert_eq!(init!(lc, mock), Ok(()));
    finalize!(lc, mock).unwrap();
    assert_eq!(mock.calls(), CLEAN_EPOCH);
}
