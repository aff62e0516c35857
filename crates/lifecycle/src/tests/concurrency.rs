use std::sync::Barrier;
use std::time::Duration;

use super::*;

#[test]
fn test_two_racing_inits_bring_up_once() {
    let lc = Arc::new(Lifecycle::new());
    let mock = Arc::new(MockSubsystems::new());
    mock.set_bring_up_delay(Duration::from_millis(20));
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let lc = Arc::clone(&lc);
            let mock = Arc::clone(&mock);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                lc.init(&*mock)
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results[0], results[1]);
    assert_eq!(lc.count(), 2);
    assert_eq!(mock.calls(), [THREADS_INIT, CRYPTO_INIT, SOCKET_INIT]);
}

#[test]
fn test_racing_inits_observe_same_failure() {
    const THREADS: usize = 8;

    let lc = Arc::new(Lifecycle::new());
    let mock = Arc::new(MockSubsystems::new());
    mock.fail_crypto(-3);
    mock.set_bring_up_delay(Duration::from_millis(10));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let lc = Arc::clone(&lc);
            let mock = Arc::clone(&mock);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                lc.init(&*mock)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(
            handle.join().unwrap(),
            Err(InitError {
                stage: Stage::Crypto,
                code: -3,
            })
        );
    }
    assert_eq!(lc.count(), THREADS);
    assert_eq!(mock.count(THREADS_INIT), 1);
    assert_eq!(mock.count(CRYPTO_INIT), 1);
}

#[test]
fn test_racing_init_finalize_pairs_balance() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 200;

    let lc = Arc::new(Lifecycle::new());
    let mock = Arc::new(MockSubsystems::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let lc = Arc::clone(&lc);
            let mock = Arc::clone(&mock);
            std::thread::spawn(move || {
                for _ in 0..ROUNDS {
                    assert_eq!(lc.init(&*mock), Ok(()));
                    assert_eq!(lc.finalize(&*mock), Ok(()));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(lc.count(), 0);
    // 每个周期的启动和关闭成对出现
    assert_eq!(mock.count(THREADS_INIT), mock.count(THREADS_FINALIZE));
    assert_eq!(mock.count(SOCKET_INIT), mock.count(SOCKET_CLEANUP));
    for epoch in mock.calls().chunks(CLEAN_EPOCH.len()) {
        assert_eq!(epoch, CLEAN_EPOCH);
    }
}
