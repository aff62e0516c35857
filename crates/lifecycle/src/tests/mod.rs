// Unit tests for the lifecycle counter.
//
// Each test drives its own `Lifecycle` with a `MockSubsystems` recorder, so they
// run in parallel without touching the global instance.

use std::sync::Arc;

use test_support::mock::subsystems::*;

use crate::{InitError, Lifecycle, Stage, Subsystems};

impl Subsystems for MockSubsystems {
    fn threads_init(&self) -> Result<(), i32> {
        to_result(self.record_init(THREADS_INIT))
    }

    fn crypto_init(&self) -> Result<(), i32> {
        to_result(self.record_init(CRYPTO_INIT))
    }

    fn socket_init(&self) -> Result<(), i32> {
        to_result(self.record_init(SOCKET_INIT))
    }

    fn socket_cleanup(&self) {
        self.record(SOCKET_CLEANUP);
    }

    fn crypto_finalize(&self) {
        self.record(CRYPTO_FINALIZE);
    }

    fn threads_finalize(&self) {
        self.record(THREADS_FINALIZE);
    }
}

fn to_result(status: i32) -> Result<(), i32> {
    if status == 0 { Ok(()) } else { Err(status) }
}

/// Test-only shorthand for an explicit, lock-taking call.
macro_rules! init {
    ($lc:expr, $mock:expr) => {
        $lc.init(&$mock)
    };
}

macro_rules! finalize {
    ($lc:expr, $mock:expr) => {
        $lc.finalize(&$mock)
    };
}

mod balance;
mod concurrency;
mod failure;
