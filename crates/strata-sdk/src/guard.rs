// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The process-wide run guard.
//!
//! Collaborators receive the engine through explicit context, not a global
//! lookup — but "at most one live engine per process" is still part of the
//! contract. The guard enforces it: acquiring while another guard is live is
//! a fail-fast precondition violation, never a silent replacement.

use std::sync::atomic::{AtomicBool, Ordering};

static ENGINE_LIVE: AtomicBool = AtomicBool::new(false);

/// Marks the process as hosting a live engine for the guard's lifetime.
pub(crate) struct RunGuard {
    _private: (),
}

impl RunGuard {
    /// Acquires the guard, panicking if an engine is already live.
    pub(crate) fn acquire() -> Self {
        Self::try_acquire()
            .expect("an Engine is already running in this process; at most one may be live")
    }

    /// Acquires the guard if no engine is live.
    pub(crate) fn try_acquire() -> Option<Self> {
        ENGINE_LIVE
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .ok()
            .map(|_| Self { _private: () })
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        ENGINE_LIVE.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // The guard is process-global state; serialize the tests that touch it.
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn guard_is_exclusive_and_releases_on_drop() {
        let _lock = TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let first = RunGuard::try_acquire().expect("no engine live yet");
        assert!(
            RunGuard::try_acquire().is_none(),
            "second acquisition while live must fail"
        );
        drop(first);

        let second = RunGuard::try_acquire().expect("guard released on drop");
        drop(second);
    }

    #[test]
    #[should_panic(expected = "already running")]
    fn acquiring_while_live_fails_fast() {
        let _lock = TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let _first = RunGuard::acquire();
        let _second = RunGuard::acquire();
    }
}
