// SPDX-License-Identifier: MPL-2.0

//! Locking of the native display handle

use super::backend::DisplayLock;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Holds the display lock until dropped
pub struct DisplayGuard<'a> {
    inner: GuardInner<'a>,
}

enum GuardInner<'a> {
    Internal { _guard: MutexGuard<'a, ()> },
    External(&'a dyn DisplayLock),
}

impl<'a> DisplayGuard<'a> {
    pub(crate) fn internal(mutex: &'a Mutex<()>) -> Self {
        let guard = mutex.lock().unwrap_or_else(PoisonError::into_inner);
        Self {
            inner: GuardInner::Internal { _guard: guard },
        }
    }

    pub(crate) fn external(lock: &'a dyn DisplayLock) -> Self {
        lock.lock();
        Self {
            inner: GuardInner::External(lock),
        }
    }

    /// Whether a backend-provided lock is held instead of the internal mutex
    pub fn is_external(&self) -> bool {
        matches!(self.inner, GuardInner::External(_))
    }
}

impl Drop for DisplayGuard<'_> {
    fn drop(&mut self) {
        if let GuardInner::External(lock) = self.inner {
            lock.unlock();
        }
    }
}

impl std::fmt::Debug for DisplayGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayGuard")
            .field("external", &self.is_external())
            .finish()
    }
}

/// Non-reentrant lock with separate lock/unlock calls
///
/// For backends whose connection lock is taken and released from different
/// call sites, as with `XLockDisplay`/`XUnlockDisplay`.
#[derive(Debug, Default)]
pub struct ConditionLock {
    locked: Mutex<bool>,
    released: Condvar,
}

impl ConditionLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        *self.locked.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DisplayLock for ConditionLock {
    fn lock(&self) {
        let mut locked = self.locked.lock().unwrap_or_else(PoisonError::into_inner);
        while *locked {
            locked = self
                .released
                .wait(locked)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *locked = true;
    }

    fn unlock(&self) {
        let mut locked = self.locked.lock().unwrap_or_else(PoisonError::into_inner);
        *locked = false;
        self.released.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_external_guard_releases_on_drop() {
        let lock = ConditionLock::new();
        {
            let guard = DisplayGuard::external(&lock);
            assert!(guard.is_external());
            assert!(lock.is_locked());
        }
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_condition_lock_excludes() {
        let lock = Arc::new(ConditionLock::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lock = Arc::clone(&lock);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                thread::spawn(move || {
                    for _ in 0..100 {
                        lock.lock();
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_inside.fetch_max(now, Ordering::SeqCst);
                        inside.fetch_sub(1, Ordering::SeqCst);
                        lock.unlock();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert!(!lock.is_locked());
    }
}
