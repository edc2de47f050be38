use std::marker::PhantomData;
use std::thread::{self, ThreadId};
use std::time::Duration;

use parking_lot::lock_api::{RawMutex as RawMutexApi, RawMutexTimed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArbiterError {
    #[error("GL context lock released while not held")]
    NotHeld,
    #[error("GL context lock released by a thread that does not hold it")]
    NotOwner,
}

/// GL context 仲裁器
///
/// 同一时刻只能有一个线程对 GL context 发起调用。主线程之外的线程（资源加载、worker 等）
/// 在调用任何 GL 函数之前必须先拿到这把锁，并在全部 GL 调用结束后释放。
///
/// 底层是 `parking_lot` 的 raw mutex，加锁与解锁是分开的两个调用，
/// 因此另外记录了持有者线程，用来拒绝错误的 `release`。
///
/// # 使用示例
/// ```ignore
/// if arbiter.try_acquire(50) {
///     upload_texture(gl);
///     arbiter.release()?;
/// }
///
/// // 或者使用 guard
/// if let Some(_guard) = arbiter.try_lock_for(Duration::from_millis(50)) {
///     upload_texture(gl);
/// }
/// ```
pub struct GlContextArbiter {
    raw: parking_lot::RawMutex,
    owner: parking_lot::Mutex<Option<ThreadId>>,
}
// new & init
impl Default for GlContextArbiter {
    fn default() -> Self {
        Self::new()
    }
}
impl GlContextArbiter {
    pub fn new() -> Self {
        Self {
            raw: <parking_lot::RawMutex as RawMutexApi>::INIT,
            owner: parking_lot::Mutex::new(None),
        }
    }
}
// acquire & release
impl GlContextArbiter {
    /// 尝试获取 GL context 的使用权
    ///
    /// - `timeout_ms == 0`：立即返回，不等待
    /// - `timeout_ms > 0`：最多阻塞 `timeout_ms` 毫秒
    ///
    /// 返回 `true` 表示当前线程已持有锁，之后必须在同一线程上调用 [`Self::release`]。
    /// 锁不可重入，持有者再次调用会得到 `false`。
    pub fn try_acquire(&self, timeout_ms: u64) -> bool {
        let acquired = if timeout_ms == 0 {
            self.raw.try_lock()
        } else {
            self.raw.try_lock_for(Duration::from_millis(timeout_ms))
        };

        if acquired {
            self.mark_owner();
        } else {
            log::debug!("GL context busy, gave up after {timeout_ms} ms");
        }
        acquired
    }

    /// 释放 GL context 的使用权
    ///
    /// 未持有锁或者不是持有者线程时返回错误，锁的状态不变。
    pub fn release(&self) -> Result<(), ArbiterError> {
        let mut owner = self.owner.lock();
        match *owner {
            None => Err(ArbiterError::NotHeld),
            Some(id) if id != thread::current().id() => Err(ArbiterError::NotOwner),
            Some(_) => {
                *owner = None;
                // SAFETY: owner 记录表明当前线程通过 raw.lock 系列函数持有这把锁
                unsafe { self.raw.unlock() };
                log::trace!("GL context released by {:?}", thread::current().name());
                Ok(())
            }
        }
    }

    /// 锁当前是否被某个线程持有
    pub fn is_held(&self) -> bool {
        self.raw.is_locked()
    }

    fn mark_owner(&self) {
        *self.owner.lock() = Some(thread::current().id());
        log::trace!("GL context acquired by {:?}", thread::current().name());
    }
}
// guard
impl GlContextArbiter {
    /// 阻塞直到获取 GL context，主线程在自己的 GL 调用区间使用
    pub fn lock(&self) -> GlContextGuard<'_> {
        self.raw.lock();
        self.mark_owner();
        GlContextGuard::new(self)
    }

    pub fn try_lock(&self) -> Option<GlContextGuard<'_>> {
        self.try_acquire(0).then(|| GlContextGuard::new(self))
    }

    /// 最多等待 `timeout`，毫秒以下的部分会被截断
    pub fn try_lock_for(&self, timeout: Duration) -> Option<GlContextGuard<'_>> {
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.try_acquire(timeout_ms).then(|| GlContextGuard::new(self))
    }
}

/// 持有期间当前线程独占 GL context，drop 时释放
///
/// 必须在获取它的线程上 drop，所以不是 `Send`。
#[must_use = "the GL context is released as soon as the guard is dropped"]
pub struct GlContextGuard<'a> {
    arbiter: &'a GlContextArbiter,
    _not_send: PhantomData<*const ()>,
}
impl<'a> GlContextGuard<'a> {
    fn new(arbiter: &'a GlContextArbiter) -> Self {
        Self {
            arbiter,
            _not_send: PhantomData,
        }
    }
}
impl Drop for GlContextGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.arbiter.release() {
            log::error!("failed to release GL context guard: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier, mpsc};
    use std::time::Instant;

    #[test]
    fn test_acquire_release_between_threads() {
        let arbiter = GlContextArbiter::new();

        assert!(arbiter.try_acquire(0));
        thread::scope(|s| {
            s.spawn(|| assert!(!arbiter.try_acquire(0))).join().unwrap();
        });

        arbiter.release().unwrap();
        thread::scope(|s| {
            s.spawn(|| {
                assert!(arbiter.try_acquire(0));
                arbiter.release().unwrap();
            })
            .join()
            .unwrap();
        });
        assert!(!arbiter.is_held());
    }

    #[test]
    fn test_concurrent_immediate_acquire_single_winner() {
        const THREADS: usize = 8;
        let arbiter = GlContextArbiter::new();
        let winners = AtomicUsize::new(0);
        let start = Barrier::new(THREADS);
        let attempted = Barrier::new(THREADS);

        thread::scope(|s| {
            for _ in 0..THREADS {
                s.spawn(|| {
                    start.wait();
                    let begin = Instant::now();
                    let acquired = arbiter.try_acquire(0);
                    assert!(begin.elapsed() < Duration::from_millis(100));
                    if acquired {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                    // 所有线程都尝试过之后，胜者才释放
                    attempted.wait();
                    if acquired {
                        arbiter.release().unwrap();
                    }
                });
            }
        });

        assert_eq!(winners.load(Ordering::SeqCst), 1);
        assert!(!arbiter.is_held());
    }

    #[test]
    fn test_timeout_against_long_holder() {
        let arbiter = Arc::new(GlContextArbiter::new());
        let (held_tx, held_rx) = mpsc::channel();

        let holder = {
            let arbiter = arbiter.clone();
            thread::spawn(move || {
                assert!(arbiter.try_acquire(0));
                held_tx.send(()).unwrap();
                thread::sleep(Duration::from_millis(200));
                arbiter.release().unwrap();
            })
        };
        held_rx.recv().unwrap();

        let begin = Instant::now();
        let acquired = arbiter.try_acquire(50);
        let elapsed = begin.elapsed();

        assert!(!acquired);
        assert!(elapsed >= Duration::from_millis(50), "returned too early: {elapsed:?}");
        assert!(elapsed < Duration::from_millis(180), "waited for the holder: {elapsed:?}");

        holder.join().unwrap();
        assert!(arbiter.try_acquire(0));
        arbiter.release().unwrap();
    }

    #[test]
    fn test_timed_acquire_succeeds_when_holder_releases_in_time() {
        let arbiter = Arc::new(GlContextArbiter::new());
        let (held_tx, held_rx) = mpsc::channel();

        let holder = {
            let arbiter = arbiter.clone();
            thread::spawn(move || {
                let _guard = arbiter.lock();
                held_tx.send(()).unwrap();
                thread::sleep(Duration::from_millis(30));
            })
        };
        held_rx.recv().unwrap();

        let guard = arbiter.try_lock_for(Duration::from_secs(2));
        assert!(guard.is_some());
        drop(guard);

        holder.join().unwrap();
        assert!(!arbiter.is_held());
    }

    #[test]
    fn test_release_without_acquire() {
        let arbiter = GlContextArbiter::new();
        assert_eq!(arbiter.release(), Err(ArbiterError::NotHeld));
        assert!(!arbiter.is_held());
    }

    #[test]
    fn test_release_from_other_thread_is_rejected() {
        let arbiter = GlContextArbiter::new();
        assert!(arbiter.try_acquire(0));

        thread::scope(|s| {
            s.spawn(|| assert_eq!(arbiter.release(), Err(ArbiterError::NotOwner))).join().unwrap();
        });

        assert!(arbiter.is_held());
        arbiter.release().unwrap();
    }

    #[test]
    fn test_not_reentrant() {
        let arbiter = GlContextArbiter::new();
        assert!(arbiter.try_acquire(0));
        assert!(!arbiter.try_acquire(0));
        assert!(!arbiter.try_acquire(10));
        arbiter.release().unwrap();
        assert_eq!(arbiter.release(), Err(ArbiterError::NotHeld));
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let arbiter = GlContextArbiter::new();
        {
            let _guard = arbiter.try_lock().unwrap();
            assert!(arbiter.is_held());
            assert!(arbiter.try_lock().is_none());
        }
        assert!(!arbiter.is_held());
        assert!(arbiter.try_acquire(0));
        arbiter.release().unwrap();
    }
}
