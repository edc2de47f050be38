use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use glshell_gl::arbiter::GlContextArbiter;
use glshell_gl::device::{Extent2D, Viewport};
use parking_lot::Mutex;

use crate::platform::input_event::KeyEvent;

/// framebuffer 尺寸以及与之对应的 viewport
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScreenState {
    pub screen_extent: Extent2D,
    pub viewport: Viewport,
}

/// app 中可以被其他线程和窗口回调访问的部分
///
/// 只由 [`crate::app::Application`] 持有强引用，其他地方通过 [`AppHandle`] 访问。
pub struct AppShared {
    window_extent: Extent2D,
    screen: Mutex<ScreenState>,
    gl_arbiter: GlContextArbiter,
    pending_keys: Mutex<Vec<KeyEvent>>,
    /// finish 开始时清除，之后 [`AppHandle::get`] 不再返回这个 app
    alive: AtomicBool,
}
// new & init
impl AppShared {
    pub fn new(window_extent: Extent2D) -> Self {
        Self {
            window_extent,
            screen: Mutex::new(ScreenState::default()),
            gl_arbiter: GlContextArbiter::new(),
            pending_keys: Mutex::new(Vec::new()),
            alive: AtomicBool::new(true),
        }
    }
}
// getters
impl AppShared {
    /// 创建窗口时的逻辑尺寸
    #[inline]
    pub fn window_extent(&self) -> Extent2D {
        self.window_extent
    }

    pub fn screen(&self) -> ScreenState {
        *self.screen.lock()
    }

    pub fn screen_extent(&self) -> Extent2D {
        self.screen.lock().screen_extent
    }

    /// finish 之后为 `false`，已经拿到的 `Arc` 也能看到
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// 其他线程调用 GL 之前需要先获取这把锁
    #[inline]
    pub fn gl_arbiter(&self) -> &GlContextArbiter {
        &self.gl_arbiter
    }
}
// update
impl AppShared {
    /// 记录新的 framebuffer 尺寸，返回应当设置的 viewport
    pub(crate) fn update_screen(&self, extent: Extent2D) -> Viewport {
        let viewport = Viewport::full(extent);
        *self.screen.lock() = ScreenState {
            screen_extent: extent,
            viewport,
        };
        viewport
    }

    pub(crate) fn retire(&self) {
        self.alive.store(false, Ordering::Release);
    }

    pub(crate) fn push_key_event(&self, event: KeyEvent) {
        self.pending_keys.lock().push(event);
    }

    pub(crate) fn take_key_events(&self) -> Vec<KeyEvent> {
        std::mem::take(&mut *self.pending_keys.lock())
    }
}

/// 指向当前 app 的弱引用
///
/// init 之前以及 finish 开始之后 [`AppHandle::get`] 返回 `None`，
/// 即使其他线程还持有之前拿到的 `Arc<AppShared>`。
/// 可以 clone 之后交给其他线程，例如在后台线程中获取 GL 仲裁器：
///
/// ```ignore
/// std::thread::spawn(move || {
///     let Some(app) = handle.get() else { return };
///     if let Some(_gl) = app.gl_arbiter().try_lock_for(Duration::from_millis(50)) {
///         // GL calls
///     }
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppHandle(Weak<AppShared>);
impl AppHandle {
    pub fn new(shared: &Arc<AppShared>) -> Self {
        Self(Arc::downgrade(shared))
    }

    /// 不指向任何 app 的句柄
    pub fn empty() -> Self {
        Self(Weak::new())
    }

    pub fn get(&self) -> Option<Arc<AppShared>> {
        self.0.upgrade().filter(|shared| shared.is_alive())
    }
}
