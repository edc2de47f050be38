use std::sync::Arc;

use crate::app_shared::{AppHandle, AppShared};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::event_dispatch;
use crate::frame_loop::FrameLoop;
use crate::lifecycle::{Lifecycle, LifecyclePhase};
use crate::outer_app::OuterApp;
use crate::platform::window_system::{AppWindow, PlatformError, WindowDesc, WindowSystem};

/// 桌面 shell 的顶层对象
///
/// 独占窗口系统、窗口（以及其中的 GL context 和 GUI）和 [`AppShared`]。
/// 生命周期见 [`crate::lifecycle::Lifecycle`]：
///
/// ```ignore
/// let mut app = Application::new(config, window_system, Box::new(DemoApp::default()));
/// app.init()?;
/// app.run()?;
/// app.finish()?;
/// ```
pub struct Application<S: WindowSystem> {
    config: AppConfig,
    window_system: S,

    /// init 成功之后才有值，finish 时销毁
    window: Option<S::Window>,
    /// 唯一的强引用，窗口回调与其他线程只持有 [`AppHandle`]
    shared: Option<Arc<AppShared>>,

    lifecycle: Lifecycle,
    outer_app: Box<dyn OuterApp>,
    frame_loop: FrameLoop,
}
// new & init
impl<S: WindowSystem> Application<S> {
    pub fn new(config: AppConfig, window_system: S, outer_app: Box<dyn OuterApp>) -> Self {
        let frame_loop = FrameLoop::new(config.gl.guard_main_thread);
        Self {
            config,
            window_system,
            window: None,
            shared: None,
            lifecycle: Lifecycle::new(),
            outer_app,
            frame_loop,
        }
    }

    /// 启动窗口系统，创建窗口与 GL context，初始化 GUI
    ///
    /// 任意一步失败时，已经创建的资源会被依次释放，app 停留在 `Uninitialized`。
    pub fn init(&mut self) -> Result<(), AppError> {
        self.lifecycle.check(LifecyclePhase::Initialized)?;

        let desc = self.config.window_desc();
        log::info!("init app: {} ({})", desc.title, desc.extent);

        self.window_system.startup()?;
        let mut window = match self.window_system.create_window(&desc) {
            Ok(window) => window,
            Err(e) => {
                self.window_system.shutdown();
                return Err(e.into());
            }
        };

        let shared = Arc::new(AppShared::new(desc.extent));
        window.set_user_data(AppHandle::new(&shared));

        if let Err(e) = Self::init_window(&mut window, &shared, &desc) {
            log::error!("failed to init window: {e}");
            window.destroy();
            drop(shared);
            self.window_system.shutdown();
            return Err(e.into());
        }

        self.window = Some(window);
        self.shared = Some(shared);
        self.outer_app.init(&self.handle());

        self.lifecycle.advance(LifecyclePhase::Initialized)?;
        Ok(())
    }

    fn init_window(window: &mut S::Window, shared: &AppShared, desc: &WindowDesc) -> Result<(), PlatformError> {
        window.make_context_current()?;

        let info = window.load_gl()?;
        info.log();
        let (required_major, required_minor) = desc.gl_version;
        if !info.supports(required_major as u32, required_minor as u32) {
            return Err(PlatformError::GlVersionUnsupported {
                required_major,
                required_minor,
                found: info.version,
            });
        }

        window.init_gui()?;

        // 高 DPI 下 framebuffer 与窗口的逻辑尺寸不同
        let framebuffer = window.framebuffer_size();
        event_dispatch::on_framebuffer_resize(Some(shared), window.gl(), framebuffer.width, framebuffer.height);

        Ok(())
    }
}
// update
impl<S: WindowSystem> Application<S> {
    /// 进入帧循环，直到窗口被要求关闭
    pub fn run(&mut self) -> Result<(), AppError> {
        self.lifecycle.advance(LifecyclePhase::Running)?;

        let (Some(window), Some(shared)) = (self.window.as_mut(), self.shared.as_deref()) else {
            return Err(AppError::NotInitialized);
        };
        self.frame_loop.run(window, shared, self.outer_app.as_mut())
    }
}
// destroy
impl<S: WindowSystem> Application<S> {
    /// 关闭 GUI、销毁窗口与 GL context、关闭窗口系统
    ///
    /// 只有第一次调用会释放资源，之后的调用返回 [`AppError::AlreadyFinished`]。
    pub fn finish(&mut self) -> Result<(), AppError> {
        self.lifecycle.advance(LifecyclePhase::Finished)?;

        // 先让 handle 失效，之后其他线程拿不到新的 Arc
        let shared = self.shared.take();
        if let Some(shared) = shared.as_deref() {
            shared.retire();
        }

        if let Some(mut window) = self.window.take() {
            // 等其他线程把手上的 GL 调用做完再销毁 context
            let _gl = shared
                .as_deref()
                .filter(|_| self.config.gl.guard_main_thread)
                .map(|shared| shared.gl_arbiter().lock());
            window.shutdown_gui();
            window.destroy();
        }
        drop(shared);
        self.window_system.shutdown();

        log::info!("app finished after {} frames", self.frame_loop.frame_count());
        Ok(())
    }
}
impl<S: WindowSystem> Drop for Application<S> {
    fn drop(&mut self) {
        if matches!(self.lifecycle.phase(), LifecyclePhase::Initialized | LifecyclePhase::Running) {
            log::warn!("app dropped without finish");
            if let Err(e) = self.finish() {
                log::error!("failed to finish app: {e}");
            }
        }
    }
}
// getters
impl<S: WindowSystem> Application<S> {
    #[inline]
    pub fn phase(&self) -> LifecyclePhase {
        self.lifecycle.phase()
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// init 之前与 finish 之后是一个空句柄
    pub fn handle(&self) -> AppHandle {
        self.shared.as_ref().map(AppHandle::new).unwrap_or_default()
    }

    #[inline]
    pub fn shared(&self) -> Option<&Arc<AppShared>> {
        self.shared.as_ref()
    }

    #[inline]
    pub fn window(&self) -> Option<&S::Window> {
        self.window.as_ref()
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_loop.frame_count()
    }
}
