use glshell_gl::arbiter::GlContextGuard;
use glshell_gl::check_gl_error;

use crate::app_shared::AppShared;
use crate::error::AppError;
use crate::outer_app::OuterApp;
use crate::platform::window_system::AppWindow;

/// 每一帧与显示器刷新同步
pub const SWAP_INTERVAL: u32 = 1;
/// 默认 framebuffer 的背景色
pub const CLEAR_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// 帧循环
///
/// 每一帧严格按顺序执行：
/// 1. poll 窗口事件（回调同步进入 event_dispatch），然后把按键转交给 outer app
/// 1. begin GUI frame
/// 1. outer app 绘制 GUI
/// 1. end GUI frame，得到 draw list
/// 1. 绑定默认 framebuffer 并清屏
/// 1. 提交 GUI draw list
/// 1. present
///
/// 窗口的关闭标记在每一帧开始前检查，这是唯一的退出路径。
pub struct FrameLoop {
    guard_main_thread: bool,
    frame_count: u64,
}
// new & init
impl FrameLoop {
    pub fn new(guard_main_thread: bool) -> Self {
        Self {
            guard_main_thread,
            frame_count: 0,
        }
    }
}
// getters
impl FrameLoop {
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
// update
impl FrameLoop {
    pub fn run<W: AppWindow>(
        &mut self,
        window: &mut W,
        shared: &AppShared,
        outer_app: &mut dyn OuterApp,
    ) -> Result<(), AppError> {
        {
            let _gl = self.lock_gl(shared);
            window.set_swap_interval(SWAP_INTERVAL)?;
        }

        while !window.should_close() {
            self.frame(window, shared, outer_app)?;
        }

        log::info!("frame loop exited after {} frames", self.frame_count);
        Ok(())
    }

    pub fn frame<W: AppWindow>(
        &mut self,
        window: &mut W,
        shared: &AppShared,
        outer_app: &mut dyn OuterApp,
    ) -> Result<(), AppError> {
        // Poll Events ============================
        {
            // resize 回调会调用 glViewport
            let _gl = self.lock_gl(shared);
            window.poll_events();
        }
        for key_event in shared.take_key_events() {
            outer_app.on_key(&key_event);
        }

        // Build Gui ==================================
        window.begin_gui_frame()?;
        window.compose_gui(outer_app);
        window.end_gui_frame();

        // Render & Present ================================
        {
            let _gl = self.lock_gl(shared);

            let gl = window.gl().ok_or(AppError::GlNotLoaded)?;
            gl.bind_default_framebuffer();
            gl.clear_color_buffer(CLEAR_COLOR);

            window.submit_gui()?;
            if let Some(gl) = window.gl() {
                check_gl_error!(gl);
            }

            window.swap_buffers()?;
        }

        self.frame_count += 1;
        Ok(())
    }

    fn lock_gl<'a>(&self, shared: &'a AppShared) -> Option<GlContextGuard<'a>> {
        self.guard_main_thread.then(|| shared.gl_arbiter().lock())
    }
}
