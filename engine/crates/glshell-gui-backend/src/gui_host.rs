//! 参考 imgui-rs 的 glow + winit 示例

use std::time::Instant;

use imgui_glow_renderer::AutoRenderer;
use imgui_glow_renderer::glow;
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use winit::window::Window;

#[derive(Debug, thiserror::Error)]
pub enum GuiError {
    #[error("failed to create the imgui renderer: {0}")]
    Init(String),
    #[error("failed to prepare the imgui frame: {0}")]
    Frame(String),
    #[error("failed to render imgui draw data: {0}")]
    Render(String),
}

/// 当前 GUI 帧进行到哪一步
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FramePhase {
    Idle,
    Begun,
    Composed,
    Rendered,
}

/// imgui 的宿主：imgui context + winit 平台层 + glow 渲染器
///
/// 每帧按顺序调用 [`Self::begin_frame`] → [`Self::compose`] → [`Self::end_frame`] → [`Self::submit`]，
/// 顺序不对的调用会被忽略。
pub struct GuiHost {
    // drop 顺序：renderer → platform → imgui context
    renderer: AutoRenderer,
    platform: WinitPlatform,
    imgui_ctx: imgui::Context,

    last_frame: Instant,
    phase: FramePhase,
}
// new & init
impl GuiHost {
    /// 调用时 `gl` 对应的 context 必须是 current
    pub fn new(window: &Window, gl: glow::Context) -> Result<Self, GuiError> {
        let mut imgui_ctx = imgui::Context::create();
        // disable automatic saving .ini file
        imgui_ctx.set_ini_filename(None);
        imgui_ctx.style_mut().use_dark_colors();
        imgui_ctx.io_mut().config_flags |= imgui::ConfigFlags::DOCKING_ENABLE;

        let mut platform = WinitPlatform::new(&mut imgui_ctx);
        platform.attach_window(imgui_ctx.io_mut(), window, HiDpiMode::Rounded);
        log::info!("imgui hidpi factor: {}", platform.hidpi_factor());

        // 会上传字体纹理并编译 shader
        let renderer = AutoRenderer::new(gl, &mut imgui_ctx).map_err(|e| GuiError::Init(format!("{e:?}")))?;

        Ok(Self {
            renderer,
            platform,
            imgui_ctx,
            last_frame: Instant::now(),
            phase: FramePhase::Idle,
        })
    }
}
// tools
impl GuiHost {
    /// 接受 window 的事件
    pub fn handle_event<T>(&mut self, window: &Window, event: &winit::event::Event<T>) {
        self.platform.handle_event(self.imgui_ctx.io_mut(), window, event);
    }

    pub fn hidpi_factor(&self) -> f64 {
        self.platform.hidpi_factor()
    }
}
// update
impl GuiHost {
    /// # Phase: IO
    /// 1. 更新 imgui 的 delta time
    /// 1. 可能会修改鼠标位置
    pub fn begin_frame(&mut self, window: &Window) -> Result<(), GuiError> {
        let now = Instant::now();
        self.imgui_ctx.io_mut().update_delta_time(now - self.last_frame);
        self.last_frame = now;

        self.platform
            .prepare_frame(self.imgui_ctx.io_mut(), window)
            .map_err(|e| GuiError::Frame(e.to_string()))?;

        self.phase = FramePhase::Begun;
        Ok(())
    }

    /// # Phase: Update
    pub fn compose(&mut self, window: &Window, ui_func: impl FnOnce(&imgui::Ui)) {
        if self.phase != FramePhase::Begun {
            log::warn!("gui compose called in {:?}", self.phase);
            return;
        }

        let ui = self.imgui_ctx.new_frame();
        ui_func(ui);
        // 看源码可知：imgui 可能会隐藏鼠标指针
        self.platform.prepare_render(ui, window);

        self.phase = FramePhase::Composed;
    }

    /// 结束 imgui 帧，生成 draw list
    pub fn end_frame(&mut self) {
        if self.phase != FramePhase::Composed {
            return;
        }

        self.imgui_ctx.render();
        self.phase = FramePhase::Rendered;
    }

    /// # Phase: Render
    ///
    /// 把 [`Self::end_frame`] 生成的 draw list 画到当前绑定的 framebuffer 上
    pub fn submit(&mut self) -> Result<(), GuiError> {
        if self.phase != FramePhase::Rendered {
            return Ok(());
        }
        self.phase = FramePhase::Idle;

        let Some(draw_data) = last_draw_data(&self.imgui_ctx) else {
            return Ok(());
        };
        self.renderer.render(draw_data).map_err(|e| GuiError::Render(format!("{e:?}")))
    }
}
// destroy
impl GuiHost {
    /// 释放 GL 资源，调用时 context 必须是 current
    pub fn destroy(self) {
        log::info!("destroy gui host");
        drop(self);
    }
}

/// 最近一次 `render` 生成的 draw data，还没有 render 过时为 `None`
///
/// 借用跟 context 绑定：下一次 `new_frame` 需要 `&mut Context`，所以返回值不会悬垂。
fn last_draw_data(_ctx: &imgui::Context) -> Option<&imgui::DrawData> {
    // SAFETY: imgui 0.12（docking，imgui-sys 0.12）里 `imgui::DrawData` 是 `ImDrawData` 的 #[repr(C)] 镜像，
    // `Context::render` 本身也是这样转换的。同一时间只能有一个活动的 context，所以 igGetDrawData 读到的就是 `_ctx`。
    unsafe {
        let raw = imgui::sys::igGetDrawData();
        (!raw.is_null()).then(|| &*(raw as *const imgui::DrawData))
    }
}
