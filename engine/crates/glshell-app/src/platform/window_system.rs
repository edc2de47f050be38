use glshell_gl::device::{Extent2D, GlDevice, GlInfo};

use crate::app_shared::AppHandle;
use crate::outer_app::OuterApp;

/// 窗口系统与 GL 后端的错误
///
/// 后端的错误类型各不相同，并且不一定是 `Send + Sync`，这里统一保存为字符串。
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("failed to start the window system: {0}")]
    Startup(String),
    #[error("window system is not running")]
    NotStarted,
    #[error("failed to create window: {0}")]
    WindowCreation(String),
    #[error("failed to make the GL context current: {0}")]
    ContextActivation(String),
    #[error("failed to load OpenGL functions: {0}")]
    GlLoad(String),
    #[error("OpenGL {required_major}.{required_minor} is not supported, driver reports {found}")]
    GlVersionUnsupported {
        required_major: u8,
        required_minor: u8,
        found: String,
    },
    #[error("failed to initialize the GUI: {0}")]
    GuiInit(String),
    #[error("GUI frame failed: {0}")]
    GuiFrame(String),
    #[error("failed to present: {0}")]
    Present(String),
}

/// 创建窗口时使用的参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDesc {
    pub title: String,
    /// 逻辑尺寸，创建之后不再改变
    pub extent: Extent2D,
    /// 需要的最低 OpenGL 版本，core profile
    pub gl_version: (u8, u8),
}

/// 窗口系统，负责启动/关闭以及创建窗口
pub trait WindowSystem {
    type Window: AppWindow;

    /// 启动窗口系统，失败时不会创建任何资源
    fn startup(&mut self) -> Result<(), PlatformError>;

    /// 创建窗口以及对应的 GL context（此时 context 还不是 current）
    fn create_window(&mut self, desc: &WindowDesc) -> Result<Self::Window, PlatformError>;

    /// 关闭窗口系统，必须在所有窗口销毁之后调用
    fn shutdown(&mut self);
}

/// 一个带 GL context 和 GUI overlay 的原生窗口
///
/// 由 [`crate::app::Application`] 独占，在 init 中创建，在 finish 中通过 [`AppWindow::destroy`] 销毁。
pub trait AppWindow {
    /// 关联窗口与 app，窗口系统的回调通过它找回 app
    fn set_user_data(&mut self, owner: AppHandle);

    /// 让 context 在当前线程上成为 current
    fn make_context_current(&mut self) -> Result<(), PlatformError>;

    /// 加载 GL 函数指针，返回驱动信息
    fn load_gl(&mut self) -> Result<GlInfo, PlatformError>;

    /// GL 函数加载之前为 `None`
    fn gl(&self) -> Option<&dyn GlDevice>;

    fn init_gui(&mut self) -> Result<(), PlatformError>;

    /// framebuffer 的像素尺寸
    fn framebuffer_size(&self) -> Extent2D;

    fn set_swap_interval(&mut self, interval: u32) -> Result<(), PlatformError>;

    /// 处理所有待处理的窗口事件，回调会同步地进入 [`crate::event_dispatch`]
    fn poll_events(&mut self);

    /// 窗口的关闭标记
    fn should_close(&self) -> bool;

    // GUI 帧的各个阶段，按顺序调用
    fn begin_gui_frame(&mut self) -> Result<(), PlatformError>;
    fn compose_gui(&mut self, outer_app: &mut dyn OuterApp);
    fn end_gui_frame(&mut self);
    fn submit_gui(&mut self) -> Result<(), PlatformError>;

    fn swap_buffers(&mut self) -> Result<(), PlatformError>;

    fn shutdown_gui(&mut self);

    /// 销毁窗口和 GL context
    fn destroy(self)
    where
        Self: Sized;
}
