//! 测试用的窗口系统与 GL 设备，记录所有调用的顺序

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use glshell_gl::device::{Extent2D, GlDevice, GlInfo, Viewport};

use crate::app_shared::AppHandle;
use crate::event_dispatch;
use crate::outer_app::OuterApp;
use crate::platform::input_event::{InputEvent, KeyEvent};
use crate::platform::window_system::{AppWindow, PlatformError, WindowDesc, WindowSystem};
use crate::window_user_data::WindowUserData;

#[derive(Debug, Default, Clone)]
pub struct CallLog(Rc<RefCell<Vec<String>>>);
impl CallLog {
    pub fn push(&self, call: impl Into<String>) {
        self.0.borrow_mut().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.0.borrow().iter().filter(|c| c.as_str() == call).count()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

pub struct MockGl {
    log: CallLog,
    pub errors: RefCell<VecDeque<u32>>,
    pub version: (u32, u32),
    viewports: RefCell<Vec<Viewport>>,
}
impl MockGl {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            errors: RefCell::default(),
            version: (3, 3),
            viewports: RefCell::default(),
        }
    }

    pub fn last_viewport(&self) -> Option<Viewport> {
        self.viewports.borrow().last().copied()
    }
}
impl GlDevice for MockGl {
    fn set_viewport(&self, viewport: Viewport) {
        self.log.push(format!(
            "set_viewport({}, {}, {}, {})",
            viewport.x, viewport.y, viewport.width, viewport.height
        ));
        self.viewports.borrow_mut().push(viewport);
    }

    fn bind_default_framebuffer(&self) {
        self.log.push("bind_default_framebuffer");
    }

    fn clear_color_buffer(&self, color: [f32; 4]) {
        self.log.push(format!("clear({:?})", color));
    }

    fn next_error(&self) -> Option<u32> {
        self.errors.borrow_mut().pop_front()
    }

    fn info(&self) -> GlInfo {
        GlInfo {
            vendor: "mock".to_string(),
            renderer: "mock renderer".to_string(),
            version: format!("{}.{} mock", self.version.0, self.version.1),
            glsl_version: "3.30".to_string(),
            version_number: self.version,
        }
    }
}

/// 窗口系统在哪一步失败
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Startup,
    CreateWindow,
    MakeCurrent,
    LoadGl,
    InitGui,
    SwapBuffers,
}

pub const MOCK_WINDOW_ID: u32 = 7;

/// 可配置的窗口系统
pub struct MockWindowSystem {
    pub log: CallLog,
    pub fail_at: Option<FailAt>,
    pub gl_version: (u32, u32),
    pub framebuffer: Extent2D,
    /// 运行多少帧之后窗口的关闭标记被设置
    pub frames_before_close: usize,
    /// 每次 poll 依次送出的事件
    pub events: Vec<Vec<InputEvent>>,
}
impl MockWindowSystem {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_at: None,
            gl_version: (3, 3),
            framebuffer: Extent2D::new(1024, 768),
            frames_before_close: 1,
            events: Vec::new(),
        }
    }

    fn fail(&self, step: FailAt) -> bool {
        self.fail_at == Some(step)
    }
}
impl WindowSystem for MockWindowSystem {
    type Window = MockWindow;

    fn startup(&mut self) -> Result<(), PlatformError> {
        self.log.push("startup");
        if self.fail(FailAt::Startup) {
            return Err(PlatformError::Startup("no display".to_string()));
        }
        Ok(())
    }

    fn create_window(&mut self, desc: &WindowDesc) -> Result<Self::Window, PlatformError> {
        self.log.push(format!("create_window({}, {})", desc.title, desc.extent));
        if self.fail(FailAt::CreateWindow) {
            return Err(PlatformError::WindowCreation("no visual".to_string()));
        }

        Ok(MockWindow {
            log: self.log.clone(),
            fail_at: self.fail_at,
            gl_version: self.gl_version,
            framebuffer: self.framebuffer,
            frames_before_close: self.frames_before_close,
            events: self.events.drain(..).collect(),
            gl: None,
            gl_held_at_swap_interval: None,
            user_data: WindowUserData::new(),
            polls: 0,
            close_requested: false,
        })
    }

    fn shutdown(&mut self) {
        self.log.push("shutdown");
    }
}

pub struct MockWindow {
    log: CallLog,
    fail_at: Option<FailAt>,
    gl_version: (u32, u32),
    framebuffer: Extent2D,
    frames_before_close: usize,
    events: VecDeque<Vec<InputEvent>>,
    pub gl: Option<MockGl>,
    /// 最近一次 set_swap_interval 时仲裁器是否被持有，没有 owner 时为 `None`
    pub gl_held_at_swap_interval: Option<bool>,
    user_data: WindowUserData<u32>,
    polls: usize,
    close_requested: bool,
}
impl AppWindow for MockWindow {
    fn set_user_data(&mut self, owner: AppHandle) {
        self.log.push("set_user_data");
        self.user_data.associate(MOCK_WINDOW_ID, owner);
    }

    fn make_context_current(&mut self) -> Result<(), PlatformError> {
        self.log.push("make_context_current");
        if self.fail_at == Some(FailAt::MakeCurrent) {
            return Err(PlatformError::ContextActivation("bad surface".to_string()));
        }
        Ok(())
    }

    fn load_gl(&mut self) -> Result<GlInfo, PlatformError> {
        self.log.push("load_gl");
        if self.fail_at == Some(FailAt::LoadGl) {
            return Err(PlatformError::GlLoad("glGetString missing".to_string()));
        }
        let mut gl = MockGl::new(self.log.clone());
        gl.version = self.gl_version;
        let info = gl.info();
        self.gl = Some(gl);
        Ok(info)
    }

    fn gl(&self) -> Option<&dyn GlDevice> {
        self.gl.as_ref().map(|gl| gl as &dyn GlDevice)
    }

    fn init_gui(&mut self) -> Result<(), PlatformError> {
        self.log.push("init_gui");
        if self.fail_at == Some(FailAt::InitGui) {
            return Err(PlatformError::GuiInit("font atlas".to_string()));
        }
        Ok(())
    }

    fn framebuffer_size(&self) -> Extent2D {
        self.log.push("framebuffer_size");
        self.framebuffer
    }

    fn set_swap_interval(&mut self, interval: u32) -> Result<(), PlatformError> {
        self.log.push(format!("set_swap_interval({interval})"));
        self.gl_held_at_swap_interval = self
            .user_data
            .owner(&MOCK_WINDOW_ID)
            .map(|owner| owner.gl_arbiter().is_held());
        Ok(())
    }

    fn poll_events(&mut self) {
        self.log.push("poll_events");
        self.polls += 1;

        // 与原生回调一样：通过 user data 找回 app，再进入 event_dispatch
        let owner = self.user_data.owner(&MOCK_WINDOW_ID);
        let gl = self.gl.as_ref().map(|gl| gl as &dyn GlDevice);
        for event in self.events.pop_front().unwrap_or_default() {
            if event == InputEvent::CloseRequested {
                self.close_requested = true;
            }
            event_dispatch::dispatch(owner.as_deref(), gl, &event);
        }
    }

    fn should_close(&self) -> bool {
        self.close_requested || self.polls >= self.frames_before_close
    }

    fn begin_gui_frame(&mut self) -> Result<(), PlatformError> {
        self.log.push("begin_gui_frame");
        Ok(())
    }

    fn compose_gui(&mut self, _outer_app: &mut dyn OuterApp) {
        self.log.push("compose_gui");
    }

    fn end_gui_frame(&mut self) {
        self.log.push("end_gui_frame");
    }

    fn submit_gui(&mut self) -> Result<(), PlatformError> {
        self.log.push("submit_gui");
        Ok(())
    }

    fn swap_buffers(&mut self) -> Result<(), PlatformError> {
        self.log.push("swap_buffers");
        if self.fail_at == Some(FailAt::SwapBuffers) {
            return Err(PlatformError::Present("context lost".to_string()));
        }
        Ok(())
    }

    fn shutdown_gui(&mut self) {
        self.log.push("shutdown_gui");
    }

    fn destroy(self) {
        self.log.push("destroy_window");
    }
}

/// 记录收到的按键与 init 时拿到的句柄
#[derive(Default)]
pub struct RecordingApp {
    pub handle: Option<AppHandle>,
    pub keys: Rc<RefCell<Vec<KeyEvent>>>,
}
impl OuterApp for RecordingApp {
    fn init(&mut self, app: &AppHandle) {
        self.handle = Some(app.clone());
    }

    fn on_key(&mut self, event: &KeyEvent) {
        self.keys.borrow_mut().push(*event);
    }
}
