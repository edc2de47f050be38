use std::cell::RefCell;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Duration;

use glshell_app::app_shared::AppHandle;
use glshell_app::event_dispatch;
use glshell_app::outer_app::OuterApp;
use glshell_app::platform::window_system::{AppWindow, PlatformError, WindowDesc};
use glshell_app::window_user_data::WindowUserData;
use glshell_gl::device::{Extent2D, GlDevice, GlInfo};
use glshell_gui_backend::gui_host::GuiHost;
use glutin::config::{Config, ConfigTemplate, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentContext, PossiblyCurrentContext, Version,
};
use glutin::display::{Display, DisplayApiPreference, GetGlDisplay};
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::GlWindow as _;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawDisplayHandle};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::ModifiersState;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::glow_device::{GlowDevice, load_glow};
use crate::winit_event_adapter::WinitEventAdapter;

/// winit 窗口 + glutin context/surface + imgui
pub struct GlWindow {
    // drop 顺序：gui → gl → surface → context → window
    gui: Option<GuiHost>,
    gl: Option<GlowDevice>,
    surface: Surface<WindowSurface>,
    not_current: Option<NotCurrentContext>,
    context: Option<PossiblyCurrentContext>,
    window: Window,

    gl_config: Config,
    event_loop: Rc<RefCell<EventLoop<()>>>,

    /// 事件回调只知道 window id，通过它找回 app
    user_data: WindowUserData<WindowId>,
    modifiers: ModifiersState,
    should_close: bool,
}
// new & init
impl GlWindow {
    pub fn new(event_loop: Rc<RefCell<EventLoop<()>>>, desc: &WindowDesc) -> Result<Self, PlatformError> {
        let window_attributes = Window::default_attributes()
            .with_title(desc.title.clone())
            .with_inner_size(LogicalSize::new(desc.extent.width, desc.extent.height));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8).build();
        let (window, gl_config) = Self::create_window_and_config(&event_loop.borrow(), window_attributes, template)?;

        let (major, minor) = desc.gl_version;
        let raw_window_handle = window.window_handle().ok().map(|handle| handle.as_raw());
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(raw_window_handle);

        let gl_display = gl_config.display();
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }.map_err(|e| {
            PlatformError::WindowCreation(format!("OpenGL {major}.{minor} core context: {e}"))
        })?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .map_err(|e| PlatformError::WindowCreation(e.to_string()))?;
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| PlatformError::WindowCreation(e.to_string()))?;

        log::info!("window created: {} ({})", desc.title, desc.extent);
        log::info!("windowing backend: {}", Self::backend_name(&window));
        log::info!("GL display: {}", gl_display.version_string());

        Ok(Self {
            gui: None,
            gl: None,
            surface,
            not_current: Some(not_current),
            context: None,
            window,
            gl_config,
            event_loop,
            user_data: WindowUserData::new(),
            modifiers: ModifiersState::empty(),
            should_close: false,
        })
    }
}
// tools
impl GlWindow {
    /// WGL 要先有窗口才能加载扩展
    #[cfg(target_os = "windows")]
    fn create_window_and_config(
        event_loop: &EventLoop<()>,
        attributes: WindowAttributes,
        template: ConfigTemplate,
    ) -> Result<(Window, Config), PlatformError> {
        #[allow(deprecated)]
        let window = event_loop
            .create_window(attributes)
            .map_err(|e| PlatformError::WindowCreation(e.to_string()))?;
        let raw_window_handle =
            window.window_handle().map_err(|e| PlatformError::WindowCreation(e.to_string()))?.as_raw();

        let display = Self::create_display(event_loop, DisplayApiPreference::WglThenEgl(Some(raw_window_handle)))?;
        let gl_config = Self::find_config(&display, template)?;
        Ok((window, gl_config))
    }

    /// X11 窗口的 visual 由 config 决定，所以先选 config 再创建窗口
    #[cfg(not(target_os = "windows"))]
    fn create_window_and_config(
        event_loop: &EventLoop<()>,
        attributes: WindowAttributes,
        template: ConfigTemplate,
    ) -> Result<(Window, Config), PlatformError> {
        #[cfg(target_os = "macos")]
        let preference = DisplayApiPreference::Cgl;
        #[cfg(not(target_os = "macos"))]
        let preference = DisplayApiPreference::EglThenGlx(Box::new(winit::platform::x11::register_xlib_error_hook));

        let display = Self::create_display(event_loop, preference)?;
        let gl_config = Self::find_config(&display, template)?;
        let window = glutin_winit::finalize_window(event_loop, attributes, &gl_config)
            .map_err(|e| PlatformError::WindowCreation(e.to_string()))?;
        Ok((window, gl_config))
    }

    fn create_display(event_loop: &EventLoop<()>, preference: DisplayApiPreference) -> Result<Display, PlatformError> {
        let raw_display_handle =
            event_loop.display_handle().map_err(|e| PlatformError::WindowCreation(e.to_string()))?.as_raw();
        unsafe { Display::new(raw_display_handle, preference) }
            .map_err(|e| PlatformError::WindowCreation(format!("GL display: {e}")))
    }

    fn find_config(display: &Display, template: ConfigTemplate) -> Result<Config, PlatformError> {
        let configs = unsafe { display.find_configs(template) }
            .map_err(|e| PlatformError::WindowCreation(format!("GL config: {e}")))?;
        first_config(configs)
    }

    fn backend_name(window: &Window) -> &'static str {
        let Ok(handle) = window.display_handle() else {
            return "unknown";
        };
        match handle.as_raw() {
            RawDisplayHandle::Xlib(_) | RawDisplayHandle::Xcb(_) => "X11",
            RawDisplayHandle::Wayland(_) => "Wayland",
            RawDisplayHandle::Windows(_) => "Win32",
            RawDisplayHandle::AppKit(_) => "Cocoa",
            _ => "other",
        }
    }

    fn current_context(&self) -> Option<&PossiblyCurrentContext> {
        self.context.as_ref()
    }

    fn report(e: glutin::error::Error) {
        event_dispatch::on_error(e.raw_code().unwrap_or_default() as i32, &e.to_string());
    }

    fn resize_surface(&self, width: u32, height: u32) {
        // 最小化时尺寸为 0，surface 不接受
        let (Some(context), Some(width), Some(height)) =
            (self.current_context(), NonZeroU32::new(width), NonZeroU32::new(height))
        else {
            return;
        };
        self.surface.resize(context, width, height);
    }

    fn on_window_event(&mut self, window_id: WindowId, event: WindowEvent) {
        if window_id != self.window.id() {
            return;
        }

        if let Some(gui) = self.gui.as_mut() {
            gui.handle_event(
                &self.window,
                &Event::<()>::WindowEvent {
                    window_id,
                    event: event.clone(),
                },
            );
        }

        match &event {
            WindowEvent::CloseRequested => self.should_close = true,
            WindowEvent::ModifiersChanged(modifiers) => self.modifiers = modifiers.state(),
            WindowEvent::Resized(size) => self.resize_surface(size.width, size.height),
            _ => {}
        }

        let input_event = WinitEventAdapter::from_winit_event(&event, self.modifiers);
        let owner = self.user_data.owner(&window_id);
        let gl = self.gl.as_ref().map(|gl| gl as &dyn GlDevice);
        event_dispatch::dispatch(owner.as_deref(), gl, &input_event);
    }
}
impl AppWindow for GlWindow {
    fn set_user_data(&mut self, owner: AppHandle) {
        self.user_data.associate(self.window.id(), owner);
    }

    fn make_context_current(&mut self) -> Result<(), PlatformError> {
        if let Some(context) = self.context.as_ref() {
            return context
                .make_current(&self.surface)
                .map_err(|e| PlatformError::ContextActivation(e.to_string()));
        }

        let not_current = self
            .not_current
            .take()
            .ok_or_else(|| PlatformError::ContextActivation("context is gone".to_string()))?;
        let context = not_current
            .make_current(&self.surface)
            .map_err(|e| PlatformError::ContextActivation(e.to_string()))?;
        self.context = Some(context);
        Ok(())
    }

    fn load_gl(&mut self) -> Result<GlInfo, PlatformError> {
        if self.current_context().is_none() {
            return Err(PlatformError::GlLoad("context is not current".to_string()));
        }

        let gl = GlowDevice::new(unsafe { load_glow(&self.gl_config.display()) });
        let info = gl.info();
        if info.version.is_empty() {
            return Err(PlatformError::GlLoad("glGetString(GL_VERSION) returned nothing".to_string()));
        }

        self.gl = Some(gl);
        Ok(info)
    }

    fn gl(&self) -> Option<&dyn GlDevice> {
        self.gl.as_ref().map(|gl| gl as &dyn GlDevice)
    }

    fn init_gui(&mut self) -> Result<(), PlatformError> {
        if self.gl.is_none() {
            return Err(PlatformError::GuiInit("OpenGL functions are not loaded".to_string()));
        }

        // imgui 渲染器持有自己的一份函数表
        let gl = unsafe { load_glow(&self.gl_config.display()) };
        let gui = GuiHost::new(&self.window, gl).map_err(|e| PlatformError::GuiInit(e.to_string()))?;
        self.gui = Some(gui);
        Ok(())
    }

    fn framebuffer_size(&self) -> Extent2D {
        let size = self.window.inner_size();
        Extent2D::new(size.width, size.height)
    }

    fn set_swap_interval(&mut self, interval: u32) -> Result<(), PlatformError> {
        let context = self
            .current_context()
            .ok_or_else(|| PlatformError::ContextActivation("context is not current".to_string()))?;
        let interval = NonZeroU32::new(interval).map_or(SwapInterval::DontWait, SwapInterval::Wait);

        // 不支持 vsync 的驱动照常运行
        if let Err(e) = self.surface.set_swap_interval(context, interval) {
            Self::report(e);
        }
        Ok(())
    }

    fn poll_events(&mut self) {
        let _span = tracy_client::span!("poll_events");

        let event_loop = Rc::clone(&self.event_loop);
        let status = event_loop
            .borrow_mut()
            .pump_app_events(Some(Duration::ZERO), &mut PumpHandler { window: self });

        if let PumpStatus::Exit(code) = status {
            log::info!("event loop exited with code {code}");
            self.should_close = true;
        }
    }

    fn should_close(&self) -> bool {
        self.should_close
    }

    fn begin_gui_frame(&mut self) -> Result<(), PlatformError> {
        let gui = self
            .gui
            .as_mut()
            .ok_or_else(|| PlatformError::GuiFrame("gui is not initialized".to_string()))?;
        gui.begin_frame(&self.window).map_err(|e| PlatformError::GuiFrame(e.to_string()))
    }

    fn compose_gui(&mut self, outer_app: &mut dyn OuterApp) {
        let _span = tracy_client::span!("compose_gui");
        if let Some(gui) = self.gui.as_mut() {
            gui.compose(&self.window, |ui| outer_app.draw_ui(ui));
        }
    }

    fn end_gui_frame(&mut self) {
        if let Some(gui) = self.gui.as_mut() {
            gui.end_frame();
        }
    }

    fn submit_gui(&mut self) -> Result<(), PlatformError> {
        let _span = tracy_client::span!("submit_gui");
        match self.gui.as_mut() {
            Some(gui) => gui.submit().map_err(|e| PlatformError::GuiFrame(e.to_string())),
            None => Ok(()),
        }
    }

    fn swap_buffers(&mut self) -> Result<(), PlatformError> {
        let context = self
            .current_context()
            .ok_or_else(|| PlatformError::Present("context is not current".to_string()))?;
        self.surface.swap_buffers(context).map_err(|e| PlatformError::Present(e.to_string()))?;

        tracy_client::frame_mark();
        Ok(())
    }

    fn shutdown_gui(&mut self) {
        if let Some(gui) = self.gui.take() {
            gui.destroy();
        }
    }

    fn destroy(self) {
        let Self {
            gui,
            gl,
            surface,
            not_current,
            context,
            window,
            ..
        } = self;

        drop(gui);
        drop(gl);
        drop(surface);
        drop(not_current);
        drop(context);
        drop(window);
        log::info!("window destroyed");
    }
}

/// 在 poll 期间把 winit 的回调转发给窗口
struct PumpHandler<'a> {
    window: &'a mut GlWindow,
}
impl ApplicationHandler for PumpHandler<'_> {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        self.window.on_window_event(window_id, event);
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        log::warn!("winit event: suspended");
    }
}

/// 驱动可能报告零个匹配的 config
fn first_config<C>(mut configs: impl Iterator<Item = C>) -> Result<C, PlatformError> {
    configs
        .next()
        .ok_or_else(|| PlatformError::WindowCreation("no GL config matches the template".to_string()))
}
