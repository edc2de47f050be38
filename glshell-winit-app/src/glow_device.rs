use std::ffi::CString;

use glshell_gl::device::{GlDevice, GlInfo, Viewport};
use glshell_gui_backend::glow::{self, HasContext};
use glutin::display::{Display, GlDisplay};

/// 通过 display 加载一份 GL 函数表
///
/// # Safety
/// 调用时 display 上的某个 context 必须在当前线程上是 current。
pub unsafe fn load_glow(display: &Display) -> glow::Context {
    unsafe {
        glow::Context::from_loader_function(|symbol| {
            CString::new(symbol).map_or(std::ptr::null(), |symbol| display.get_proc_address(&symbol))
        })
    }
}

/// 基于 glow 的 [`GlDevice`]
pub struct GlowDevice {
    gl: glow::Context,
}
impl GlowDevice {
    pub fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    fn get_string(&self, parameter: u32) -> String {
        unsafe { self.gl.get_parameter_string(parameter) }
    }
}
impl GlDevice for GlowDevice {
    fn set_viewport(&self, viewport: Viewport) {
        unsafe {
            self.gl.viewport(viewport.x, viewport.y, viewport.width as i32, viewport.height as i32);
        }
    }

    fn bind_default_framebuffer(&self) {
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    fn clear_color_buffer(&self, color: [f32; 4]) {
        unsafe {
            self.gl.clear_color(color[0], color[1], color[2], color[3]);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn next_error(&self) -> Option<u32> {
        let code = unsafe { self.gl.get_error() };
        (code != glow::NO_ERROR).then_some(code)
    }

    fn info(&self) -> GlInfo {
        let version = self.gl.version();
        GlInfo {
            vendor: self.get_string(glow::VENDOR),
            renderer: self.get_string(glow::RENDERER),
            version: self.get_string(glow::VERSION),
            glsl_version: self.get_string(glow::SHADING_LANGUAGE_VERSION),
            version_number: (version.major, version.minor),
        }
    }
}
