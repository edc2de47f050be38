//! 窗口系统回调的落点
//!
//! 平台层在收到原生回调后，先通过 [`crate::window_user_data::WindowUserData`] 找回 app，
//! 再调用这里的函数。这些函数只修改状态，不包含业务逻辑。

use glshell_gl::device::{Extent2D, GlDevice};

use crate::app_shared::AppShared;
use crate::platform::input_event::{InputEvent, KeyEvent};

/// 窗口系统报告的错误，只打印日志
pub fn on_error(code: i32, description: &str) {
    log::error!("Window system error {code}: {description}");
}

/// framebuffer 尺寸改变：更新 screen 尺寸，并把 viewport 设置为整个 framebuffer
///
/// `owner` 为 `None`（窗口还没有关联 app）时什么都不做；
/// GL 还没有加载时只更新状态。
pub fn on_framebuffer_resize(owner: Option<&AppShared>, gl: Option<&dyn GlDevice>, width: u32, height: u32) {
    let Some(owner) = owner else {
        log::debug!("framebuffer resized to {width}x{height} before the window has an owner");
        return;
    };

    let viewport = owner.update_screen(Extent2D::new(width, height));
    match gl {
        Some(gl) => gl.set_viewport(viewport),
        None => log::debug!("framebuffer resized to {width}x{height} before GL is loaded"),
    }
}

/// 按键事件，放进队列等帧循环转交给 [`crate::outer_app::OuterApp::on_key`]
pub fn on_key(owner: Option<&AppShared>, event: KeyEvent) {
    log::trace!("key event: {event:?}");

    if let Some(owner) = owner {
        owner.push_key_event(event);
    }
}

/// 把平台转换好的事件路由到上面的回调
pub fn dispatch(owner: Option<&AppShared>, gl: Option<&dyn GlDevice>, event: &InputEvent) {
    match event {
        InputEvent::KeyboardInput(key_event) => on_key(owner, *key_event),
        InputEvent::FramebufferResized {
            physical_width,
            physical_height,
        } => on_framebuffer_resize(owner, gl, *physical_width, *physical_height),
        InputEvent::CloseRequested | InputEvent::Other => {}
    }
}
