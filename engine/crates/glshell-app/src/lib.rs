//! 桌面 shell 的平台无关部分
//!
//! - [`app::Application`]：生命周期状态机，持有窗口与 GL context
//! - [`event_dispatch`]：窗口系统回调的落点
//! - [`frame_loop::FrameLoop`]：poll → build ui → render → present
//! - [`platform`]：窗口系统需要实现的 trait，具体实现在 `glshell-winit-app` 中

pub mod app;
pub mod app_shared;
pub mod config;
pub mod error;
pub mod event_dispatch;
pub mod frame_loop;
pub mod lifecycle;
pub mod outer_app;
pub mod platform;
pub mod window_user_data;

#[cfg(test)]
pub(crate) mod test_support;
