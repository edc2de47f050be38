//! OpenGL 相关的基础设施
//!
//! - [`arbiter::GlContextArbiter`]：跨线程访问 GL context 的互斥仲裁器
//! - [`device::GlDevice`]：shell 需要的最小 GL 调用集合，由具体后端实现
//! - [`gl_error`]：排空 `glGetError` 队列并打印诊断信息

pub mod arbiter;
pub mod device;
pub mod gl_error;
