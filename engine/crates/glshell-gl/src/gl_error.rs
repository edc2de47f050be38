use crate::device::GlDevice;

pub const GL_NO_ERROR: u32 = 0;
pub const GL_INVALID_ENUM: u32 = 0x0500;
pub const GL_INVALID_VALUE: u32 = 0x0501;
pub const GL_INVALID_OPERATION: u32 = 0x0502;
pub const GL_STACK_OVERFLOW: u32 = 0x0503;
pub const GL_STACK_UNDERFLOW: u32 = 0x0504;
pub const GL_OUT_OF_MEMORY: u32 = 0x0505;
pub const GL_INVALID_FRAMEBUFFER_OPERATION: u32 = 0x0506;
pub const GL_CONTEXT_LOST: u32 = 0x0507;

/// 单次调用最多取出的错误数量，context 丢失时部分驱动会一直返回错误
pub const MAX_DRAINED_ERRORS: usize = 64;

pub fn gl_error_name(code: u32) -> Option<&'static str> {
    match code {
        GL_INVALID_ENUM => Some("INVALID_ENUM"),
        GL_INVALID_VALUE => Some("INVALID_VALUE"),
        GL_INVALID_OPERATION => Some("INVALID_OPERATION"),
        GL_STACK_OVERFLOW => Some("STACK_OVERFLOW"),
        GL_STACK_UNDERFLOW => Some("STACK_UNDERFLOW"),
        GL_OUT_OF_MEMORY => Some("OUT_OF_MEMORY"),
        GL_INVALID_FRAMEBUFFER_OPERATION => Some("INVALID_FRAMEBUFFER_OPERATION"),
        GL_CONTEXT_LOST => Some("CONTEXT_LOST"),
        _ => None,
    }
}

/// 取出所有待处理的 GL 错误，每个错误打印一行，带上调用处的文件与行号
///
/// 返回取出的错误数量。只做诊断，不会中断执行。
/// 一般通过 [`crate::check_gl_error!`] 调用。
pub fn drain_gl_errors<G: GlDevice + ?Sized>(gl: &G, file: &str, line: u32) -> usize {
    let mut count = 0;
    while let Some(code) = gl.next_error() {
        if code == GL_NO_ERROR {
            break;
        }
        match gl_error_name(code) {
            Some(name) => log::error!("GL_{name} - {file}:{line}"),
            None => log::error!("GL_UNKNOWN(0x{code:04X}) - {file}:{line}"),
        }

        count += 1;
        if count >= MAX_DRAINED_ERRORS {
            log::warn!("GL error queue not drained after {count} errors - {file}:{line}");
            break;
        }
    }
    count
}

/// 在当前位置检查 GL 错误
///
/// ```ignore
/// gl.clear_color_buffer([1.0; 4]);
/// glshell_gl::check_gl_error!(gl);
/// ```
#[macro_export]
macro_rules! check_gl_error {
    ($gl:expr) => {
        $crate::gl_error::drain_gl_errors($gl, file!(), line!())
    };
}
