use std::fmt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent2D {
    pub width: u32,
    pub height: u32,
}
impl Extent2D {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
impl fmt::Display for Extent2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// `glViewport` 的参数
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}
impl Viewport {
    /// 覆盖整个 framebuffer 的 viewport
    pub const fn full(extent: Extent2D) -> Self {
        Self {
            x: 0,
            y: 0,
            width: extent.width,
            height: extent.height,
        }
    }
}

/// 驱动上报的 context 信息，初始化时打印到日志
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GlInfo {
    pub vendor: String,
    pub renderer: String,
    pub version: String,
    pub glsl_version: String,
    /// 解析后的 (major, minor)
    pub version_number: (u32, u32),
}
impl GlInfo {
    pub fn supports(&self, major: u32, minor: u32) -> bool {
        self.version_number >= (major, minor)
    }

    pub fn log(&self) {
        log::info!("Vendor: {}", self.vendor);
        log::info!("Renderer: {}", self.renderer);
        log::info!("OpenGL Version: {}", self.version);
        log::info!("GLSL Version: {}", self.glsl_version);
    }
}

/// shell 自身需要的 GL 调用
///
/// 调用方必须保证 context 在当前线程上是 current 的，
/// 并且在主线程之外调用时持有 [`crate::arbiter::GlContextArbiter`]。
pub trait GlDevice {
    fn set_viewport(&self, viewport: Viewport);

    /// 绑定回默认的 framebuffer（窗口的 back buffer）
    fn bind_default_framebuffer(&self);

    fn clear_color_buffer(&self, color: [f32; 4]);

    /// `glGetError`，队列为空（`GL_NO_ERROR`）时返回 `None`
    fn next_error(&self) -> Option<u32>;

    fn info(&self) -> GlInfo;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_viewport() {
        let viewport = Viewport::full(Extent2D::new(800, 600));
        assert_eq!(
            viewport,
            Viewport {
                x: 0,
                y: 0,
                width: 800,
                height: 600
            }
        );
    }

    #[test]
    fn test_version_support() {
        let info = GlInfo {
            version_number: (3, 3),
            ..Default::default()
        };
        assert!(info.supports(3, 3));
        assert!(info.supports(3, 0));
        assert!(info.supports(2, 1));
        assert!(!info.supports(4, 1));
        assert!(!info.supports(3, 4));
    }
}
