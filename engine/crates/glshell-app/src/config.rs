use std::path::{Path, PathBuf};

use anyhow::Context;
use glshell_gl::device::Extent2D;
use serde::Deserialize;

use crate::platform::window_system::WindowDesc;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "OpenSWE1R".to_string(),
            width: 1024,
            height: 768,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlConfig {
    /// 最低 OpenGL 版本，core profile
    pub major: u8,
    pub minor: u8,
    /// 主线程在自己的 GL 调用区间是否也获取 GL 仲裁器
    ///
    /// 关闭后仲裁器只在辅助线程之间生效，主线程随时可能调用 GL。
    pub guard_main_thread: bool,
}
impl Default for GlConfig {
    fn default() -> Self {
        Self {
            major: 3,
            minor: 3,
            guard_main_thread: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `error` / `warn` / `info` / `debug` / `trace` / `off`，`RUST_LOG` 优先
    pub level: String,
}
impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// app 配置，所有字段都有默认值
///
/// ```toml
/// [window]
/// title = "OpenSWE1R"
/// width = 1024
/// height = 768
///
/// [gl]
/// major = 3
/// minor = 3
/// guard_main_thread = true
///
/// [log]
/// level = "info"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub gl: GlConfig,
    pub log: LogConfig,
}
// load
impl AppConfig {
    /// 指定配置文件路径的环境变量
    pub const PATH_ENV: &'static str = "GLSHELL_CONFIG";
    /// 环境变量未设置时在工作目录下查找的文件
    pub const DEFAULT_FILE: &'static str = "glshell.toml";
    /// imgui 的 GL 后端需要的最低版本
    pub const MIN_GL_VERSION: (u8, u8) = (3, 3);

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("invalid config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// 按 `GLSHELL_CONFIG` → `glshell.toml` 的顺序查找配置文件
    ///
    /// 环境变量指定的文件必须存在；默认文件不存在时使用默认配置。
    pub fn load() -> anyhow::Result<Self> {
        let from_env = std::env::var_os(Self::PATH_ENV).map(PathBuf::from);
        Self::load_from(from_env.as_deref(), Path::new(Self::DEFAULT_FILE))
    }

    fn load_from(explicit: Option<&Path>, fallback: &Path) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if fallback.is_file() {
            return Self::from_file(fallback);
        }

        log::info!("no config file found, using defaults");
        Ok(Self::default())
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.window.width > 0 && self.window.height > 0,
            "window size must be positive, got {}x{}",
            self.window.width,
            self.window.height
        );
        anyhow::ensure!(
            (self.gl.major, self.gl.minor) >= Self::MIN_GL_VERSION,
            "OpenGL {}.{} is below the supported minimum {}.{}",
            self.gl.major,
            self.gl.minor,
            Self::MIN_GL_VERSION.0,
            Self::MIN_GL_VERSION.1
        );
        Ok(())
    }
}
// getters
impl AppConfig {
    pub fn window_desc(&self) -> WindowDesc {
        WindowDesc {
            title: self.window.title.clone(),
            extent: Extent2D::new(self.window.width, self.window.height),
            gl_version: (self.gl.major, self.gl.minor),
        }
    }
}
