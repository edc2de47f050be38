use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

use glshell_app::app::Application;
use glshell_app::config::AppConfig;
use glshell_app::outer_app::OuterApp;
use glshell_app::platform::window_system::{PlatformError, WindowDesc, WindowSystem};
use glshell_crate_tools::init_log::{init_log, parse_level};
use glshell_crate_tools::panic_hook::install_panic_hook;
use winit::event_loop::EventLoop;

use crate::gl_window::GlWindow;

/// winit 的 event loop，整个进程只能创建一次
#[derive(Default)]
pub struct WinitWindowSystem {
    event_loop: Option<Rc<RefCell<EventLoop<()>>>>,
}
impl WinitWindowSystem {
    pub fn new() -> Self {
        Self::default()
    }
}
impl WindowSystem for WinitWindowSystem {
    type Window = GlWindow;

    fn startup(&mut self) -> Result<(), PlatformError> {
        let event_loop = EventLoop::new().map_err(|e| PlatformError::Startup(e.to_string()))?;
        self.event_loop = Some(Rc::new(RefCell::new(event_loop)));
        log::info!("window system started");
        Ok(())
    }

    fn create_window(&mut self, desc: &WindowDesc) -> Result<Self::Window, PlatformError> {
        let event_loop = self.event_loop.as_ref().ok_or(PlatformError::NotStarted)?;
        GlWindow::new(Rc::clone(event_loop), desc)
    }

    fn shutdown(&mut self) {
        if self.event_loop.take().is_some() {
            log::info!("window system shut down");
        }
    }
}

pub struct WinitApp;
// 总的 main 函数
impl WinitApp {
    /// 整个程序的入口
    ///
    /// 读取配置、初始化日志与 tracy，然后依次执行 init → run → finish。
    /// init 失败时返回失败的退出码。
    pub fn run(outer_app: Box<dyn OuterApp>) -> ExitCode {
        install_panic_hook();

        let config = match AppConfig::load() {
            Ok(config) => config,
            Err(e) => {
                init_log(log::LevelFilter::Info);
                log::error!("{e:#}");
                return ExitCode::FAILURE;
            }
        };
        init_log(parse_level(&config.log.level));

        // span! 需要一个正在运行的 client
        let _tracy = tracy_client::Client::start();

        let mut app = Application::new(config, WinitWindowSystem::new(), outer_app);
        if let Err(e) = app.init() {
            log::error!("failed to init app: {e}");
            return ExitCode::FAILURE;
        }

        let run_result = app.run();
        log::info!("end run.");
        if let Err(e) = app.finish() {
            log::error!("failed to finish app: {e}");
        }

        match run_result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("app stopped: {e}");
                ExitCode::FAILURE
            }
        }
    }
}
