use glshell_app::outer_app::demo_app::DemoApp;
use glshell_winit_app::app::WinitApp;

fn main() -> std::process::ExitCode {
    let outer_app = Box::new(DemoApp::default());
    WinitApp::run(outer_app)
}
