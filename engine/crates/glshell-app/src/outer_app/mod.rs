use crate::app_shared::AppHandle;
use crate::platform::input_event::KeyEvent;

pub mod demo_app;

/// 外部应用接口 trait
///
/// shell 只负责窗口、GL 与帧循环，每帧显示的内容由实现这个 trait 的类型提供。
///
/// # 开发模式
/// ```ignore
/// #[derive(Default)]
/// struct MyApp { counter: i32 }
///
/// impl OuterApp for MyApp {
///     fn draw_ui(&mut self, ui: &imgui::Ui) {
///         ui.window("counter").build(|| {
///             if ui.button("+1") {
///                 self.counter += 1;
///             }
///         });
///     }
/// }
///
/// fn main() -> std::process::ExitCode {
///     WinitApp::run(Box::new(MyApp::default()))
/// }
/// ```
pub trait OuterApp {
    /// init 成功之后调用一次（可选）
    ///
    /// 需要在后台线程中调用 GL 的应用可以在这里保存句柄，之后通过它获取 GL 仲裁器。
    fn init(&mut self, _app: &AppHandle) {}

    /// 绘制 GUI（可选），发生在 GUI 帧的 begin 与 end 之间
    fn draw_ui(&mut self, _ui: &imgui::Ui) {}

    /// 按键事件（可选），每帧 poll 之后按到达顺序调用
    fn on_key(&mut self, _event: &KeyEvent) {}
}
