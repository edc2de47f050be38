use crate::app_shared::AppHandle;
use crate::outer_app::OuterApp;
use crate::platform::input_event::KeyEvent;

/// 默认显示的内容：主菜单栏、imgui demo 窗口以及一个简单的控件窗口
pub struct DemoApp {
    app: AppHandle,

    show_demo_window: bool,
    show_another_window: bool,
    value: f32,
    counter: i32,
    color: [f32; 3],
    last_key: Option<KeyEvent>,
}
impl Default for DemoApp {
    fn default() -> Self {
        Self {
            app: AppHandle::empty(),
            show_demo_window: true,
            show_another_window: false,
            value: 0.0,
            counter: 0,
            color: [0.45, 0.55, 0.60],
            last_key: None,
        }
    }
}
// draw
impl DemoApp {
    fn draw_main_menu_bar(ui: &imgui::Ui) {
        ui.main_menu_bar(|| {
            ui.menu("File", || {
                ui.menu_item_config("(dummy menu)").enabled(false).build();
                if ui.menu_item("New") {
                    log::info!("menu: New");
                }
                if ui.menu_item_config("Open").shortcut("Ctrl+O").build() {
                    log::info!("menu: Open");
                }
            });
            ui.menu("Edit", || {
                ui.menu_item_config("Undo").shortcut("CTRL+Z").build();
                ui.menu_item_config("Redo").shortcut("CTRL+Y").enabled(false).build();
                ui.separator();
                ui.menu_item_config("Cut").shortcut("CTRL+X").build();
                ui.menu_item_config("Copy").shortcut("CTRL+C").build();
                ui.menu_item_config("Paste").shortcut("CTRL+V").build();
            });
        });
    }

    fn draw_hello_window(&mut self, ui: &imgui::Ui) {
        ui.window("Hello, world!").build(|| {
            ui.text("This is some useful text.");
            ui.checkbox("Demo Window", &mut self.show_demo_window);
            ui.checkbox("Another Window", &mut self.show_another_window);

            ui.slider("float", 0.0, 1.0, &mut self.value);
            ui.color_edit3("clear color", &mut self.color);

            if ui.button("Button") {
                self.counter += 1;
            }
            ui.same_line();
            ui.text(format!("counter = {}", self.counter));

            if let Some(app) = self.app.get() {
                ui.text(format!("screen: {}", app.screen_extent()));
            }
            if let Some(key) = &self.last_key {
                ui.text(format!("last key: {:?} {:?}", key.key, key.action));
            }

            let framerate = ui.io().framerate;
            ui.text(format!(
                "Application average {:.3} ms/frame ({:.1} FPS)",
                1000.0 / framerate,
                framerate
            ));
        });
    }

    fn draw_another_window(&mut self, ui: &imgui::Ui) {
        let mut close = false;
        ui.window("Another Window").opened(&mut self.show_another_window).build(|| {
            ui.text("Hello from another window!");
            close = ui.button("Close Me");
        });
        if close {
            self.show_another_window = false;
        }
    }
}
impl OuterApp for DemoApp {
    fn init(&mut self, app: &AppHandle) {
        self.app = app.clone();
    }

    fn draw_ui(&mut self, ui: &imgui::Ui) {
        Self::draw_main_menu_bar(ui);

        if self.show_demo_window {
            ui.show_demo_window(&mut self.show_demo_window);
        }
        self.draw_hello_window(ui);
        if self.show_another_window {
            self.draw_another_window(ui);
        }
    }

    fn on_key(&mut self, event: &KeyEvent) {
        log::debug!("demo app got {event:?}");
        self.last_key = Some(*event);
    }
}
