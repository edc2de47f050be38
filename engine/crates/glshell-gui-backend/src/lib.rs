pub mod gui_host;

pub use imgui_glow_renderer::glow;
