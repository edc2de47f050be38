pub mod app;
pub mod gl_window;
pub mod glow_device;
pub mod winit_event_adapter;
