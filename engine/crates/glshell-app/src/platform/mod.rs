pub mod input_event;
pub mod window_system;
