use glshell_app::platform::input_event::{InputEvent, KeyAction, KeyCode, KeyEvent, Modifiers};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{ModifiersState, PhysicalKey};

pub struct WinitEventAdapter {}
impl WinitEventAdapter {
    /// `mods` 是最近一次 `ModifiersChanged` 记录下来的修饰键状态
    pub fn from_winit_event(event: &WindowEvent, mods: ModifiersState) -> InputEvent {
        match event {
            WindowEvent::KeyboardInput { event, .. } => InputEvent::KeyboardInput(KeyEvent {
                key: Self::physical_key_from_winit(event.physical_key),
                scancode: Self::scancode(event.physical_key),
                action: Self::action_from_winit(event.state, event.repeat),
                mods: Self::mods_from_winit(mods),
            }),
            // winit 的 Resized 就是 surface 的像素尺寸
            WindowEvent::Resized(physical_size) => InputEvent::FramebufferResized {
                physical_width: physical_size.width,
                physical_height: physical_size.height,
            },
            WindowEvent::CloseRequested => InputEvent::CloseRequested,
            _ => InputEvent::Other,
        }
    }

    fn physical_key_from_winit(key: PhysicalKey) -> KeyCode {
        match key {
            PhysicalKey::Code(key_code) => Self::key_from_winit(key_code),
            PhysicalKey::Unidentified(_) => KeyCode::Other,
        }
    }

    fn key_from_winit(key: winit::keyboard::KeyCode) -> KeyCode {
        match key {
            winit::keyboard::KeyCode::KeyW => KeyCode::KeyW,
            winit::keyboard::KeyCode::KeyA => KeyCode::KeyA,
            winit::keyboard::KeyCode::KeyS => KeyCode::KeyS,
            winit::keyboard::KeyCode::KeyD => KeyCode::KeyD,
            winit::keyboard::KeyCode::KeyE => KeyCode::KeyE,
            winit::keyboard::KeyCode::KeyQ => KeyCode::KeyQ,
            winit::keyboard::KeyCode::Escape => KeyCode::Escape,
            winit::keyboard::KeyCode::Space => KeyCode::Space,
            winit::keyboard::KeyCode::Enter => KeyCode::Enter,
            winit::keyboard::KeyCode::Tab => KeyCode::Tab,
            winit::keyboard::KeyCode::Backspace => KeyCode::Backspace,
            winit::keyboard::KeyCode::ArrowUp => KeyCode::ArrowUp,
            winit::keyboard::KeyCode::ArrowDown => KeyCode::ArrowDown,
            winit::keyboard::KeyCode::ArrowLeft => KeyCode::ArrowLeft,
            winit::keyboard::KeyCode::ArrowRight => KeyCode::ArrowRight,
            winit::keyboard::KeyCode::F1 => KeyCode::F1,
            _ => KeyCode::Other,
        }
    }

    #[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
    fn scancode(key: PhysicalKey) -> u32 {
        use winit::platform::scancode::PhysicalKeyExtScancode;
        key.to_scancode().unwrap_or(0)
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    fn scancode(_key: PhysicalKey) -> u32 {
        0
    }

    fn action_from_winit(state: ElementState, repeat: bool) -> KeyAction {
        match (state, repeat) {
            (ElementState::Pressed, false) => KeyAction::Press,
            (ElementState::Pressed, true) => KeyAction::Repeat,
            (ElementState::Released, _) => KeyAction::Release,
        }
    }

    fn mods_from_winit(mods: ModifiersState) -> Modifiers {
        let mut result = Modifiers::empty();
        result.set(Modifiers::SHIFT, mods.shift_key());
        result.set(Modifiers::CONTROL, mods.control_key());
        result.set(Modifiers::ALT, mods.alt_key());
        result.set(Modifiers::SUPER, mods.super_key());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    #[test]
    fn test_resize_and_close() {
        assert_eq!(
            WinitEventAdapter::from_winit_event(
                &WindowEvent::Resized(PhysicalSize::new(800, 600)),
                ModifiersState::empty()
            ),
            InputEvent::FramebufferResized {
                physical_width: 800,
                physical_height: 600
            }
        );
        assert_eq!(
            WinitEventAdapter::from_winit_event(&WindowEvent::CloseRequested, ModifiersState::empty()),
            InputEvent::CloseRequested
        );
        assert_eq!(
            WinitEventAdapter::from_winit_event(&WindowEvent::Focused(true), ModifiersState::empty()),
            InputEvent::Other
        );
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            WinitEventAdapter::physical_key_from_winit(PhysicalKey::Code(winit::keyboard::KeyCode::Escape)),
            KeyCode::Escape
        );
        assert_eq!(
            WinitEventAdapter::physical_key_from_winit(PhysicalKey::Code(winit::keyboard::KeyCode::KeyZ)),
            KeyCode::Other
        );
        assert_eq!(
            WinitEventAdapter::physical_key_from_winit(PhysicalKey::Unidentified(
                winit::keyboard::NativeKeyCode::Unidentified
            )),
            KeyCode::Other
        );
    }

    #[test]
    fn test_action_and_mods() {
        assert_eq!(WinitEventAdapter::action_from_winit(ElementState::Pressed, false), KeyAction::Press);
        assert_eq!(WinitEventAdapter::action_from_winit(ElementState::Pressed, true), KeyAction::Repeat);
        assert_eq!(WinitEventAdapter::action_from_winit(ElementState::Released, true), KeyAction::Release);

        assert_eq!(WinitEventAdapter::mods_from_winit(ModifiersState::empty()), Modifiers::empty());
        assert_eq!(
            WinitEventAdapter::mods_from_winit(ModifiersState::SHIFT | ModifiersState::ALT),
            Modifiers::SHIFT | Modifiers::ALT
        );
        assert_eq!(
            WinitEventAdapter::mods_from_winit(ModifiersState::CONTROL | ModifiersState::SUPER),
            Modifiers::CONTROL | Modifiers::SUPER
        );
    }
}
