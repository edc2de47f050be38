// 参考 winit::KeyCode，只保留 shell 用得到的按键
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyCode {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyE,
    KeyQ,
    Escape,
    Space,
    Enter,
    Tab,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    F1,

    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Press,
    Release,
    /// 按住不放时系统产生的重复按下
    Repeat,
}

bitflags::bitflags! {
    /// 按键时处于按下状态的修饰键，位定义与 GLFW 的 `GLFW_MOD_*` 一致
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        const SHIFT = 0x0001;
        const CONTROL = 0x0002;
        const ALT = 0x0004;
        const SUPER = 0x0008;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: KeyCode,
    /// 平台相关的扫描码，拿不到时为 0
    pub scancode: u32,
    pub action: KeyAction,
    pub mods: Modifiers,
}

/// 窗口系统事件，由平台层从原生事件转换而来
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// 键盘按键事件
    KeyboardInput(KeyEvent),
    /// framebuffer 的像素尺寸改变
    FramebufferResized {
        physical_width: u32,
        physical_height: u32,
    },
    /// 用户请求关闭窗口
    CloseRequested,

    Other,
}
