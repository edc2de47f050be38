/// 把 panic 信息写进日志，而不是只打印到 stderr
pub fn panic_handler(info: &std::panic::PanicHookInfo) {
    let thread = std::thread::current();
    log::error!("thread '{}' panicked: {}", thread.name().unwrap_or("<unnamed>"), info);
}

pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(panic_handler));
}
