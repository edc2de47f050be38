use std::io::Write;
use std::str::FromStr;

use anstyle::{AnsiColor, Color, RgbColor, Style};

/// 只保留文件名，`record.file()` 在 Windows 下是 `\` 分隔，其它平台是 `/`
fn short_file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// 解析配置文件里的日志等级，无法识别时退回 `Info`
pub fn parse_level(level: &str) -> log::LevelFilter {
    log::LevelFilter::from_str(level.trim()).unwrap_or_else(|_| {
        eprintln!("unknown log level `{level}`, fallback to info");
        log::LevelFilter::Info
    })
}

/// 初始化全局 logger
///
/// 输出格式：`[HH:MM:SS] LEVEL [thread] [file:line] message`。
/// 线程名会打印出来，方便观察 GL context 在哪个线程上被使用。
///
/// `RUST_LOG` 会覆盖传入的 `level`；重复调用只有第一次生效。
pub fn init_log(level: log::LevelFilter) {
    let result = env_logger::Builder::new()
        .format(|buf, record| {
            let level_style = match record.level() {
                log::Level::Info => Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))),
                log::Level::Warn => Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
                log::Level::Error => Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold(),
                _ => buf.default_level_style(record.level()),
            };
            let grey_style = Style::new().fg_color(Some(Color::Rgb(RgbColor(110, 110, 110))));

            let time = chrono::Local::now().format("%H:%M:%S");
            let level = record.level();
            let thread = std::thread::current();
            let thread_name = thread.name().unwrap_or("<unnamed>");
            let file = short_file_name(record.file().unwrap_or(""));
            let line = record.line().unwrap_or(0);

            writeln!(
                buf,
                "{level_style}[{time}] {level:<5}{level_style:#} {grey_style}[{thread_name}] [{file}:{line}]{grey_style:#} {}",
                record.args()
            )
        })
        .filter(None, level)
        .parse_default_env()
        .try_init();

    if result.is_err() {
        log::debug!("logger already initialized");
    }
}
