//! Глобальный log sink (host-pluggable)
//!
//! Host engine подменяет sink на свой (console вывод движка),
//! headless режим и тесты получают stdout fallback.
//! Timestamp добавляем здесь, не в sink'е.

use once_cell::sync::Lazy;
use std::sync::Mutex;

static SINK: Lazy<Mutex<Option<Box<dyn LogSink>>>> = Lazy::new(|| Mutex::new(None));

static THRESHOLD: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Приёмник лог-сообщений. Host реализует поверх своего вывода.
pub trait LogSink: Send + Sync {
    fn write(&self, level: LogLevel, message: &str);
}

pub fn set_sink(sink: Box<dyn LogSink>) {
    *SINK.lock().unwrap() = Some(sink);
}

pub fn set_sink_if_empty(sink: Box<dyn LogSink>) {
    let mut slot = SINK.lock().unwrap();
    if slot.is_none() {
        *slot = Some(sink);
    }
}

pub fn set_threshold(level: LogLevel) {
    *THRESHOLD.lock().unwrap() = level;
}

pub fn log(message: &str) {
    log_at(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_at(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_at(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_at(LogLevel::Error, message);
}

pub fn log_at(level: LogLevel, message: &str) {
    if level < *THRESHOLD.lock().unwrap() {
        return;
    }
    if let Some(sink) = SINK.lock().unwrap().as_ref() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        sink.write(level, &format!("[{}] {}", timestamp, message));
    }
}

struct StdoutSink;

impl LogSink for StdoutSink {
    fn write(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

pub fn init_logger() {
    set_sink_if_empty(Box::new(StdoutSink));
}
