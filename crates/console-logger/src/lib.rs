//! Console Logger
//!
//! A `tracing` layer for the browser: every event is formatted as
//! `[HH:MM:SS.mmm] LEVEL target: message`, written to the devtools console
//! and kept in a circular buffer of recent lines.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Unknown log level: {0}")]
    InvalidLevel(String),

    #[error("A global logger is already installed: {0}")]
    AlreadyInstalled(String),
}

/// Circular buffer of formatted lines
#[derive(Debug)]
pub struct LogBuffer {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn push(&self, line: String) {
        let Ok(mut lines) = self.lines.lock() else {
            return;
        };
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Oldest first
    pub fn recent(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Layer that formats events into the buffer and the console
pub struct ConsoleLayer {
    buffer: Arc<LogBuffer>,
}

impl ConsoleLayer {
    pub fn new(buffer: Arc<LogBuffer>) -> Self {
        Self { buffer }
    }
}

fn format_line(level: &Level, target: &str, visitor: &MessageVisitor) -> String {
    format!(
        "[{}] {} {}: {}{}",
        chrono::Local::now().format("%H:%M:%S%.3f"),
        level,
        target,
        visitor.message,
        visitor.fields
    )
}

#[cfg(target_arch = "wasm32")]
fn emit(level: &Level, line: &str) {
    let value = line.into();
    match *level {
        Level::ERROR => web_sys::console::error_1(&value),
        Level::WARN => web_sys::console::warn_1(&value),
        Level::INFO => web_sys::console::info_1(&value),
        _ => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: &Level, line: &str) {
    eprintln!("{}", line);
}

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let line = format_line(metadata.level(), metadata.target(), &visitor);
        emit(metadata.level(), &line);
        self.buffer.push(line);
    }
}

/// Handle to the installed logger
#[derive(Debug, Clone)]
pub struct LogHandle {
    buffer: Arc<LogBuffer>,
}

impl LogHandle {
    pub fn recent(&self) -> Vec<String> {
        self.buffer.recent()
    }
}

pub fn parse_level(level: &str) -> Result<Level, LoggerError> {
    level
        .trim()
        .parse::<Level>()
        .map_err(|_| LoggerError::InvalidLevel(level.to_string()))
}

/// Install the console logger as the global subscriber
pub fn init_logger(app_name: &str, level: &str, capacity: usize) -> Result<LogHandle, LoggerError> {
    let level = parse_level(level)?;
    let buffer = Arc::new(LogBuffer::new(capacity));

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(ConsoleLayer::new(Arc::clone(&buffer)))
        .try_init()
        .map_err(|e| LoggerError::AlreadyInstalled(e.to_string()))?;

    tracing::info!("{} logging at {}", app_name, level);
    Ok(LogHandle { buffer })
}
