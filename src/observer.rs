//! Diagnostic reporting for search calls.
//!
//! The fetcher never writes to a log directly; it hands every decision point
//! to a [`SearchObserver`]. [`TracingObserver`] forwards to `tracing`, and
//! [`RecordingObserver`] keeps reports in memory so tests can inspect them.

use std::sync::{Mutex, PoisonError};

use tracing::Level;
use tracing::field::display;

pub trait SearchObserver: Send + Sync {
    fn report(&self, level: Level, message: &str, fields: &[(&str, String)]);
}

/// Emits each report as a `tracing` event.
///
/// The fields the fetcher reports (`query`, `error`, `count`, `url`) become
/// event fields of the same name; any other pairs are rendered into `extra`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

const KNOWN_FIELDS: [&str; 4] = ["query", "error", "count", "url"];

macro_rules! emit {
    ($event:ident, $fields:expr, $message:expr) => {{
        let fields = $fields;
        let value = |name: &str| {
            fields
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| display(value.as_str()))
        };
        let extra = render_fields(fields.iter().filter(|(key, _)| !KNOWN_FIELDS.contains(key)));
        tracing::$event!(
            query = value("query"),
            error = value("error"),
            count = value("count"),
            url = value("url"),
            extra = (!extra.is_empty()).then(|| display(extra.as_str())),
            "{}",
            $message
        );
    }};
}

impl SearchObserver for TracingObserver {
    fn report(&self, level: Level, message: &str, fields: &[(&str, String)]) {
        if level == Level::ERROR {
            emit!(error, fields, message);
        } else if level == Level::WARN {
            emit!(warn, fields, message);
        } else if level == Level::INFO {
            emit!(info, fields, message);
        } else if level == Level::DEBUG {
            emit!(debug, fields, message);
        } else {
            emit!(trace, fields, message);
        }
    }
}

fn render_fields<'a, 'b: 'a>(fields: impl Iterator<Item = &'a (&'b str, String)>) -> String {
    fields
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub level: Level,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl Report {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// In-memory observer.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    reports: Mutex<Vec<Report>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl SearchObserver for RecordingObserver {
    fn report(&self, level: Level, message: &str, fields: &[(&str, String)]) {
        let report = Report {
            level,
            message: message.to_string(),
            fields: fields
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        };
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report);
    }
}
