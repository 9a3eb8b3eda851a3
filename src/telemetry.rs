// src/telemetry.rs
//
// Lightweight JSONL telemetry sink for Coffer.
//
// Writes one JSON object per evaluation to a file, controlled entirely
// via environment variables so batch experiments can turn telemetry
// on/off without code changes.
//
// Environment variables:
// - `COFFER_TELEMETRY_MODE`: "off" (default) disables telemetry,
//   "jsonl" writes JSONL to `COFFER_TELEMETRY_PATH`.
// - `COFFER_TELEMETRY_PATH`: path to the JSONL file. Required when
//   mode is "jsonl".
// - `COFFER_TELEMETRY_APPEND`: "1"/"true"/"yes" appends to existing
//   files instead of truncating. Default is truncate.
//
// This module is a generic JSONL writer and does not auto-inject
// `schema_version`; producers include `"schema_version": 1` in each
// record themselves.

use std::env;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde_json::Value as JsonValue;

/// Current telemetry schema version.
pub const SCHEMA_VERSION: i64 = 1;

/// Telemetry mode, controlled by COFFER_TELEMETRY_MODE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryMode {
    Off,
    Jsonl,
}

impl TelemetryMode {
    /// Parse mode from environment. Defaults to Off.
    ///
    /// Any unknown value is treated as Off for safety.
    pub fn from_env() -> Self {
        match env::var("COFFER_TELEMETRY_MODE") {
            Ok(s) => match s.to_lowercase().as_str() {
                "jsonl" => TelemetryMode::Jsonl,
                _ => TelemetryMode::Off,
            },
            Err(_) => TelemetryMode::Off,
        }
    }
}

/// A JSONL telemetry sink.
///
/// When mode == Off, all methods are no-ops. When mode == Jsonl, the
/// file named by COFFER_TELEMETRY_PATH is opened lazily on first use
/// and one JSON object is written per line.
pub struct TelemetrySink {
    mode: TelemetryMode,
    path: Option<PathBuf>,
    append: bool,
    writer: Option<BufWriter<File>>,
}

impl TelemetrySink {
    /// Construct a telemetry sink from environment configuration.
    ///
    /// Never fails: invalid configuration falls back to Off and logs
    /// nothing.
    pub fn from_env() -> Self {
        let mode = TelemetryMode::from_env();
        let path = if mode == TelemetryMode::Jsonl {
            env::var("COFFER_TELEMETRY_PATH").ok().map(PathBuf::from)
        } else {
            None
        };
        let append = env::var("COFFER_TELEMETRY_APPEND")
            .ok()
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        TelemetrySink {
            mode,
            path,
            append,
            writer: None,
        }
    }

    /// Whether this sink will actually write anything.
    pub fn is_enabled(&self) -> bool {
        self.mode == TelemetryMode::Jsonl
    }

    /// Write one JSON record as a single line.
    ///
    /// Errors are swallowed after disabling the sink; telemetry must
    /// never take down an evaluation.
    pub fn log_json(&mut self, record: &JsonValue) {
        let Some(writer) = self.ensure_writer() else {
            return;
        };
        let line = match serde_json::to_string(record) {
            Ok(s) => s,
            Err(_) => return,
        };
        if writeln!(writer, "{line}").is_err() {
            self.mode = TelemetryMode::Off;
            self.writer = None;
        }
    }

    /// Flush buffered records to disk.
    pub fn flush(&mut self) {
        if let Some(writer) = self.writer.as_mut() {
            let _ = writer.flush();
        }
    }

    fn ensure_writer(&mut self) -> Option<&mut BufWriter<File>> {
        if self.mode != TelemetryMode::Jsonl {
            return None;
        }

        if self.writer.is_none() {
            let path = match &self.path {
                Some(p) => p.clone(),
                None => {
                    // Misconfigured: mode Jsonl but no path.
                    self.mode = TelemetryMode::Off;
                    return None;
                }
            };

            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }

            let mut options = OpenOptions::new();
            options.create(true).write(true);
            if self.append {
                options.append(true);
            } else {
                options.truncate(true);
            }

            match options.open(&path) {
                Ok(f) => self.writer = Some(BufWriter::new(f)),
                Err(_) => {
                    self.mode = TelemetryMode::Off;
                    return None;
                }
            }
        }

        self.writer.as_mut()
    }
}

impl Drop for TelemetrySink {
    fn drop(&mut self) {
        self.flush();
    }
}
