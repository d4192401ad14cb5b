//! JSON-lines event log.
//!
//! One JSON object per line: a `session_start` record when a game begins, a
//! `signal` record for every audio cue, and a `session_end` record with the
//! final score. Logging is best effort; a write failure disables the log for
//! the rest of the run instead of interrupting play.

use std::fs::{File, OpenOptions};
use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::GameConfig;
use crate::core::FinalScore;
use crate::types::{Difficulty, Signal};

/// One line of the event log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventRecord<'a> {
    SessionStart {
        player: &'a str,
        difficulty: &'static str,
    },
    Signal {
        signal: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        lines: Option<u8>,
    },
    SessionEnd {
        player: &'a str,
        difficulty: &'static str,
        score: u32,
        lines: u32,
    },
}

impl<'a> EventRecord<'a> {
    pub fn session_start(player: &'a str, difficulty: Difficulty) -> Self {
        EventRecord::SessionStart {
            player,
            difficulty: difficulty.as_str(),
        }
    }

    pub fn signal(signal: Signal) -> Self {
        let lines = match signal {
            Signal::LineClear { lines } => Some(lines),
            _ => None,
        };
        EventRecord::Signal {
            signal: signal.as_str(),
            lines,
        }
    }

    pub fn session_end(score: &'a FinalScore) -> Self {
        EventRecord::SessionEnd {
            player: &score.player,
            difficulty: score.difficulty.as_str(),
            score: score.score,
            lines: score.lines,
        }
    }
}

/// Append-only event sink. Disabled logs accept and drop every record.
pub struct EventLog<W: Write = File> {
    out: Option<W>,
    buf: Vec<u8>,
}

impl EventLog<File> {
    /// Open (or create) `path` for appending.
    pub fn open(path: &str) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening event log {path}"))?;
        Ok(Self::new(file))
    }

    /// Log to the configured path, or nowhere if none is set or it cannot be
    /// opened.
    pub fn from_config(config: &GameConfig) -> Self {
        let Some(path) = config.log_path.as_deref() else {
            return Self::disabled();
        };
        match Self::open(path) {
            Ok(log) => log,
            Err(e) => {
                eprintln!("[Blockfall] event log disabled: {e:#}");
                Self::disabled()
            }
        }
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            buf: Vec::with_capacity(256),
        }
    }

    pub fn disabled() -> Self {
        Self {
            out: None,
            buf: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// The underlying writer, if logging is still enabled.
    pub fn get_ref(&self) -> Option<&W> {
        self.out.as_ref()
    }

    /// Write one record as a JSON line.
    pub fn write(&mut self, record: &EventRecord<'_>) -> Result<()> {
        let Some(out) = self.out.as_mut() else {
            return Ok(());
        };
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, record)?;
        self.buf.push(b'\n');
        out.write_all(&self.buf)?;
        out.flush()?;
        Ok(())
    }

    /// Write one record, disabling the log if that fails.
    pub fn record(&mut self, record: &EventRecord<'_>) {
        if let Err(e) = self.write(record) {
            eprintln!("[Blockfall] event log disabled: {e:#}");
            self.out = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn lines_of(log: &EventLog<Vec<u8>>) -> Vec<serde_json::Value> {
        let bytes = log.get_ref().unwrap();
        String::from_utf8(bytes.clone())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_records_are_json_lines() {
        let mut log = EventLog::new(Vec::new());
        log.record(&EventRecord::session_start("Ada", Difficulty::Medium));
        log.record(&EventRecord::signal(Signal::LineClear { lines: 2 }));
        log.record(&EventRecord::signal(Signal::Move));

        let lines = lines_of(&log);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["event"], "session_start");
        assert_eq!(lines[0]["player"], "Ada");
        assert_eq!(lines[0]["difficulty"], "medium");
        assert_eq!(lines[1]["event"], "signal");
        assert_eq!(lines[1]["lines"], 2);
        assert!(lines[2].get("lines").is_none());
    }

    #[test]
    fn test_session_end_record() {
        let score = FinalScore {
            player: "Grace".to_string(),
            score: 340,
            difficulty: Difficulty::Hard,
            lines: 3,
        };
        let mut log = EventLog::new(Vec::new());
        log.record(&EventRecord::session_end(&score));

        let lines = lines_of(&log);
        assert_eq!(lines[0]["event"], "session_end");
        assert_eq!(lines[0]["score"], 340);
        assert_eq!(lines[0]["lines"], 3);
        assert_eq!(lines[0]["difficulty"], "hard");
    }

    #[test]
    fn test_disabled_log_accepts_records() {
        let mut log: EventLog<Vec<u8>> = EventLog::disabled();
        assert!(!log.is_enabled());
        assert!(log.write(&EventRecord::signal(Signal::GameOver)).is_ok());
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_disables_log() {
        let mut log = EventLog::new(FailingWriter);
        log.record(&EventRecord::signal(Signal::Rotate));
        assert!(!log.is_enabled());
    }

    #[test]
    fn test_unopenable_path_disables_log() {
        let config = GameConfig {
            log_path: Some("/nonexistent-dir/blockfall/events.jsonl".to_string()),
            ..GameConfig::default()
        };
        assert!(!EventLog::from_config(&config).is_enabled());
    }
}
