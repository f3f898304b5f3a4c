/// DotaCounterBot: Logger
/// JSONL event stream, jeden soubor na UTC den

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct EventLogger {
    log_dir: PathBuf,
}

impl EventLogger {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        let dir = log_dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            tracing::warn!("Cannot create log dir {}: {e}", dir.display());
        }
        Self { log_dir: dir }
    }

    pub fn dir(&self) -> &Path {
        &self.log_dir
    }

    /// Dnešní soubor, `{dir}/{YYYY-MM-DD}.jsonl`.
    pub fn current_path(&self) -> PathBuf {
        let date = Utc::now().format("%Y-%m-%d").to_string();
        self.log_dir.join(format!("{date}.jsonl"))
    }

    pub fn log<T: Serialize>(&self, event: &T) -> Result<()> {
        let path  = self.current_path();
        let line  = serde_json::to_string(event)?;
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Cannot open {}", path.display()))?;
        writeln!(f, "{line}")?;
        Ok(())
    }
}

pub fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

// ── Event typy ────────────────────────────────────────────────────────────────

#[derive(Serialize, Debug)]
pub struct PredictionEvent {
    pub ts:                      String,
    pub event:                   &'static str,   // "PREDICTION"
    pub radiant:                 Vec<String>,
    pub dire:                    Vec<String>,
    pub result:                  String,         // "radiant_win" | "dire_win" | "uncertain"
    pub win_probability_radiant: f64,
    pub win_probability_dire:    f64,
    pub confidence:              f64,
}

#[derive(Serialize, Debug)]
pub struct CommandEvent {
    pub ts:      String,
    pub event:   &'static str,   // "COMMAND"
    pub chat_id: i64,
    pub command: String,
    pub ok:      bool,
}

impl CommandEvent {
    pub fn new(chat_id: i64, command: impl Into<String>, ok: bool) -> Self {
        Self { ts: now_iso(), event: "COMMAND", chat_id, command: command.into(), ok }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("counter-bot-logger-{tag}-{}", std::process::id()))
    }

    #[test]
    fn appends_one_line_per_event() {
        let dir = temp_dir("append");
        let _ = fs::remove_dir_all(&dir);
        let logger = EventLogger::new(&dir);

        logger.log(&CommandEvent::new(42, "/hero", true)).unwrap();
        logger.log(&CommandEvent::new(42, "/predict", false)).unwrap();

        let content = fs::read_to_string(logger.current_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "COMMAND");
        assert_eq!(first["chat_id"], 42);
        assert_eq!(first["command"], "/hero");
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["ok"], false);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn prediction_event_shape() {
        let event = PredictionEvent {
            ts:                      now_iso(),
            event:                   "PREDICTION",
            radiant:                 vec!["Slardar".into()],
            dire:                    vec!["Lion".into()],
            result:                  "radiant_win".into(),
            win_probability_radiant: 61.5,
            win_probability_dire:    38.5,
            confidence:              23.0,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "PREDICTION");
        assert_eq!(json["radiant"][0], "Slardar");
        assert_eq!(json["win_probability_dire"], 38.5);
    }

    #[test]
    fn file_is_named_by_utc_date() {
        let logger = EventLogger::new(temp_dir("name"));
        let name = logger.current_path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.ends_with(".jsonl"));
        assert_eq!(name.len(), "YYYY-MM-DD.jsonl".len());
        let _ = fs::remove_dir_all(logger.dir());
    }
}
