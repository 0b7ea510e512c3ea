#![allow(dead_code)]
#![allow(deprecated)]

use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn daybook_cmd() -> Command {
    let mut cmd = Command::cargo_bin("daybook").unwrap();
    cmd.env_remove("DAYBOOK_SETTINGS");
    cmd.env_remove("DAYBOOK_LOG");
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("EDITOR");
    cmd.env_remove("VISUAL");
    cmd
}

/// A journal rooted in a temp directory with its own settings file
pub struct TestJournal {
    pub temp: TempDir,
}

impl TestJournal {
    /// Plain titles and no automatic backups, so output is predictable
    pub fn new() -> Self {
        Self::with_settings(json!({}))
    }

    /// Default test settings with `overrides` merged on top
    pub fn with_settings(overrides: Value) -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        let mut settings = json!({
            "journal_directory": root.join("daily"),
            "backup_directory": root.join("backups"),
            "templates_directory": root.join("templates"),
            "use_timestamp": false,
            "auto_backup": false,
        });
        if let (Some(base), Value::Object(extra)) = (settings.as_object_mut(), overrides) {
            base.extend(extra);
        }

        fs::write(
            root.join("settings.json"),
            serde_json::to_string_pretty(&settings).unwrap(),
        )
        .unwrap();
        fs::create_dir_all(root.join("daily")).unwrap();

        TestJournal { temp }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.temp.path().join("settings.json")
    }

    pub fn journal_dir(&self) -> PathBuf {
        self.temp.path().join("daily")
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.temp.path().join("backups")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.temp.path().join("templates")
    }

    /// `daybook` pointed at this journal's settings
    pub fn cmd(&self) -> Command {
        let mut cmd = daybook_cmd();
        cmd.env("DAYBOOK_SETTINGS", self.settings_path());
        cmd
    }

    pub fn write_day(&self, filename: &str, text: &str) {
        fs::write(self.journal_dir().join(filename), text).unwrap();
    }

    pub fn read_day(&self, filename: &str) -> String {
        fs::read_to_string(self.journal_dir().join(filename)).unwrap()
    }

    pub fn day_exists(&self, filename: &str) -> bool {
        self.journal_dir().join(filename).exists()
    }
}

pub fn count_entries(dir: &Path) -> usize {
    match fs::read_dir(dir) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    }
}

/// Today's day filename under the default naming
pub fn today_filename() -> String {
    format!("{}.md", chrono::Local::now().format("%Y-%m-%d"))
}
