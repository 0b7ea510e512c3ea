//! Entry templates: built-in and user-defined

use crate::domain::entries::JournalEntry;
use crate::error::{DaybookError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

// Built-in template bodies
const DAILY_REFLECTION: &str = "What went well today?\n\n\nWhat could have gone better?\n\n\nWhat am I grateful for?\n\n\nGoals for tomorrow:\n- \n- \n- ";
const MEETING_NOTES: &str = "Meeting: \nDate: {ISO_DATE}\nAttendees: \n\nAgenda:\n- \n- \n\nKey Points:\n- \n- \n\nAction Items:\n- [ ] \n- [ ] \n\nNext Steps:\n- ";
const IDEA_CAPTURE: &str = "Idea: \n\nContext:\n\n\nDetails:\n\n\nPotential next steps:\n- \n- \n\nRelated thoughts:\n- ";
const GOAL_SETTING: &str = "Goal: \n\nWhy is this important?\n\n\nSuccess metrics:\n- \n- \n\nTimeline:\n- Start: {ISO_DATE}\n- Milestone 1: \n- End: \n\nResources needed:\n- \n- \n\nPotential obstacles:\n- \n- ";
const LEARNING_LOG: &str = "What I learned: \n\nSource: \n\nKey takeaways:\n- \n- \n\nHow I can apply this:\n\n\nQuestions for further exploration:\n- \n- ";
const GRATITUDE: &str = "Three things I'm grateful for today:\n\n1. \n\n2. \n\n3. \n\nWhy these matter to me:\n\n\nHow I can express gratitude:\n- ";

const BUILTINS: &[(&str, &str, &[&str], &str)] = &[
    (
        "daily_reflection",
        "Daily Reflection",
        &["reflection", "personal"],
        DAILY_REFLECTION,
    ),
    (
        "meeting_notes",
        "Meeting Notes",
        &["work", "meeting"],
        MEETING_NOTES,
    ),
    ("idea_capture", "Idea", &["ideas", "brainstorm"], IDEA_CAPTURE),
    (
        "goal_setting",
        "Goal Setting",
        &["goals", "planning"],
        GOAL_SETTING,
    ),
    (
        "learning_log",
        "Learning Log",
        &["learning", "education"],
        LEARNING_LOG,
    ),
    (
        "gratitude",
        "Gratitude Entry",
        &["gratitude", "mindfulness"],
        GRATITUDE,
    ),
];

/// Extension of user template files
const TEMPLATE_EXTENSION: &str = "toml";

/// Prefilled title, tags and body for a new entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntryTemplate {
    #[serde(skip)]
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub body: String,
}

impl EntryTemplate {
    /// Create template from built-in template name
    pub fn from_builtin(name: &str) -> Result<Self> {
        BUILTINS
            .iter()
            .find(|(builtin, ..)| *builtin == name)
            .map(|(name, title, tags, body)| EntryTemplate {
                name: name.to_string(),
                title: title.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                body: body.to_string(),
            })
            .ok_or_else(|| DaybookError::Template(format!("Unknown template: {}", name)))
    }

    /// Load a user template from a TOML file; the file stem is its name
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| DaybookError::Template(format!("Failed to read template file: {}", e)))?;

        let mut template: EntryTemplate = toml::from_str(&content)?;
        template.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        if template.title.trim().is_empty() {
            return Err(DaybookError::Template(format!(
                "Template {} has an empty title",
                path.display()
            )));
        }

        Ok(template)
    }

    /// Render into a detached entry with date variables substituted
    pub fn render(&self, date: NaiveDate) -> JournalEntry {
        JournalEntry::new(
            &substitute(&self.title, date),
            self.tags.clone(),
            &substitute(&self.body, date),
        )
    }
}

/// Replace date placeholders in `text`
fn substitute(text: &str, date: NaiveDate) -> String {
    text.replace("{DATE}", &date.format("%B %d, %Y").to_string())
        .replace("{ISO_DATE}", &date.format("%Y-%m-%d").to_string())
        .replace("{DAY_NAME}", &date.format("%A").to_string())
        .replace("{YEAR}", &date.format("%Y").to_string())
        .replace("{MONTH}", &date.format("%B").to_string())
}

/// All built-in templates
pub fn builtin_templates() -> Vec<EntryTemplate> {
    BUILTINS
        .iter()
        .filter_map(|(name, ..)| EntryTemplate::from_builtin(name).ok())
        .collect()
}

/// Built-ins merged with `*.toml` templates from `dir`, sorted by name.
///
/// User templates override built-ins of the same name. A missing directory
/// just yields the built-ins.
pub fn available_templates(dir: &Path) -> Result<Vec<EntryTemplate>> {
    let mut by_name: BTreeMap<String, EntryTemplate> = builtin_templates()
        .into_iter()
        .map(|t| (t.name.clone(), t))
        .collect();

    if dir.is_dir() {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some(TEMPLATE_EXTENSION) {
                let template = EntryTemplate::from_file(&path)?;
                by_name.insert(template.name.clone(), template);
            }
        }
    }

    Ok(by_name.into_values().collect())
}

/// Load a user template from `dir` or fall back to the built-in
pub fn load_template(dir: &Path, name: &str) -> Result<EntryTemplate> {
    let custom_path = dir.join(format!("{}.{}", name, TEMPLATE_EXTENSION));

    if custom_path.exists() {
        EntryTemplate::from_file(&custom_path)
    } else {
        EntryTemplate::from_builtin(name)
    }
}
