//! Output formatting utilities

use crate::domain::day::{day_label, DayFile};
use crate::domain::entries::JournalEntry;
use crate::domain::search::match_locations;
use crate::domain::stats::JournalStats;
use crate::domain::template::EntryTemplate;
use crate::infrastructure::BackupOutcome;

/// Format a list of day files for display
pub fn format_day_list(days: &[DayFile]) -> String {
    if days.is_empty() {
        return "No days found".to_string();
    }

    let mut output = String::new();
    for day in days {
        match day.date {
            Some(date) => output.push_str(&format!("{}  {}\n", date.format("%Y-%m-%d"), day.filename)),
            // Name doesn't follow the date pattern - keep the column aligned
            None => output.push_str(&format!("            {}\n", day.filename)),
        }
    }
    output
}

fn entry_line(entry: &JournalEntry) -> String {
    let mut line = format!(
        "{}  #{}  {}",
        day_label(&entry.day),
        entry.entry_index,
        entry.title
    );
    if !entry.tags.is_empty() {
        line.push_str(&format!("  [{}]", entry.tags.join(", ")));
    }
    line.push_str(&format!("  ({} words)", entry.word_count()));
    line
}

/// Format entries one per line: day, index, title, tags, word count
pub fn format_entry_list(entries: &[JournalEntry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry_line(entry));
        output.push('\n');
    }
    output
}

/// Format search hits, noting where `text` matched
pub fn format_search_results(entries: &[JournalEntry], text: Option<&str>) -> String {
    if entries.is_empty() {
        return "No matching entries".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry_line(entry));

        if let Some(text) = text {
            let locations = match_locations(entry, text);
            if locations.any() {
                output.push_str(&format!("  matched in {}", locations.labels().join(", ")));
            }
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "\n{} {} found\n",
        entries.len(),
        if entries.len() == 1 { "entry" } else { "entries" }
    ));
    output
}

pub fn format_stats(stats: &JournalStats) -> String {
    let mut output = String::new();
    output.push_str(&format!("Total days:              {}\n", stats.total_days));
    output.push_str(&format!("Total entries:           {}\n", stats.total_entries));
    output.push_str(&format!("Total words:             {}\n", stats.total_words));
    output.push_str(&format!(
        "Average words per entry: {}\n",
        stats.average_words_per_entry
    ));
    output.push_str(&format!("Entries in last 7 days:  {}\n", stats.recent_entries));

    if let (Some(first), Some(last)) = (stats.first_day, stats.last_day) {
        output.push_str(&format!("Date range:              {} to {}\n", first, last));
    }

    if !stats.top_tags.is_empty() {
        output.push_str("\nTop tags:\n");
        for (tag, count) in &stats.top_tags {
            output.push_str(&format!("  {:<20} {}\n", tag, count));
        }
    }

    output
}

pub fn format_template_list(templates: &[EntryTemplate]) -> String {
    let mut output = String::new();
    for template in templates {
        output.push_str(&format!(
            "{:<18} {}  [{}]\n",
            template.name,
            template.title,
            template.tags.join(", ")
        ));
    }
    output
}

pub fn format_backup_outcome(outcome: &BackupOutcome) -> String {
    match outcome {
        BackupOutcome::Created(path) => format!("Backup created: {}", path.display()),
        BackupOutcome::NotDue => {
            "Backup not due yet for the configured frequency (use --force to override)".to_string()
        }
        BackupOutcome::Disabled => {
            "Automatic backups are disabled (use --force to back up anyway)".to_string()
        }
        BackupOutcome::Failed(reason) => format!("Backup failed: {}", reason),
    }
}
