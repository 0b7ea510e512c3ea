//! Trailing `@tag` entry format

use super::{
    heading_title, in_index_order, join_trimmed, normalize_tags, EntryFormat, JournalEntry,
    OpenEntry,
};

/// Heading, body, then a final line of `@tag` tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingTagsFormat;

const TAG_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Tags of a line made only of `@tag` tokens
fn trailing_tags(line: &str) -> Option<Vec<String>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() || !words.iter().all(|w| w.starts_with('@')) {
        return None;
    }

    let tags: Vec<String> = words
        .iter()
        .map(|w| w[1..].trim_end_matches(TAG_PUNCTUATION).to_lowercase())
        .filter(|t| t.chars().any(char::is_alphanumeric))
        .collect();

    if tags.is_empty() {
        None
    } else {
        Some(normalize_tags(tags))
    }
}

/// Tag as it reads back from its `@tag` token
fn token_tag(tag: &str) -> String {
    tag.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .trim_end_matches(TAG_PUNCTUATION)
        .to_lowercase()
}

fn close(mut open: OpenEntry, entry_index: usize, day: &str) -> JournalEntry {
    open.trim_trailing_blank();
    if let Some(tags) = open.body.last().and_then(|l| trailing_tags(l)) {
        open.tags = tags;
        open.body.pop();
    }
    open.close(entry_index, day)
}

impl EntryFormat for TrailingTagsFormat {
    fn parse(&self, raw: &str, day: &str) -> Vec<JournalEntry> {
        let mut entries = Vec::new();
        let mut current: Option<OpenEntry> = None;

        for line in raw.lines() {
            if let Some(title) = heading_title(line) {
                if let Some(open) = current.take() {
                    entries.push(close(open, entries.len(), day));
                }
                current = Some(OpenEntry::new(title));
            } else if let Some(open) = current.as_mut() {
                open.body.push(line);
            }
        }

        if let Some(open) = current {
            entries.push(close(open, entries.len(), day));
        }

        entries
    }

    fn serialize(&self, entries: &[JournalEntry]) -> String {
        let mut lines = Vec::new();

        for entry in in_index_order(entries) {
            lines.push(format!("# {}", entry.title));
            lines.push(String::new());
            if !entry.body.is_empty() {
                lines.push(entry.body.clone());
                lines.push(String::new());
            }
            let tags = self.canonical_tags(&entry.tags);
            if !tags.is_empty() {
                let tokens: Vec<String> = tags.iter().map(|t| format!("@{}", t)).collect();
                lines.push(tokens.join(" "));
                lines.push(String::new());
            }
        }

        join_trimmed(lines)
    }

    fn canonical_tags(&self, tags: &[String]) -> Vec<String> {
        normalize_tags(
            tags.iter()
                .map(|t| token_tag(t))
                .filter(|t| t.chars().any(char::is_alphanumeric)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: &str = "2025-01-17.md";

    fn parse(raw: &str) -> Vec<JournalEntry> {
        TrailingTagsFormat.parse(raw, DAY)
    }

    #[test]
    fn test_trailing_tag_line_extracted() {
        let entries = parse("# Standup\n\n[2025-01-17 09:00:00] talked\n\n@Work @team.\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tags, vec!["work", "team"]);
        assert_eq!(entries[0].body, "[2025-01-17 09:00:00] talked");
    }

    #[test]
    fn test_mixed_line_stays_in_body() {
        let entries = parse("# Note\n\nlunch with @sam today");
        assert!(entries[0].tags.is_empty());
        assert_eq!(entries[0].body, "lunch with @sam today");
    }

    #[test]
    fn test_punctuation_only_tokens_are_not_tags() {
        let entries = parse("# Note\n\nbody\n@ @!");
        assert!(entries[0].tags.is_empty());
        assert_eq!(entries[0].body, "body\n@ @!");
    }

    #[test]
    fn test_no_headings() {
        assert!(parse("@a @b").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_serialize_layout() {
        let mut a = JournalEntry::new("A", vec!["x".into(), "y".into()], "body1");
        a.day = DAY.into();
        let mut b = JournalEntry::new("B", vec![], "body2");
        b.entry_index = 1;
        b.day = DAY.into();

        let raw = TrailingTagsFormat.serialize(&[a, b]);
        assert_eq!(raw, "# A\n\nbody1\n\n@x @y\n\n# B\n\nbody2");
    }

    #[test]
    fn test_multi_word_and_uppercase_tags_survive_roundtrip() {
        let tags = vec!["Deep Work".to_string(), "Home".to_string()];
        let mut entry = JournalEntry::new("T", tags.clone(), "hello");
        entry.day = DAY.into();

        let raw = TrailingTagsFormat.serialize(&[entry]);
        assert_eq!(raw, "# T\n\nhello\n\n@deep-work @home");

        let parsed = parse(&raw);
        assert_eq!(parsed[0].tags, vec!["deep-work", "home"]);
        assert_eq!(parsed[0].body, "hello");
        assert_eq!(
            TrailingTagsFormat.canonical_tags(&tags),
            parsed[0].tags
        );
        assert_eq!(parse(&TrailingTagsFormat.serialize(&parsed)), parsed);
    }

    #[test]
    fn test_roundtrip() {
        let input = "# A\n\nbody1\n\n@x @y\n\n# B\n\n\n# C\n\nline\n\nmore\n@c";
        let first = parse(input);
        assert_eq!(first.len(), 3);
        assert_eq!(first[2].tags, vec!["c"]);
        assert_eq!(parse(&TrailingTagsFormat.serialize(&first)), first);
    }
}
