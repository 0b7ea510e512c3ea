//! `tags: a, b` entry format

use super::{
    heading_title, in_index_order, join_trimmed, normalize_tags, EntryFormat, JournalEntry,
    OpenEntry,
};

/// Heading, optional `tags:` line, body; entries separated by blank lines
#[derive(Debug, Clone, Copy, Default)]
pub struct TagsLineFormat;

/// Tags of a `tags: a, b` line, if `line` is one
fn tags_line(line: &str) -> Option<Vec<String>> {
    let list = line.trim_start().strip_prefix("tags:")?;
    Some(normalize_tags(list.split(',')))
}

impl EntryFormat for TagsLineFormat {
    fn parse(&self, raw: &str, day: &str) -> Vec<JournalEntry> {
        let mut entries = Vec::new();
        let mut current: Option<OpenEntry> = None;

        for line in raw.lines() {
            if let Some(title) = heading_title(line) {
                if let Some(open) = current.take() {
                    entries.push(open.close(entries.len(), day));
                }
                current = Some(OpenEntry::new(title));
            } else if let Some(open) = current.as_mut() {
                match tags_line(line) {
                    Some(tags) => open.tags = tags,
                    None => open.body.push(line),
                }
            }
            // Lines before the first heading belong to no entry
        }

        if let Some(open) = current {
            entries.push(open.close(entries.len(), day));
        }

        entries
    }

    fn serialize(&self, entries: &[JournalEntry]) -> String {
        let mut lines = Vec::new();

        for entry in in_index_order(entries) {
            lines.push(format!("# {}", entry.title));
            let tags = self.canonical_tags(&entry.tags);
            if !tags.is_empty() {
                lines.push(format!("tags: {}", tags.join(", ")));
                lines.push(String::new());
            }
            if !entry.body.is_empty() {
                lines.push(entry.body.clone());
            }
            lines.push(String::new());
            lines.push(String::new());
        }

        join_trimmed(lines)
    }

    /// A comma inside a tag would split it on the way back in
    fn canonical_tags(&self, tags: &[String]) -> Vec<String> {
        normalize_tags(tags.iter().flat_map(|t| t.split(',')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: &str = "2025-01-17.md";

    fn parse(raw: &str) -> Vec<JournalEntry> {
        TagsLineFormat.parse(raw, DAY)
    }

    #[test]
    fn test_two_entry_scenario() {
        let entries = parse("# A\ntags: x, y\nbody1\n\n# B\n\nbody2");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "A");
        assert_eq!(entries[0].tags, vec!["x", "y"]);
        assert_eq!(entries[0].body, "body1");
        assert_eq!(entries[0].entry_index, 0);
        assert_eq!(entries[0].day, DAY);

        assert_eq!(entries[1].title, "B");
        assert!(entries[1].tags.is_empty());
        assert_eq!(entries[1].body, "body2");
        assert_eq!(entries[1].entry_index, 1);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(parse("").is_empty());
        assert!(parse("   \n\n\t\n").is_empty());
    }

    #[test]
    fn test_text_without_headings_yields_nothing() {
        assert!(parse("just some notes\n## not a top heading\n#hashtag").is_empty());
        assert!(parse("tags: a, b\nbody").is_empty());
    }

    #[test]
    fn test_heading_without_body() {
        let entries = parse("# Lonely");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].body, "");
    }

    #[test]
    fn test_consecutive_headings() {
        let entries = parse("# One\n# Two\n# Three");
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.body.is_empty()));
        assert_eq!(entries[2].entry_index, 2);
    }

    #[test]
    fn test_internal_blank_lines_preserved() {
        let entries = parse("# A\n\n\nfirst\n\nsecond\n\n\n");
        assert_eq!(entries[0].body, "first\n\nsecond");
    }

    #[test]
    fn test_preamble_ignored() {
        let entries = parse("stray line\n\n# A\nbody");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].body, "body");
    }

    #[test]
    fn test_tags_are_deduplicated() {
        let entries = parse("# A\ntags: work, , home, work\nbody");
        assert_eq!(entries[0].tags, vec!["work", "home"]);
    }

    #[test]
    fn test_crlf_input() {
        let entries = parse("# A\r\ntags: x\r\nbody\r\n");
        assert_eq!(entries[0].title, "A");
        assert_eq!(entries[0].tags, vec!["x"]);
        assert_eq!(entries[0].body, "body");
    }

    #[test]
    fn test_serialize_layout() {
        let entries = parse("# A\ntags: x, y\nbody1\n\n# B\n\nbody2");
        let raw = TagsLineFormat.serialize(&entries);
        assert_eq!(raw, "# A\ntags: x, y\n\nbody1\n\n\n# B\nbody2");
    }

    #[test]
    fn test_serialize_follows_entry_index() {
        let mut entries = parse("# A\nfirst\n# B\nsecond");
        entries.reverse();
        let raw = TagsLineFormat.serialize(&entries);
        assert!(raw.starts_with("# A"));
    }

    #[test]
    fn test_serialize_empty_list() {
        assert_eq!(TagsLineFormat.serialize(&[]), "");
    }

    #[test]
    fn test_roundtrip_of_parsed_text() {
        let inputs = [
            "# A\ntags: x, y\nbody1\n\n# B\n\nbody2",
            "# One\n# Two\n\n\n# Three\ntags: t\n",
            "preamble\n# Morning\n\nline one\n\nline two\n\n# Evening\ntags: calm\n\nquiet",
        ];

        for input in inputs {
            let first = parse(input);
            let second = parse(&TagsLineFormat.serialize(&first));
            assert_eq!(first, second, "roundtrip failed for {:?}", input);
        }
    }

    #[test]
    fn test_roundtrip_of_built_entries() {
        let entries: Vec<JournalEntry> = [
            ("Standup", vec!["work", "team"], "Discussed the release.\n\nBlocked on review."),
            ("Run", vec!["health"], "5k in the rain"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (title, tags, body))| {
            let mut entry = JournalEntry::new(title, tags.into_iter().map(String::from).collect(), body);
            entry.entry_index = i;
            entry.day = DAY.to_string();
            entry
        })
        .collect();

        assert_eq!(parse(&TagsLineFormat.serialize(&entries)), entries);
    }

    #[test]
    fn test_removing_first_entry_leaves_no_separator() {
        let mut entries = parse("# A\ntags: x\nbody1\n\n# B\n\nbody2");
        entries.remove(0);
        let raw = TagsLineFormat.serialize(&entries);
        assert_eq!(raw, "# B\nbody2");
    }
}
