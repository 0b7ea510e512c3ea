//! Prefix-based tag detection inside entry text

use super::heading_title;
use std::collections::BTreeSet;

/// Default tag prefixes
pub const DEFAULT_TAG_PREFIXES: &[&str] = &["#", "@"];

/// Find `#tag` / `@tag` style words in `text`.
///
/// Tags are lowercased with trailing punctuation stripped, sorted and unique.
/// Heading lines are skipped.
pub fn detect_tags<S: AsRef<str>>(text: &str, prefixes: &[S]) -> Vec<String> {
    let mut tags = BTreeSet::new();

    for line in text.lines().filter(|l| heading_title(l).is_none()) {
        for word in line.split_whitespace() {
            let Some(rest) = prefixes.iter().find_map(|p| {
                let p: &str = p.as_ref();
                if p.is_empty() {
                    None
                } else {
                    word.strip_prefix(p)
                }
            }) else {
                continue;
            };

            let tag = rest.trim_end_matches(['.', ',', ';', ':', '!', '?']);
            if tag.chars().any(char::is_alphanumeric) {
                tags.insert(tag.to_lowercase());
            }
        }
    }

    tags.into_iter().collect()
}

/// Append `detected` tags missing (case-insensitively) from `explicit`
pub fn merge_tags(explicit: &[String], detected: &[String]) -> Vec<String> {
    let mut merged = explicit.to_vec();
    for tag in detected {
        if !merged.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            merged.push(tag.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_both_prefixes() {
        let tags = detect_tags("Met @Sam about #Launch, then #launch again.", DEFAULT_TAG_PREFIXES);
        assert_eq!(tags, vec!["launch", "sam"]);
    }

    #[test]
    fn test_ignores_bare_prefixes_and_headings() {
        let tags = detect_tags("# Title #here\n# \n## sub #deep\n@ # #!", DEFAULT_TAG_PREFIXES);
        assert_eq!(tags, vec!["deep"]);
    }

    #[test]
    fn test_custom_prefixes() {
        let prefixes = vec!["+".to_string()];
        assert_eq!(detect_tags("+gym and #work", &prefixes), vec!["gym"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(detect_tags("", DEFAULT_TAG_PREFIXES).is_empty());
    }

    #[test]
    fn test_merge_tags() {
        let explicit = vec!["Work".to_string()];
        let detected = vec!["work".to_string(), "launch".to_string()];
        assert_eq!(merge_tags(&explicit, &detected), vec!["Work", "launch"]);
    }
}
