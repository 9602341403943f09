//! Numbered-list extraction over rendered page text.
//!
//! Articles list languages as `"<n>. <Language>"`. The printed numbers are
//! unreliable (several lists per page, counting down, gaps), so the rank is
//! the order in which matches occur.

use crate::models::RankedEntry;
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+\.\s([A-Za-z+#]+)").expect("numbered item pattern is valid"));

/// Extract `(match order, label)` pairs from `text`.
pub fn parse_numbered_list(text: &str) -> Vec<RankedEntry> {
    NUMBERED_ITEM
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .zip(1u32..)
        .map(|(label, rank)| RankedEntry::new(rank, label.as_str().trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_follow_match_order() {
        let text = "Intro text.\n5. Python is great\n3. C++ is fast\n9. C# on .NET\n";
        let entries = parse_numbered_list(text);
        assert_eq!(
            entries,
            vec![
                RankedEntry::new(1, "Python"),
                RankedEntry::new(2, "C++"),
                RankedEntry::new(3, "C#"),
            ]
        );
    }

    #[test]
    fn test_label_stops_at_first_non_name_character() {
        let entries = parse_numbered_list("1. Objective-C\n2. Go.\n");
        assert_eq!(
            entries,
            vec![RankedEntry::new(1, "Objective"), RankedEntry::new(2, "Go")]
        );
    }

    #[test]
    fn test_requires_whitespace_after_dot() {
        assert!(parse_numbered_list("version 1.2 and 3.Rust").is_empty());
    }

    #[test]
    fn test_only_ascii_digits_number_an_item() {
        let entries = parse_numbered_list("\u{0663}. Go\n\u{FF12}. Java\n7. Rust\n");
        assert_eq!(entries, vec![RankedEntry::new(1, "Rust")]);
    }

    #[test]
    fn test_no_matches() {
        assert!(parse_numbered_list("").is_empty());
        assert!(parse_numbered_list("Nothing numbered here").is_empty());
    }
}
