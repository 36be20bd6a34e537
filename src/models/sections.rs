//! Splitting plain article text into titled sections.
//!
//! Plain-text article extracts mark section headers as `== Title ==`. The text
//! before the first header is the lead and is stored under [`LEAD_SECTION_TITLE`].
//! Deeper headers (`=== Sub ===`) are not parsed separately; they leave stray
//! `=` characters at section edges which [`SectionMap::display_body`] strips.

use serde::{Deserialize, Serialize};

/// Key under which the lead (text before the first header) is stored.
pub const LEAD_SECTION_TITLE: &str = "Аннотация";

/// Marker opening a section header.
pub const HEADER_OPEN: &str = "== ";

/// Marker closing a section header.
pub const HEADER_CLOSE: &str = " ==";

/// Ordered mapping from section title to section body.
///
/// Titles are unique. Inserting a title that already exists replaces its body
/// but keeps the position of the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMap {
    entries: Vec<(String, String)>,
}

impl SectionMap {
    /// Split raw article text into sections. Never fails; the result always
    /// holds at least the lead entry.
    ///
    /// The search for the next opening marker resumes after the closing marker
    /// of the current header, so inline headers such as `a == B == c` split
    /// into `B -> " c"`.
    pub fn split(raw: &str) -> Self {
        let mut map = Self::default();

        let Some((lead, mut rest)) = raw.split_once(HEADER_OPEN) else {
            map.insert(LEAD_SECTION_TITLE, raw);
            return map;
        };
        map.insert(LEAD_SECTION_TITLE, lead);

        loop {
            let Some((title, after)) = rest.split_once(HEADER_CLOSE) else {
                map.insert(rest, "");
                break;
            };
            match after.split_once(HEADER_OPEN) {
                Some((body, next)) => {
                    map.insert(title, body);
                    rest = next;
                }
                None => {
                    map.insert(title, after);
                    break;
                }
            }
        }

        map
    }

    /// Insert or overwrite a section.
    pub fn insert(&mut self, title: impl Into<String>, body: impl Into<String>) {
        let title = title.into();
        let body = body.into();
        match self.entries.iter_mut().find(|(t, _)| *t == title) {
            Some(entry) => entry.1 = body,
            None => self.entries.push((title, body)),
        }
    }

    /// Body for a title, as stored.
    pub fn get(&self, title: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, b)| b.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Section titles in order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    /// Section at a 1-based position.
    pub fn section(&self, position: usize) -> Option<(&str, &str)> {
        position
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .map(|(t, b)| (t.as_str(), b.as_str()))
    }

    /// Body at a 1-based position with leftover `=` markers trimmed from both ends.
    pub fn display_body(&self, position: usize) -> Option<&str> {
        self.section(position).map(|(_, body)| body.trim_matches('='))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_without_headers_is_all_lead() {
        let text = "Just a lead paragraph, no headers at all.";
        let map = SectionMap::split(text);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(LEAD_SECTION_TITLE), Some(text));
    }

    #[test]
    fn test_empty_text() {
        let map = SectionMap::split("");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(LEAD_SECTION_TITLE), Some(""));
    }

    #[test]
    fn test_basic_split() {
        let map =
            SectionMap::split("Intro text. == Behavior == Cats sleep a lot. == Diet == Cats eat meat.");
        let titles: Vec<_> = map.titles().collect();
        assert_eq!(titles, vec![LEAD_SECTION_TITLE, "Behavior", "Diet"]);
        assert_eq!(map.get(LEAD_SECTION_TITLE), Some("Intro text. "));
        assert_eq!(map.get("Behavior"), Some(" Cats sleep a lot. "));
        assert_eq!(map.get("Diet"), Some(" Cats eat meat."));
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let map = SectionMap::split("lead == A == body1 == A == body2");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("A"), Some(" body2"));
        assert_eq!(map.section(2).map(|(t, _)| t), Some("A"));
    }

    #[test]
    fn test_entry_count_bounded_by_header_markers() {
        let samples = [
            "",
            "plain",
            "a == B == c",
            "a == B == c == D == e == B == f",
            "x\n== One ==\n1\n=== Sub ===\n2\n== Two ==\n3",
            "== Only ==",
        ];
        for text in samples {
            let k = text.matches(HEADER_OPEN).count();
            let map = SectionMap::split(text);
            assert!(map.len() <= k + 1, "{text:?} gave {} entries", map.len());
            assert!(map.get(LEAD_SECTION_TITLE).is_some());
        }
    }

    #[test]
    fn test_nested_headers_leave_markers_for_display() {
        let text = "Lead\n== History ==\nEarly days.\n=== Origins ===\nLong ago.\n";
        let map = SectionMap::split(text);

        assert_eq!(map.get("History"), Some("\nEarly days.\n="));
        assert_eq!(map.display_body(2), Some("\nEarly days.\n"));

        assert_eq!(map.get("Origins"), Some("=\nLong ago.\n"));
        assert_eq!(map.display_body(3), Some("\nLong ago.\n"));
    }

    #[test]
    fn test_header_without_closing_marker() {
        let map = SectionMap::split("lead == dangling");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("dangling"), Some(""));
    }

    #[test]
    fn test_section_positions() {
        let map = SectionMap::split("a == B == c");
        assert_eq!(map.section(0), None);
        assert_eq!(map.section(1), Some((LEAD_SECTION_TITLE, "a ")));
        assert_eq!(map.section(2), Some(("B", " c")));
        assert_eq!(map.section(3), None);
    }
}
