use std::sync::OnceLock;

use regex::Regex;

use crate::editing::BlockType;

/// Unordered list markers, each of which must make up the whole marker text.
pub const UNORDERED_MARKERS: [&str; 2] = ["-", "*"];

/// The kind of list a marker introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    /// Whether `text` is exactly a marker of this kind.
    pub fn matches(self, text: &str) -> bool {
        match self {
            ListKind::Unordered => is_unordered_marker(text),
            ListKind::Ordered => is_ordered_marker(text),
        }
    }

    /// The block type a block takes on once converted to this kind.
    pub fn block_type(self) -> BlockType {
        match self {
            ListKind::Unordered => BlockType::UnorderedListItem,
            ListKind::Ordered => BlockType::OrderedListItem,
        }
    }
}

/// `-` or `*`, with nothing else around it.
pub fn is_unordered_marker(text: &str) -> bool {
    UNORDERED_MARKERS.contains(&text)
}

/// One or more ASCII digits followed by a single period, e.g. `1.` or `42.`.
pub fn is_ordered_marker(text: &str) -> bool {
    static ORDERED_MARKER: OnceLock<Regex> = OnceLock::new();
    let re = ORDERED_MARKER
        .get_or_init(|| Regex::new(r"^[0-9]+\.$").expect("Invalid ordered marker regex"));
    re.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("-", true)]
    #[case("*", true)]
    #[case("", false)]
    #[case("+", false)]
    #[case("--", false)]
    #[case("-*", false)]
    #[case(" -", false)]
    #[case("- ", false)]
    #[case("1.", false)]
    fn unordered_marker(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_unordered_marker(text), expected);
    }

    #[rstest]
    #[case("1.", true)]
    #[case("42.", true)]
    #[case("007.", true)]
    #[case("", false)]
    #[case(".", false)]
    #[case("1", false)]
    #[case("1..", false)]
    #[case("1)", false)]
    #[case("a1.", false)]
    #[case("1.a", false)]
    #[case(" 1.", false)]
    #[case("1. ", false)]
    #[case("1.\n", false)]
    #[case("١.", false)]
    #[case("-", false)]
    fn ordered_marker(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_ordered_marker(text), expected);
    }

    #[test]
    fn marker_shapes_never_overlap() {
        for text in ["-", "*", "1.", "12.", "x", ""] {
            assert!(!(is_unordered_marker(text) && is_ordered_marker(text)));
        }
    }

    #[test]
    fn kinds_map_to_list_block_types() {
        assert!(ListKind::Unordered.matches("*"));
        assert!(ListKind::Ordered.matches("3."));
        assert_eq!(ListKind::Unordered.block_type(), BlockType::UnorderedListItem);
        assert_eq!(ListKind::Ordered.block_type(), BlockType::OrderedListItem);
    }
}
