use markdown_autolist_config::{AutoListSettings, ListOrder};

use crate::autoformat::markers::ListKind;
use crate::editing::{BlockKey, BlockType, DocumentError, EditorState};

/// A marker classifier paired with the block type it converts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRule {
    pub kind: ListKind,
    pub target: BlockType,
}

impl ListRule {
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            target: kind.block_type(),
        }
    }

    fn applies_to(&self, marker: &str, current: &BlockType) -> bool {
        self.kind.matches(marker) && current != &self.target
    }
}

/// The rules tried against a block, in priority order. The first rule that
/// applies wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRules {
    rules: Vec<ListRule>,
}

impl ListRules {
    pub fn new(kinds: impl IntoIterator<Item = ListKind>) -> Self {
        Self {
            rules: kinds.into_iter().map(ListRule::new).collect(),
        }
    }

    pub fn from_settings(settings: &AutoListSettings) -> Self {
        let ordered = match settings.order {
            ListOrder::UnorderedFirst => [ListKind::Unordered, ListKind::Ordered],
            ListOrder::OrderedFirst => [ListKind::Ordered, ListKind::Unordered],
        };
        Self::new(ordered.into_iter().filter(|kind| match kind {
            ListKind::Unordered => settings.unordered,
            ListKind::Ordered => settings.ordered,
        }))
    }

    pub fn rules(&self) -> &[ListRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Try to turn the block `key` into a list item.
    ///
    /// `appended` is virtually added to the block text before looking for the
    /// marker: `" "` while the triggering space is still pending, `""` when it
    /// is already part of the document.
    ///
    /// Returns `None` when the scanned text has no space, when the text before
    /// the first space is not a marker, or when the block already has the
    /// matching list type.
    pub fn try_extract_list(
        &self,
        state: &EditorState,
        key: BlockKey,
        appended: &str,
    ) -> Option<EditorState> {
        let Some(block) = state.document().block(key) else {
            log::warn!("list extraction asked for unknown block {key}");
            return None;
        };

        let persisted = block.text();
        let scanned = format!("{persisted}{appended}");
        // A marker only counts once the space after it exists
        let space = scanned.find(' ')?;
        let marker = &scanned[..space];

        let rule = self
            .rules
            .iter()
            .find(|rule| rule.applies_to(marker, block.block_type()))?;

        match convert(state, key, marker.len(), &persisted, &rule.target) {
            Ok(next) => {
                log::debug!("converted block {key} to {} via {marker:?}", rule.target);
                Some(next)
            }
            Err(err) => {
                log::warn!("failed to convert block {key}: {err}");
                None
            }
        }
    }
}

impl Default for ListRules {
    fn default() -> Self {
        Self::new([ListKind::Unordered, ListKind::Ordered])
    }
}

/// Strip the marker (and its separating space when it is already in the
/// block), set the list type and map the old selection onto the new text.
fn convert(
    state: &EditorState,
    key: BlockKey,
    marker_len: usize,
    persisted: &str,
    target: &BlockType,
) -> Result<EditorState, DocumentError> {
    let removed_len = match persisted.as_bytes().get(marker_len) {
        Some(b' ') => marker_len + 1,
        _ => marker_len.min(persisted.len()),
    };
    let removed = 0..removed_len;
    let selection = state.selection().after_delete(key, &removed);

    state
        .replace_text(key, removed, "")?
        .toggle_block_type(key, target)?
        .force_selection(selection)
}
