use std::ops::Range;

use crate::editing::{BlockKey, BlockType, Document, DocumentError, Point, Selection};

/// Immutable snapshot exchanged with the host: a document and a selection.
///
/// Every operation returns a new state; the receiver is never mutated, so a
/// host can keep old snapshots around for its own undo stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    document: Document,
    selection: Selection,
}

impl EditorState {
    /// Create a state, validating that the selection lies inside `document`.
    pub fn new(document: Document, selection: Selection) -> Result<Self, DocumentError> {
        check_point(&document, selection.anchor)?;
        check_point(&document, selection.focus)?;
        Ok(Self {
            document,
            selection,
        })
    }

    /// A state with the caret at the end of the last block.
    pub fn with_caret_at_end(document: Document) -> Self {
        let last = document.last_block();
        let caret = Point::new(last.key(), last.len());
        Self {
            selection: Selection::caret(caret),
            document,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The earlier of anchor and focus in document order.
    pub fn start(&self) -> Point {
        let (start, _) = self.ordered();
        start
    }

    /// The later point of the selection in document order.
    pub fn end(&self) -> Point {
        let (_, end) = self.ordered();
        end
    }

    fn ordered(&self) -> (Point, Point) {
        let Selection { anchor, focus } = self.selection;
        let order = |p: Point| (self.document.index_of(p.key), p.offset);
        if order(focus) < order(anchor) {
            (focus, anchor)
        } else {
            (anchor, focus)
        }
    }

    pub fn replace_text(
        &self,
        key: BlockKey,
        range: Range<usize>,
        text: &str,
    ) -> Result<Self, DocumentError> {
        let document = self.document.replace_text(key, range.clone(), text)?;
        let caret = Point::new(key, range.start + text.len());
        Ok(Self {
            document,
            selection: Selection::caret(caret),
        })
    }

    pub fn toggle_block_type(
        &self,
        key: BlockKey,
        block_type: &BlockType,
    ) -> Result<Self, DocumentError> {
        Ok(Self {
            document: self.document.toggle_block_type(key, block_type)?,
            selection: self.selection,
        })
    }

    /// Replace the selection, keeping the document.
    pub fn force_selection(&self, selection: Selection) -> Result<Self, DocumentError> {
        Self::new(self.document.clone(), selection)
    }

    /// Swap in a new document and caret, e.g. after a host-side edit.
    pub fn with_document(&self, document: Document, caret: Point) -> Result<Self, DocumentError> {
        Self::new(document, Selection::caret(caret))
    }
}

fn check_point(document: &Document, point: Point) -> Result<(), DocumentError> {
    document
        .block(point.key)
        .ok_or(DocumentError::UnknownBlock(point.key))?
        .check_offset(point.offset)
}
