use std::ops::Range;

use crate::editing::BlockKey;

/// A position inside a block: the block key and a byte offset into its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub key: BlockKey,
    pub offset: usize,
}

impl Point {
    pub fn new(key: BlockKey, offset: usize) -> Self {
        Self { key, offset }
    }

    /// Where this point ends up after `removed` is deleted from block `key`.
    ///
    /// Points inside the deleted range collapse to its start; points after it
    /// move left by its length. Points in other blocks are unaffected.
    pub fn after_delete(self, key: BlockKey, removed: &Range<usize>) -> Self {
        if self.key != key || self.offset <= removed.start {
            return self;
        }
        let offset = if self.offset >= removed.end {
            self.offset - removed.len()
        } else {
            removed.start
        };
        Self { offset, ..self }
    }
}

/// Anchor and focus of a selection. When both are equal it is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    pub fn caret(at: Point) -> Self {
        Self {
            anchor: at,
            focus: at,
        }
    }

    pub fn is_caret(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn after_delete(self, key: BlockKey, removed: &Range<usize>) -> Self {
        Self {
            anchor: self.anchor.after_delete(key, removed),
            focus: self.focus.after_delete(key, removed),
        }
    }
}
