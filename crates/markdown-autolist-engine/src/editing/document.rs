use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use xi_rope::delta::Builder;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::editing::Point;

/// Stable identifier of a block that survives edits to its text and type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockKey(Uuid);

impl BlockKey {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Semantic type tag of a block.
///
/// Hosts may carry block types this crate knows nothing about (headings,
/// quotes, ...); those round-trip through [`BlockType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    Paragraph,
    UnorderedListItem,
    OrderedListItem,
    Other(String),
}

impl BlockType {
    pub const PARAGRAPH: &'static str = "paragraph";
    pub const UNORDERED_LIST_ITEM: &'static str = "unordered-list-item";
    pub const ORDERED_LIST_ITEM: &'static str = "ordered-list-item";

    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Paragraph => Self::PARAGRAPH,
            BlockType::UnorderedListItem => Self::UNORDERED_LIST_ITEM,
            BlockType::OrderedListItem => Self::ORDERED_LIST_ITEM,
            BlockType::Other(tag) => tag,
        }
    }

    /// Whether this is one of the two list item types.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            BlockType::UnorderedListItem | BlockType::OrderedListItem
        )
    }
}

impl From<&str> for BlockType {
    fn from(tag: &str) -> Self {
        match tag {
            // "unstyled" is the plain block tag used by Draft-style hosts
            Self::PARAGRAPH | "unstyled" => BlockType::Paragraph,
            Self::UNORDERED_LIST_ITEM => BlockType::UnorderedListItem,
            Self::ORDERED_LIST_ITEM => BlockType::OrderedListItem,
            other => BlockType::Other(other.to_string()),
        }
    }
}

impl From<String> for BlockType {
    fn from(tag: String) -> Self {
        BlockType::from(tag.as_str())
    }
}

impl From<BlockType> for String {
    fn from(block_type: BlockType) -> Self {
        block_type.as_str().to_string()
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("Unknown block: {0}")]
    UnknownBlock(BlockKey),
    #[error("Offset {offset} is out of bounds for block {key} of length {len}")]
    OffsetOutOfBounds {
        key: BlockKey,
        offset: usize,
        len: usize,
    },
    #[error("Offset {offset} in block {key} is not on a char boundary")]
    NotCharBoundary { key: BlockKey, offset: usize },
    #[error("Invalid range {start}..{end} in block {key}")]
    InvalidRange {
        key: BlockKey,
        start: usize,
        end: usize,
    },
    #[error("Block text cannot contain line breaks")]
    MultilineText,
    #[error("Block {start} does not come before block {end}")]
    BlocksOutOfOrder { start: BlockKey, end: BlockKey },
}

/// A single paragraph-equivalent unit of a document.
///
/// Text lives in an `xi_rope::Rope`, so cloning a block (and therefore a
/// whole document snapshot) shares the underlying text.
#[derive(Clone)]
pub struct Block {
    key: BlockKey,
    block_type: BlockType,
    text: Rope,
}

impl Block {
    pub fn new(block_type: BlockType, text: &str) -> Self {
        Self::with_key(BlockKey::new(), block_type, text)
    }

    pub fn with_key(key: BlockKey, block_type: BlockType, text: &str) -> Self {
        Self {
            key,
            block_type,
            text: Rope::from(text),
        }
    }

    pub fn paragraph(text: &str) -> Self {
        Self::new(BlockType::Paragraph, text)
    }

    pub fn key(&self) -> BlockKey {
        self.key
    }

    pub fn block_type(&self) -> &BlockType {
        &self.block_type
    }

    pub fn text(&self) -> String {
        self.text.to_string()
    }

    /// Length of the block text in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.len() == 0
    }

    /// Checks that `offset` is a valid caret position inside this block.
    pub fn check_offset(&self, offset: usize) -> Result<(), DocumentError> {
        let len = self.len();
        if offset > len {
            return Err(DocumentError::OffsetOutOfBounds {
                key: self.key,
                offset,
                len,
            });
        }
        if !self.text.is_codepoint_boundary(offset) {
            return Err(DocumentError::NotCharBoundary {
                key: self.key,
                offset,
            });
        }
        Ok(())
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), DocumentError> {
        if range.start > range.end {
            return Err(DocumentError::InvalidRange {
                key: self.key,
                start: range.start,
                end: range.end,
            });
        }
        self.check_offset(range.start)?;
        self.check_offset(range.end)
    }

    fn edit(&self, range: Range<usize>, text: &str) -> Self {
        let mut builder = Builder::new(self.text.len());
        builder.replace(range, Rope::from(text));
        let delta: Delta<RopeInfo> = builder.build();
        Self {
            key: self.key,
            block_type: self.block_type.clone(),
            text: delta.apply(&self.text),
        }
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.block_type == other.block_type
            && self.text.to_string() == other.text.to_string()
    }
}

impl Eq for Block {}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("key", &self.key)
            .field("block_type", &self.block_type)
            .field("text", &self.text())
            .finish()
    }
}

/// An ordered sequence of blocks.
///
/// Documents are values: every edit returns a new document and leaves the
/// receiver untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Create a document from blocks. An empty list yields a single empty
    /// paragraph, as there is always somewhere to put the caret.
    pub fn new(blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            return Self {
                blocks: vec![Block::paragraph("")],
            };
        }
        Self { blocks }
    }

    /// One paragraph per line of `text`.
    pub fn from_paragraphs(text: &str) -> Self {
        Self::new(split_lines(text).map(Block::paragraph).collect())
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block_keys(&self) -> Vec<BlockKey> {
        self.blocks.iter().map(Block::key).collect()
    }

    pub fn block(&self, key: BlockKey) -> Option<&Block> {
        self.blocks.iter().find(|b| b.key == key)
    }

    pub fn index_of(&self, key: BlockKey) -> Option<usize> {
        self.blocks.iter().position(|b| b.key == key)
    }

    pub fn first_block(&self) -> &Block {
        &self.blocks[0]
    }

    pub fn last_block(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    fn require(&self, key: BlockKey) -> Result<usize, DocumentError> {
        self.index_of(key).ok_or(DocumentError::UnknownBlock(key))
    }

    /// Replace a byte range of one block's text.
    pub fn replace_text(
        &self,
        key: BlockKey,
        range: Range<usize>,
        text: &str,
    ) -> Result<Document, DocumentError> {
        if text.contains('\n') {
            return Err(DocumentError::MultilineText);
        }
        let index = self.require(key)?;
        let block = &self.blocks[index];
        block.check_range(&range)?;

        let mut blocks = self.blocks.clone();
        blocks[index] = block.edit(range, text);
        Ok(Document { blocks })
    }

    /// Toggle a block's type: a block already of `block_type` becomes a
    /// paragraph, anything else becomes `block_type`.
    pub fn toggle_block_type(
        &self,
        key: BlockKey,
        block_type: &BlockType,
    ) -> Result<Document, DocumentError> {
        let index = self.require(key)?;
        let next = if &self.blocks[index].block_type == block_type {
            BlockType::Paragraph
        } else {
            block_type.clone()
        };

        let mut blocks = self.blocks.clone();
        blocks[index].block_type = next;
        Ok(Document { blocks })
    }

    /// Split a block at `at`. The tail becomes a new block of the same type
    /// directly after it; returns the start of the new block.
    pub fn split_block(&self, at: Point) -> Result<(Document, Point), DocumentError> {
        let index = self.require(at.key)?;
        let block = &self.blocks[index];
        block.check_offset(at.offset)?;

        let text = block.text();
        let (head, tail) = text.split_at(at.offset);
        let new_block = Block::new(block.block_type.clone(), tail);
        let new_key = new_block.key;

        let mut blocks = self.blocks.clone();
        blocks[index] = block.edit(0..text.len(), head);
        blocks.insert(index + 1, new_block);
        Ok((Document { blocks }, Point::new(new_key, 0)))
    }

    /// Insert possibly multi-line text at `at`. Every line break splits the
    /// block; returns the caret position after the inserted text.
    pub fn insert_text(&self, at: Point, text: &str) -> Result<(Document, Point), DocumentError> {
        let mut document = self.clone();
        let mut caret = at;
        for (i, line) in split_lines(text).enumerate() {
            if i > 0 {
                let (split, next) = document.split_block(caret)?;
                document = split;
                caret = next;
            }
            document = document.replace_text(caret.key, caret.offset..caret.offset, line)?;
            caret = Point::new(caret.key, caret.offset + line.len());
        }
        Ok((document, caret))
    }

    /// Delete everything between `start` and `end`, which may lie in
    /// different blocks. The start block keeps its key and type and absorbs
    /// the tail of the end block; blocks in between are removed.
    pub fn delete_range(&self, start: Point, end: Point) -> Result<Document, DocumentError> {
        let first = self.require(start.key)?;
        let last = self.require(end.key)?;
        if first == last {
            return self.replace_text(start.key, start.offset..end.offset, "");
        }
        if first > last {
            return Err(DocumentError::BlocksOutOfOrder {
                start: start.key,
                end: end.key,
            });
        }
        let head = &self.blocks[first];
        let tail = &self.blocks[last];
        head.check_offset(start.offset)?;
        tail.check_offset(end.offset)?;

        let rest = tail.text();
        let joined = head.edit(start.offset..head.len(), &rest[end.offset..]);

        let mut blocks = self.blocks.clone();
        blocks[first] = joined;
        blocks.drain(first + 1..=last);
        Ok(Document { blocks })
    }

    /// Append a block's text to the previous block and remove it.
    ///
    /// Returns `None` for the first block, which has nothing to merge into.
    pub fn merge_into_previous(
        &self,
        key: BlockKey,
    ) -> Result<Option<(Document, Point)>, DocumentError> {
        let index = self.require(key)?;
        if index == 0 {
            return Ok(None);
        }
        let previous = &self.blocks[index - 1];
        let join_at = previous.len();
        let merged = previous.edit(join_at..join_at, &self.blocks[index].text());

        let mut blocks = self.blocks.clone();
        blocks[index - 1] = merged;
        blocks.remove(index);
        Ok(Some((
            Document { blocks },
            Point::new(self.blocks[index - 1].key, join_at),
        )))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}
