use crate::editing::{Block, BlockType, Document, EditorState, Point, Selection};

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a state from `(block type, text)` pairs with the caret in block
/// `block_index` at `offset`.
pub fn state_with_caret(blocks: &[(&str, &str)], block_index: usize, offset: usize) -> EditorState {
    init_logging();
    let document = Document::new(
        blocks
            .iter()
            .map(|(block_type, text)| Block::new(BlockType::from(*block_type), text))
            .collect(),
    );
    let key = document.blocks()[block_index].key();
    EditorState::new(document, Selection::caret(Point::new(key, offset)))
        .expect("test caret must lie inside the document")
}

/// Assert the `(block type, text)` of every block in order.
pub fn assert_blocks(state: &EditorState, expected: &[(&str, &str)]) {
    let actual: Vec<(String, String)> = state
        .document()
        .blocks()
        .iter()
        .map(|b| (b.block_type().to_string(), b.text()))
        .collect();
    let expected: Vec<(String, String)> = expected
        .iter()
        .map(|(block_type, text)| (block_type.to_string(), text.to_string()))
        .collect();
    pretty_assertions::assert_eq!(actual, expected);
}
