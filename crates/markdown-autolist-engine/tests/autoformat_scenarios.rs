use markdown_autolist_engine::{
    AutoList, AutoListSettings, Block, BlockType, Document, EditorState, HandleResult, ListOrder,
    MemoryHost, Point, Selection,
};
use pretty_assertions::assert_eq;

fn host_with(blocks: &[(&str, &str)], block_index: usize, offset: usize) -> MemoryHost {
    let _ = env_logger::builder().is_test(true).try_init();
    let document = Document::new(
        blocks
            .iter()
            .map(|(block_type, text)| Block::new(BlockType::from(*block_type), text))
            .collect(),
    );
    let key = document.blocks()[block_index].key();
    let state = EditorState::new(document, Selection::caret(Point::new(key, offset))).unwrap();
    MemoryHost::new(state)
}

fn summary(state: &EditorState) -> Vec<(String, String)> {
    state
        .document()
        .blocks()
        .iter()
        .map(|b| (b.block_type().to_string(), b.text()))
        .collect()
}

fn single(block_type: &str, text: &str) -> Vec<(String, String)> {
    vec![(block_type.to_string(), text.to_string())]
}

#[test]
fn space_after_dash_makes_unordered_item() {
    let mut host = host_with(&[("paragraph", "-")], 0, 1);
    let key = host.state().document().first_block().key();

    host.type_text(&AutoList::new(), " ").unwrap();

    assert_eq!(summary(host.state()), single("unordered-list-item", ""));
    assert_eq!(host.state().selection(), Selection::caret(Point::new(key, 0)));
    assert_eq!(host.commits(), 1);
}

#[test]
fn space_after_number_makes_ordered_item() {
    let mut host = host_with(&[("paragraph", "12.")], 0, 3);

    host.type_text(&AutoList::new(), " ").unwrap();

    assert_eq!(summary(host.state()), single("ordered-list-item", ""));
}

#[test]
fn space_after_plain_word_is_inserted() {
    let mut host = host_with(&[("paragraph", "hello")], 0, 5);

    host.type_text(&AutoList::new(), " ").unwrap();

    assert_eq!(summary(host.state()), single("paragraph", "hello "));
    assert_eq!(host.commits(), 0);
}

#[test]
fn backspace_at_start_of_empty_item_reverts_to_paragraph() {
    let mut host = host_with(&[("unordered-list-item", "")], 0, 0);

    let result = host.press_backspace(&AutoList::new()).unwrap();

    assert_eq!(result, HandleResult::Handled);
    assert_eq!(summary(host.state()), single("paragraph", ""));
}

#[test]
fn backspace_mid_item_deletes_character() {
    let mut host = host_with(&[("unordered-list-item", "item")], 0, 2);

    let result = host.press_backspace(&AutoList::new()).unwrap();

    assert_eq!(result, HandleResult::NotHandled);
    assert_eq!(summary(host.state()), single("unordered-list-item", "iem"));
}

#[test]
fn marker_conversion_then_backspace_restores_type_only() {
    let plugin = AutoList::new();
    let mut host = host_with(&[("paragraph", "")], 0, 0);

    host.type_text(&plugin, "- ").unwrap();
    assert_eq!(summary(host.state()), single("unordered-list-item", ""));

    assert!(host.press_backspace(&plugin).unwrap().is_handled());
    assert_eq!(summary(host.state()), single("paragraph", ""));
}

#[test]
fn typing_twice_never_double_converts() {
    let plugin = AutoList::new();
    let mut host = host_with(&[("paragraph", "")], 0, 0);

    host.type_text(&plugin, "- - x").unwrap();

    assert_eq!(summary(host.state()), single("unordered-list-item", "- x"));
    assert_eq!(host.commits(), 1);
}

#[test]
fn return_on_empty_item_leaves_list() {
    let plugin = AutoList::new();
    let mut host = host_with(&[("paragraph", "")], 0, 0);

    host.type_text(&plugin, "1. first").unwrap();
    assert_eq!(host.press_return(&plugin).unwrap(), HandleResult::NotHandled);
    assert_eq!(host.press_return(&plugin).unwrap(), HandleResult::Handled);

    insta::assert_debug_snapshot!(summary(host.state()), @r#"
    [
        (
            "ordered-list-item",
            "first",
        ),
        (
            "paragraph",
            "",
        ),
    ]
    "#);
}

#[test]
fn pasted_lines_convert_after_deferred_pass() {
    let plugin = AutoList::new();
    let mut host = host_with(&[("paragraph", "")], 0, 0);

    let result = host.paste(&plugin, "- one\n1. two").unwrap();
    assert_eq!(result, HandleResult::NotHandled);
    assert_eq!(host.commits(), 0);

    host.run_pending(&plugin);

    insta::assert_debug_snapshot!(summary(host.state()), @r#"
    [
        (
            "unordered-list-item",
            "one",
        ),
        (
            "ordered-list-item",
            "two",
        ),
    ]
    "#);
    assert_eq!(host.commits(), 1);
}

#[test]
fn paste_rescan_covers_existing_blocks_too() {
    let plugin = AutoList::new();
    let mut host = host_with(&[("paragraph", "* earlier"), ("paragraph", "")], 1, 0);

    host.paste(&plugin, "plain\n42. answer").unwrap();
    host.run_pending(&plugin);

    insta::assert_debug_snapshot!(summary(host.state()), @r#"
    [
        (
            "unordered-list-item",
            "earlier",
        ),
        (
            "paragraph",
            "plain",
        ),
        (
            "ordered-list-item",
            "answer",
        ),
    ]
    "#);
}

#[test]
fn paste_rescan_leaves_bare_markers_in_other_blocks() {
    let plugin = AutoList::new();
    let mut host = host_with(
        &[("paragraph", "2021."), ("paragraph", "-"), ("paragraph", "")],
        2,
        0,
    );
    let keys = host.state().document().block_keys();

    host.paste(&plugin, "hello").unwrap();
    host.run_pending(&plugin);

    assert_eq!(
        summary(host.state()),
        vec![
            ("paragraph".to_string(), "2021.".to_string()),
            ("paragraph".to_string(), "-".to_string()),
            ("paragraph".to_string(), "hello".to_string()),
        ]
    );
    assert_eq!(host.state().document().block_keys(), keys);
    assert_eq!(host.state().selection(), Selection::caret(Point::new(keys[2], 5)));
}

#[test]
fn settings_disable_unordered_lists() {
    let plugin = AutoList::from_settings(&AutoListSettings {
        unordered: false,
        order: ListOrder::OrderedFirst,
        ..AutoListSettings::default()
    });
    let mut host = host_with(&[("paragraph", "")], 0, 0);

    host.type_text(&plugin, "- a").unwrap();
    assert_eq!(summary(host.state()), single("paragraph", "- a"));

    let mut host = host_with(&[("paragraph", "")], 0, 0);
    host.type_text(&plugin, "7. a").unwrap();
    assert_eq!(summary(host.state()), single("ordered-list-item", "a"));
}

#[test]
fn multibyte_text_keeps_caret_on_char_boundary() {
    let plugin = AutoList::new();
    let mut host = host_with(&[("paragraph", "")], 0, 0);

    host.type_text(&plugin, "* café au lait").unwrap();

    assert_eq!(summary(host.state()), single("unordered-list-item", "café au lait"));
    let caret = host.state().selection().focus;
    assert_eq!(caret.offset, "café au lait".len());
}
