use std::collections::VecDeque;

use crate::autoformat::{AutoList, FollowUp, HandleResult, Host};
use crate::editing::{DocumentError, EditorState, Point};

/// An in-memory editor that drives an [`AutoList`] the way a real host would.
///
/// Each input method first offers the event to the plugin and falls back to
/// plain editing when it is not handled. Deferred follow-ups queue up until
/// [`MemoryHost::run_pending`], so they always see the finished paste.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    state: EditorState,
    pending: VecDeque<FollowUp>,
    commits: usize,
}

impl MemoryHost {
    pub fn new(state: EditorState) -> Self {
        Self {
            state,
            pending: VecDeque::new(),
            commits: 0,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Number of states committed by the plugin.
    pub fn commits(&self) -> usize {
        self.commits
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Type `text` one character at a time.
    pub fn type_text(&mut self, plugin: &AutoList, text: &str) -> Result<(), DocumentError> {
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            let chars: &str = ch.encode_utf8(&mut buf);
            if plugin.on_before_character_insert(chars, self) == HandleResult::NotHandled {
                self.insert_at_caret(chars)?;
            }
        }
        Ok(())
    }

    pub fn press_backspace(&mut self, plugin: &AutoList) -> Result<HandleResult, DocumentError> {
        let result = plugin.on_key_command("backspace", self);
        if result == HandleResult::NotHandled {
            self.delete_backward()?;
        }
        Ok(result)
    }

    pub fn press_return(&mut self, plugin: &AutoList) -> Result<HandleResult, DocumentError> {
        let result = plugin.on_return_pressed(self);
        if result == HandleResult::NotHandled {
            let (document, caret) = self.state.document().split_block(self.state.start())?;
            self.state = self.state.with_document(document, caret)?;
        }
        Ok(result)
    }

    /// Paste `text` at the caret. The plugin's rescan stays queued until
    /// [`MemoryHost::run_pending`].
    pub fn paste(&mut self, plugin: &AutoList, text: &str) -> Result<HandleResult, DocumentError> {
        let result = plugin.on_text_pasted(text, None, self);
        if result == HandleResult::NotHandled {
            self.insert_at_caret(text)?;
        }
        Ok(result)
    }

    /// Run every deferred follow-up in the order it was queued.
    pub fn run_pending(&mut self, plugin: &AutoList) {
        while let Some(task) = self.pending.pop_front() {
            plugin.run_follow_up(task, self);
        }
    }

    /// Remove the selected range, leaving a caret at its start. Returns
    /// false when the selection was already a caret.
    fn delete_selection(&mut self) -> Result<bool, DocumentError> {
        if self.state.selection().is_caret() {
            return Ok(false);
        }
        let start = self.state.start();
        let document = self.state.document().delete_range(start, self.state.end())?;
        self.state = self.state.with_document(document, start)?;
        Ok(true)
    }

    fn insert_at_caret(&mut self, text: &str) -> Result<(), DocumentError> {
        self.delete_selection()?;
        let (document, caret) = self.state.document().insert_text(self.state.start(), text)?;
        self.state = self.state.with_document(document, caret)?;
        Ok(())
    }

    fn delete_backward(&mut self) -> Result<(), DocumentError> {
        if self.delete_selection()? {
            return Ok(());
        }
        let Point { key, offset } = self.state.start();
        if offset == 0 {
            if let Some((document, caret)) = self.state.document().merge_into_previous(key)? {
                self.state = self.state.with_document(document, caret)?;
            }
            return Ok(());
        }

        let text = self
            .state
            .document()
            .block(key)
            .ok_or(DocumentError::UnknownBlock(key))?
            .text();
        let width = text[..offset].chars().next_back().map_or(0, char::len_utf8);
        self.state = self.state.replace_text(key, offset - width..offset, "")?;
        Ok(())
    }
}

impl Host for MemoryHost {
    fn editor_state(&self) -> EditorState {
        self.state.clone()
    }

    fn commit(&mut self, state: EditorState) {
        self.state = state;
        self.commits += 1;
    }

    fn defer(&mut self, task: FollowUp) {
        self.pending.push_back(task);
    }
}
