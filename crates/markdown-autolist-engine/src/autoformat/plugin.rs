use std::path::Path;

use markdown_autolist_config::{AutoListSettings, Config, ConfigError};

use crate::autoformat::extract::ListRules;
use crate::editing::{BlockType, EditorState};

/// Key command names that mean "delete the character before the caret".
pub const DELETE_BACKWARD_COMMANDS: [&str; 2] = ["backspace", "delete-backward"];

/// What the plugin needs from the editor it is plugged into.
///
/// Block lookup, text replacement, type toggling and forced selection are
/// operations on [`EditorState`] itself, so the host only supplies the
/// current snapshot, a way to commit a new one, and deferred scheduling.
pub trait Host {
    /// The current document and selection.
    fn editor_state(&self) -> EditorState;

    /// Replace the editor's state with `state`.
    fn commit(&mut self, state: EditorState);

    /// Run `task` through [`AutoList::run_follow_up`] once the current
    /// synchronous update, including the host's own handling of the event,
    /// has finished.
    fn defer(&mut self, task: FollowUp);
}

/// Work the plugin asks the host to run later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FollowUp {
    /// Convert list markers in every block after pasted text has landed.
    RescanAfterPaste,
}

/// Whether the plugin consumed an event. `NotHandled` lets the host apply its
/// default behaviour.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    Handled,
    NotHandled,
}

impl HandleResult {
    pub fn is_handled(self) -> bool {
        self == HandleResult::Handled
    }
}

/// Markdown-style list autoformatting.
///
/// Typing `- `, `* ` or `1. ` at the start of a block turns it into a list
/// item; backspace or return at the start of a list item turns it back into a
/// paragraph. Holds configuration only, never editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoList {
    rules: ListRules,
    revert_on_backspace: bool,
    revert_on_return: bool,
    commit_unchanged_paste: bool,
}

impl AutoList {
    pub fn new() -> Self {
        Self::from_settings(&AutoListSettings::default())
    }

    pub fn from_settings(settings: &AutoListSettings) -> Self {
        Self {
            rules: ListRules::from_settings(settings),
            revert_on_backspace: settings.revert_on_backspace,
            revert_on_return: settings.revert_on_return,
            commit_unchanged_paste: settings.commit_unchanged_paste,
        }
    }

    /// Build the plugin from a TOML config file; a missing file means
    /// default settings.
    pub fn from_config_file<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config = Config::load_from_path(config_path)?.unwrap_or_default();
        Ok(Self::from_settings(&config.autolist))
    }

    pub fn rules(&self) -> &ListRules {
        &self.rules
    }

    /// Called before the host inserts typed text.
    ///
    /// Only a single space can complete a marker. The space itself is not
    /// inserted when the block converts.
    pub fn on_before_character_insert<H: Host + ?Sized>(
        &self,
        chars: &str,
        host: &mut H,
    ) -> HandleResult {
        if chars != " " {
            return HandleResult::NotHandled;
        }

        let state = host.editor_state();
        let key = state.start().key;
        match self.rules.try_extract_list(&state, key, " ") {
            Some(next) => {
                host.commit(next);
                HandleResult::Handled
            }
            None => {
                log::trace!("space in block {key} did not complete a list marker");
                HandleResult::NotHandled
            }
        }
    }

    /// Called for named key commands. Only delete-backward is of interest.
    pub fn on_key_command<H: Host + ?Sized>(&self, command: &str, host: &mut H) -> HandleResult {
        if !self.revert_on_backspace || !DELETE_BACKWARD_COMMANDS.contains(&command) {
            return HandleResult::NotHandled;
        }
        self.remove_list(host)
    }

    pub fn on_return_pressed<H: Host + ?Sized>(&self, host: &mut H) -> HandleResult {
        if !self.revert_on_return {
            return HandleResult::NotHandled;
        }
        self.remove_list(host)
    }

    /// Called when text is pasted. The host has not inserted the text yet, so
    /// the scan is deferred until it has; the paste itself is never consumed.
    pub fn on_text_pasted<H: Host + ?Sized>(
        &self,
        text: &str,
        html: Option<&str>,
        host: &mut H,
    ) -> HandleResult {
        log::trace!(
            "deferring list rescan after paste of {} bytes (html: {})",
            text.len(),
            html.is_some()
        );
        if !self.rules.is_empty() {
            host.defer(FollowUp::RescanAfterPaste);
        }
        HandleResult::NotHandled
    }

    /// Run a task previously handed to [`Host::defer`].
    pub fn run_follow_up<H: Host + ?Sized>(&self, task: FollowUp, host: &mut H) {
        match task {
            FollowUp::RescanAfterPaste => {
                let (next, converted) = self.rescan(&host.editor_state());
                log::debug!("paste rescan converted {converted} block(s)");
                if converted > 0 || self.commit_unchanged_paste {
                    host.commit(next);
                }
            }
        }
    }

    /// Try every block in document order, threading the state through.
    /// Returns the final state and how many blocks converted.
    pub fn rescan(&self, state: &EditorState) -> (EditorState, usize) {
        state
            .document()
            .block_keys()
            .into_iter()
            .fold((state.clone(), 0), |(acc, converted), key| {
                match self.rules.try_extract_list(&acc, key, "") {
                    Some(next) => (next, converted + 1),
                    None => (acc, converted),
                }
            })
    }

    /// Turn the list item holding the caret back into a paragraph when the
    /// caret sits at its very start.
    fn remove_list<H: Host + ?Sized>(&self, host: &mut H) -> HandleResult {
        let state = host.editor_state();
        let start = state.start();
        let Some(block) = state.document().block(start.key) else {
            log::warn!("selection points at unknown block {}", start.key);
            return HandleResult::NotHandled;
        };
        if start.offset != 0 || !block.block_type().is_list() {
            return HandleResult::NotHandled;
        }

        let list_type: BlockType = block.block_type().clone();
        match state.toggle_block_type(start.key, &list_type) {
            Ok(next) => {
                log::debug!("reverted {list_type} block {} to paragraph", start.key);
                host.commit(next);
                HandleResult::Handled
            }
            Err(err) => {
                log::warn!("failed to revert block {}: {err}", start.key);
                HandleResult::NotHandled
            }
        }
    }
}

impl Default for AutoList {
    fn default() -> Self {
        Self::new()
    }
}
