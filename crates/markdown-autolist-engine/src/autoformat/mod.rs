//! # List Autoformatting
//!
//! - **`markers`**: pure predicates recognising `-`/`*` and `1.` style markers
//! - **`extract`**: ordered (classifier, block type) rules and the block
//!   rewrite that strips a marker and sets the list type
//! - **`plugin`**: the event adapter a host editor calls into

pub mod extract;
pub mod markers;
pub mod plugin;

pub use extract::{ListRule, ListRules};
pub use markers::{ListKind, is_ordered_marker, is_unordered_marker};
pub use plugin::{AutoList, FollowUp, HandleResult, Host};
