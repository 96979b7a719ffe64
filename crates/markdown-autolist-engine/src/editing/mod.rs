/*!
 * # Editing Model
 *
 * The value types a host editor exchanges with the autoformatter.
 *
 * - **`document`**: `Document` as an ordered list of `Block`s, each with a
 *   stable `BlockKey`, a `BlockType` tag and rope-backed text
 * - **`selection`**: `Point` and `Selection` (anchor/focus pairs)
 * - **`state`**: `EditorState`, the snapshot handed to and committed by the host
 *
 * Every edit returns a new value. Nothing here is mutated in place, so a
 * snapshot taken before an edit stays valid after it.
 *
 * Offsets are UTF-8 byte offsets into a block's text and must lie on char
 * boundaries.
 */

pub mod document;
pub mod selection;
pub mod state;

pub use document::{Block, BlockKey, BlockType, Document, DocumentError};
pub use selection::{Point, Selection};
pub use state::EditorState;
