pub mod autoformat;
pub mod editing;
pub mod host;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use autoformat::*;
pub use editing::*;
pub use host::MemoryHost;
pub use markdown_autolist_config::{AutoListSettings, Config, ConfigError, ListOrder};
