pub mod blog;
pub mod content;
pub mod export;
pub mod generate;
pub mod history;
pub mod parsing;
pub mod storage;
pub mod validate;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use blog::{BlogPost, BlogRepository, BlogUpdate};
pub use content::{ParsedContent, convert, convert_at};
pub use export::Viewport;
pub use generate::{
    GenerateError, GenerationMode, Generator, LocalGenerator, RemoteGenerator, RemoteSettings,
};
pub use history::{
    GeneratedPage, PageFilter, PageHistory, PageStats, PageTag, PageUpdate, SortBy, SortOrder,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use validate::{ConvertError, MAX_INPUT_CHARS, validate};
