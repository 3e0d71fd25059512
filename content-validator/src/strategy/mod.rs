//! Content source strategies.
//!
//! Only the filesystem strategy exists; `validate_fs()` and `load_fs()` use it
//! directly.

pub mod fs;

/// Content format for dispatching to the correct record extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    /// `.md` / `.mdx` with YAML front matter.
    Markdown,
    /// `.json` data entry.
    Json,
    /// `.yaml` / `.yml` data entry.
    Yaml,
}
