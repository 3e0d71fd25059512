//! Filesystem content source.
//!
//! Discovers content files under content roots and reads them safely.
//! Properties enforced here:
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Resolved paths are checked to remain within the content root
//! - Device files, pipes, and sockets are skipped
//! - Maximum directory depth is enforced to prevent infinite recursion
//! - Bounded streaming reads prevent TOCTOU and memory `DoS`

use std::io::Read;
use std::path::{Component, Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::config::ContentSourceConfig;
use crate::error::{ScanError, ScanErrorKind};
use crate::strategy::ContentFormat;

/// Directories to skip
pub const SKIP_DIRS: &[&str] = &["node_modules", ".git", "target", "dist", ".astro"];

/// Files whose name starts with this prefix are never treated as entries
/// (`_placeholder.md`, `_draft.md`, ...).
pub const IGNORED_FILE_PREFIX: char = '_';

/// Result of attempting to read a file for scanning.
pub enum ScanResult {
    /// File was read successfully; contains the UTF-8 content.
    Ok(String),
    /// File could not be read or validated; contains the scan error.
    Err(ScanError),
}

/// A discovered content file and the root it was found under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFile {
    /// Path as discovered (root-relative paths stay relative).
    pub path: PathBuf,
    /// The configured root this file was found under.
    pub root: PathBuf,
    /// Final component of the canonical root, or its parent when the root is a file.
    pub root_name: String,
}

/// Where an entry sits: its collection directory and its path inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLocation {
    pub collection: String,
    pub relative: PathBuf,
}

/// Check if a path matches any of the exclude patterns
fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// Returns `true` if the entry should be **included** (i.e., is NOT a skip dir).
fn is_not_skip_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.file_type().is_dir()
        && let Some(name) = entry.file_name().to_str()
    {
        return !SKIP_DIRS.contains(&name);
    }
    true
}

fn is_ignored_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(IGNORED_FILE_PREFIX))
}

fn root_name(canonical_root: &Path) -> String {
    let dir = if canonical_root.is_file() {
        canonical_root.parent().unwrap_or(canonical_root)
    } else {
        canonical_root
    };
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Find all content files under the configured paths.
///
/// Returns `(files, scan_errors)`:
/// - `files`: paths that passed all filters and are ready to read.
/// - `scan_errors`: walk errors (permission denied, loop, etc.) and boundary violations.
pub fn find_files(config: &ContentSourceConfig) -> (Vec<ContentFile>, Vec<ScanError>) {
    let mut files = Vec::new();
    let mut scan_errors = Vec::new();

    let mut exclude_patterns = Vec::with_capacity(config.exclude.len());
    for pat_str in &config.exclude {
        match Pattern::new(pat_str) {
            Ok(pat) => exclude_patterns.push(pat),
            Err(e) => scan_errors.push(ScanError::new(
                pat_str,
                ScanErrorKind::InvalidExcludePattern,
                format!("Invalid exclude glob pattern '{pat_str}': {e}"),
            )),
        }
    }

    for root in &config.paths {
        let canonical_root = match root.canonicalize() {
            Ok(r) => r,
            Err(e) => {
                scan_errors.push(ScanError::new(
                    root.clone(),
                    ScanErrorKind::IoError,
                    format!("Failed to canonicalize root path: {e}"),
                ));
                continue;
            }
        };
        let name = root_name(&canonical_root);

        if root.is_file() {
            if content_format_for(root).is_some()
                && !is_ignored_file(root)
                && !matches_exclude(root, &exclude_patterns)
            {
                files.push(ContentFile {
                    path: root.clone(),
                    root: root.clone(),
                    root_name: name,
                });
            }
            continue;
        }

        if !root.is_dir() {
            continue;
        }

        for entry_result in WalkDir::new(root)
            .follow_links(config.follow_links)
            .max_depth(config.max_depth)
            .into_iter()
            .filter_entry(is_not_skip_dir)
        {
            let entry = match entry_result {
                Ok(e) => e,
                Err(walk_err) => {
                    let path = walk_err
                        .path()
                        .map_or_else(|| root.clone(), Path::to_path_buf);
                    scan_errors.push(ScanError::new(
                        path,
                        ScanErrorKind::WalkError,
                        format!("Directory traversal error: {walk_err}"),
                    ));
                    continue;
                }
            };

            let file_path = entry.path();
            if !file_path.is_file()
                || content_format_for(file_path).is_none()
                || is_ignored_file(file_path)
                || matches_exclude(file_path, &exclude_patterns)
            {
                continue;
            }

            // Catches symlink escapes even when follow_links is true.
            match file_path.canonicalize() {
                Ok(canonical_path) if !canonical_path.starts_with(&canonical_root) => {
                    scan_errors.push(ScanError::new(
                        file_path,
                        ScanErrorKind::OutsideRepository,
                        format!(
                            "Path resolves outside content root: {} -> {}",
                            file_path.display(),
                            canonical_path.display()
                        ),
                    ));
                    continue;
                }
                Ok(_) => {}
                Err(e) => {
                    scan_errors.push(ScanError::new(
                        file_path,
                        ScanErrorKind::IoError,
                        format!("Failed to canonicalize path: {e}"),
                    ));
                    continue;
                }
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::FileTypeExt;
                if let Ok(ft) = entry.metadata().map(|m| m.file_type())
                    && (ft.is_block_device()
                        || ft.is_char_device()
                        || ft.is_fifo()
                        || ft.is_socket())
                {
                    continue;
                }
            }

            files.push(ContentFile {
                path: file_path.to_path_buf(),
                root: root.clone(),
                root_name: name.clone(),
            });
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files.dedup_by(|a, b| a.path == b.path);
    (files, scan_errors)
}

/// Resolve the collection directory of a discovered file.
///
/// A root that is itself a collection directory (`is_collection(root_name)`)
/// owns every file beneath it. Otherwise the root is a content root and the
/// first directory below it names the collection. Files sitting directly in
/// a content root are attributed to the root's own name.
pub fn locate_entry(file: &ContentFile, is_collection: impl Fn(&str) -> bool) -> EntryLocation {
    let relative = file
        .path
        .strip_prefix(&file.root)
        .ok()
        .filter(|rel| !rel.as_os_str().is_empty())
        .map_or_else(
            || PathBuf::from(file.path.file_name().unwrap_or_default()),
            Path::to_path_buf,
        );

    if file.root.is_file() || is_collection(&file.root_name) {
        return EntryLocation {
            collection: file.root_name.clone(),
            relative,
        };
    }

    let mut components = relative.components();
    if let Some(Component::Normal(first)) = components.next() {
        let rest = components.as_path();
        if !rest.as_os_str().is_empty() {
            return EntryLocation {
                collection: first.to_string_lossy().into_owned(),
                relative: rest.to_path_buf(),
            };
        }
    }

    EntryLocation {
        collection: file.root_name.clone(),
        relative,
    }
}

/// Determine the content format from a file extension.
pub fn content_format_for(path: &Path) -> Option<ContentFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("md" | "mdx") => Some(ContentFormat::Markdown),
        Some("json") => Some(ContentFormat::Json),
        Some("yaml" | "yml") => Some(ContentFormat::Yaml),
        _ => None,
    }
}

/// Read a file using a bounded streaming read, enforcing `max_file_size`.
///
/// Returns `ScanResult::Err` if the file exceeds `max_file_size`, an I/O
/// error occurs, or the content is not valid UTF-8.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> ScanResult {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            return ScanResult::Err(ScanError::new(
                path,
                ScanErrorKind::IoError,
                format!("Failed to open file: {e}"),
            ));
        }
    };

    // Read at most max_file_size + 1 bytes to detect oversized files
    let mut buffer = Vec::new();
    if let Err(e) = file.take(max_file_size + 1).read_to_end(&mut buffer) {
        return ScanResult::Err(ScanError::new(
            path,
            ScanErrorKind::IoError,
            format!("Failed to read file: {e}"),
        ));
    }

    if buffer.len() as u64 > max_file_size {
        return ScanResult::Err(ScanError::new(
            path,
            ScanErrorKind::FileTooLarge,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    match String::from_utf8(buffer) {
        Ok(content) => ScanResult::Ok(content),
        Err(_) => ScanResult::Err(ScanError::new(
            path,
            ScanErrorKind::InvalidEncoding,
            "File is not valid UTF-8".to_owned(),
        )),
    }
}
