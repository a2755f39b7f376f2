//! Output directory listing.

use std::io::Write;
use std::path::{Component, Path, PathBuf};

use crate::error::Result;

/// Maximum number of file paths printed per directory.
pub const MAX_FILES_PER_DIR: usize = 10;

/// Write a top-down listing of `root`.
///
/// Every directory is printed as `<indent><name>/`, followed by the absolute
/// paths of its first [`MAX_FILES_PER_DIR`] files and, when more exist, a
/// `... and N more files` line. Subdirectories follow, one indent level deeper.
/// Entries are visited in name order; symlinked directories are skipped.
///
/// # Errors
///
/// Returns an error if `root` or any directory below it cannot be read.
///
/// # Example
///
/// ```rust
/// use llmcompress_rs::report::write_listing;
///
/// # fn main() -> llmcompress_rs::Result<()> {
/// let dir = tempfile::tempdir()?;
/// std::fs::write(dir.path().join("config.json"), "{}")?;
///
/// let mut out = Vec::new();
/// write_listing(&mut out, dir.path())?;
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("config.json"));
/// # Ok(())
/// # }
/// ```
pub fn write_listing<W: Write>(out: &mut W, root: &Path) -> Result<()> {
    let root = absolute_path(root)?;
    walk(out, &root, 0)
}

/// Make `path` absolute and collapse `.` and `..` without touching the filesystem.
///
/// Symlinks are not resolved, so `link/..` becomes the directory holding `link`.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

fn walk<W: Write>(out: &mut W, dir: &Path, level: usize) -> Result<()> {
    let (dirs, files) = read_sorted(dir)?;

    let indent = " ".repeat(2 * level);
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    writeln!(out, "{indent}{name}/")?;

    let subindent = " ".repeat(2 * (level + 1));
    for file in files.iter().take(MAX_FILES_PER_DIR) {
        writeln!(out, "{subindent}{}", file.display())?;
    }
    if files.len() > MAX_FILES_PER_DIR {
        writeln!(
            out,
            "{subindent}... and {} more files",
            files.len() - MAX_FILES_PER_DIR
        )?;
    }

    for path in dirs {
        walk(out, &path, level + 1)?;
    }
    Ok(())
}

/// Split a directory into `(subdirectories, files)`, both sorted by name.
///
/// Symlinks to directories belong to neither list.
fn read_sorted(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            dirs.push(path);
        } else if file_type.is_symlink() && path.is_dir() {
            continue;
        } else {
            files.push(path);
        }
    }

    dirs.sort();
    files.sort();
    Ok((dirs, files))
}
