//! Desktop directory listing.
//!
//! Entries carry their metadata in the file name: `name.ext.os` is a file
//! whose display name is `name.ext`, `name.osdir` is a directory, and
//! everything else is unknown. Dot-files are hidden.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Result, ShellError};

pub const FILE_SUFFIX: &str = "os";
pub const DIRECTORY_SUFFIX: &str = "osdir";
pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    Directory,
    Unknown,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItemKind::File => "file",
            ItemKind::Directory => "directory",
            ItemKind::Unknown => UNKNOWN,
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopItem {
    pub kind: ItemKind,
    pub file_name: String,
    pub extension: Option<String>,
    pub display_name: String,
}

impl DesktopItem {
    /// Classify a single directory entry by name. Returns `None` for hidden
    /// entries.
    pub fn classify(entry: &str) -> Option<Self> {
        if entry.starts_with('.') {
            return None;
        }
        let parts: Vec<&str> = entry.split('.').collect();
        let n = parts.len();
        let item = match parts[n - 1] {
            FILE_SUFFIX if n >= 2 => {
                let file_name = parts[..n - 2].join(".");
                let extension = parts[n - 2].to_string();
                DesktopItem {
                    kind: ItemKind::File,
                    display_name: format!("{file_name}.{extension}"),
                    file_name,
                    extension: Some(extension),
                }
            }
            DIRECTORY_SUFFIX => {
                let file_name = parts[..n - 1].join(".");
                let extension = (n > 2).then(|| parts[n - 2].to_string());
                DesktopItem {
                    kind: ItemKind::Directory,
                    display_name: file_name.clone(),
                    file_name,
                    extension,
                }
            }
            _ => DesktopItem::unknown(),
        };
        Some(item)
    }

    pub fn unknown() -> Self {
        DesktopItem {
            kind: ItemKind::Unknown,
            file_name: UNKNOWN.to_string(),
            extension: Some(UNKNOWN.to_string()),
            display_name: UNKNOWN.to_string(),
        }
    }
}

/// List `dir`, keyed by the raw entry name.
pub fn list_items(dir: &Path) -> Result<BTreeMap<String, DesktopItem>> {
    let entries = fs::read_dir(dir).map_err(|source| ShellError::DesktopDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut items = BTreeMap::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(item) = DesktopItem::classify(&name) {
            items.insert(name, item);
        }
    }
    tracing::debug!(dir = %dir.display(), count = items.len(), "listed desktop items");
    Ok(items)
}
