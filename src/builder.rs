use std::fs;

use anyhow::{Context, Result};
use camino::Utf8Path;
use tracing::debug;

use crate::structure::{FileEntry, Node};

/// Create the file at `path` with exactly `content` as its bytes, creating
/// any missing ancestor directories first. An existing file is overwritten
/// without warning or backup.
pub fn write_file(path: &Utf8Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating directory {}", parent))?;
    }
    fs::write(path, content).with_context(|| format!("writing {}", path))
}

/// Realize `node` under `base`, depth-first in document order.
///
/// The walk holds no state beyond the call stack. The first directory or
/// file failure aborts the whole run; anything created before it stays on
/// disk as-is.
pub fn build(base: &Utf8Path, node: &Node) -> Result<()> {
    match node {
        Node::Directory(children) => {
            for (name, child) in children {
                realize(&base.join(name), child)?;
            }
            Ok(())
        }
        // The loader only hands the builder a directory at the root, but
        // realizing the other shapes directly keeps the walker total.
        other => realize(base, other),
    }
}

/// Create whatever `node` denotes at `path`.
fn realize(path: &Utf8Path, node: &Node) -> Result<()> {
    match node {
        Node::Directory(children) => {
            create_dir(path)?;
            for (name, child) in children {
                realize(&path.join(name), child)?;
            }
            Ok(())
        }
        Node::Files(entries) => {
            create_dir(path)?;
            for entry in entries {
                match entry {
                    FileEntry::Empty(name) => write_file(&path.join(name), "")?,
                    FileEntry::WithContent { name, content } => {
                        write_file(&path.join(name), content)?;
                    }
                    FileEntry::Unrecognized => {
                        debug!("skipping unrecognized entry in {}", path);
                    }
                }
            }
            Ok(())
        }
        // No directory is created at `path` itself; it IS the file.
        Node::Content(content) => write_file(path, content),
    }
}

fn create_dir(path: &Utf8Path) -> Result<()> {
    debug!("creating directory {path}");
    fs::create_dir_all(path).with_context(|| format!("creating directory {}", path))
}
