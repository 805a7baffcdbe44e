use std::fs;

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::structure::Node;

pub const SETUP_FILENAME: &str = "setup.yaml";
const SETUP_FILENAME_ALT: &str = "setup.yml";

/// Project name used when the document does not name one.
pub const DEFAULT_PROJECT_NAME: &str = "my_project";

/// Raw document as written in `setup.yaml`. The `structure` value stays
/// untyped here; classification into a [`Node`] tree happens in `load`.
#[derive(Debug, Deserialize)]
struct SetupDoc {
    project_name: Option<String>,
    structure: Option<serde_yaml::Value>,
}

/// The parsed (project name, structure tree) pair. Read once at startup and
/// never mutated; the filesystem is the only durable store.
#[derive(Debug)]
pub struct ProjectSpec {
    pub name: String,
    pub structure: Node,
}

impl ProjectSpec {
    /// Read and parse a setup document from disk.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let raw =
            fs::read_to_string(path).with_context(|| format!("reading setup file {}", path))?;
        let doc: SetupDoc =
            serde_yaml::from_str(&raw).with_context(|| format!("parsing setup file {}", path))?;

        let name = doc
            .project_name
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_owned());

        let Some(raw_structure) = doc.structure else {
            bail!("{} has no `structure` key", path);
        };
        let structure = match Node::from_yaml(&raw_structure) {
            Some(node @ Node::Directory(_)) => node,
            _ => bail!("`structure` in {} must be a mapping of names to entries", path),
        };

        Ok(Self { name, structure })
    }
}

/// Locate the setup document in `dir` by convention, preferring `setup.yaml`
/// over `setup.yml`.
pub fn locate(dir: &Utf8Path) -> Result<Utf8PathBuf> {
    for candidate in [SETUP_FILENAME, SETUP_FILENAME_ALT] {
        let path = dir.join(candidate);
        if path.exists() {
            return Ok(path);
        }
    }
    bail!("no {} found in {}", SETUP_FILENAME, dir)
}
