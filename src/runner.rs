use std::fs;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::builder;
use crate::cli::Cli;
use crate::config::{self, ProjectSpec};

/// Outcome of a successful build pass.
pub struct CreatedProject {
    pub name: String,
    pub root: Utf8PathBuf,
}

pub fn run(cli: Cli) -> Result<()> {
    if let Some(dir) = &cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("changing directory to {}", dir.display()))?;
    }

    let cwd = current_working_dir()?;
    let setup_path = match &cli.file {
        Some(path) => Utf8PathBuf::from_path_buf(path.clone())
            .map_err(|p| anyhow!("setup path {} is not valid UTF-8", p.display()))?,
        None => config::locate(&cwd)?,
    };

    let created = scaffold_project(&setup_path, &cwd)?;
    println!("Project `{}` created at {}", created.name, created.root);
    Ok(())
}

/// Load the spec at `setup_path` and realize it under `dest_dir`. Both paths
/// are explicit so nothing below here reads ambient process state.
pub fn scaffold_project(setup_path: &Utf8Path, dest_dir: &Utf8Path) -> Result<CreatedProject> {
    let spec = ProjectSpec::load(setup_path)?;

    let root = dest_dir.join(&spec.name);
    fs::create_dir_all(&root).with_context(|| format!("creating project root {}", root))?;
    debug!("building project `{}` under {}", spec.name, root);

    builder::build(&root, &spec.structure)?;

    Ok(CreatedProject {
        name: spec.name,
        root,
    })
}

fn current_working_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("determining current directory")?;
    Utf8PathBuf::from_path_buf(cwd).map_err(|_| anyhow!("current directory is not valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir() -> Utf8PathBuf {
        let mut dir = std::env::temp_dir();
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        dir.push(format!("mkproj-test-{ts}"));
        Utf8PathBuf::from_path_buf(dir).unwrap()
    }

    fn write_setup(dir: &Utf8Path, contents: &str) -> Utf8PathBuf {
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(config::SETUP_FILENAME);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn scaffolds_the_listing_scenario() {
        let dir = unique_temp_dir();
        let setup = write_setup(
            &dir,
            "project_name: demo\n\
             structure:\n\
             \x20 src:\n\
             \x20   - index.js\n\
             \x20   - README.md: hello\n",
        );

        let created = scaffold_project(&setup, &dir).unwrap();
        assert_eq!(created.name, "demo");
        assert_eq!(created.root, dir.join("demo"));

        let src = created.root.join("src");
        assert!(src.is_dir());
        assert_eq!(fs::read_to_string(src.join("index.js")).unwrap(), "");
        assert_eq!(fs::read_to_string(src.join("README.md")).unwrap(), "hello");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn scaffolds_nested_directories() {
        let dir = unique_temp_dir();
        let setup = write_setup(
            &dir,
            "project_name: demo\n\
             structure:\n\
             \x20 src:\n\
             \x20   utils:\n\
             \x20     helper.txt: util code\n",
        );

        let created = scaffold_project(&setup, &dir).unwrap();

        assert!(created.root.join("src").is_dir());
        assert!(created.root.join("src").join("utils").is_dir());
        assert_eq!(
            fs::read_to_string(created.root.join("src").join("utils").join("helper.txt")).unwrap(),
            "util code"
        );

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn default_project_name_is_used_when_absent() {
        let dir = unique_temp_dir();
        let setup = write_setup(&dir, "structure:\n  src: {}\n");

        let created = scaffold_project(&setup, &dir).unwrap();
        assert_eq!(created.name, "my_project");
        assert!(dir.join("my_project").join("src").is_dir());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn preserves_embedded_newlines_in_content() {
        let dir = unique_temp_dir();
        let setup = write_setup(
            &dir,
            "project_name: demo\n\
             structure:\n\
             \x20 notes.txt: |\n\
             \x20   first line\n\
             \x20   second line\n",
        );

        let created = scaffold_project(&setup, &dir).unwrap();
        assert_eq!(
            fs::read_to_string(created.root.join("notes.txt")).unwrap(),
            "first line\nsecond line\n"
        );

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn numeric_listing_entries_produce_no_files() {
        let dir = unique_temp_dir();
        let setup = write_setup(
            &dir,
            "project_name: demo\n\
             structure:\n\
             \x20 src:\n\
             \x20   - 42\n\
             \x20   - kept.txt\n",
        );

        let created = scaffold_project(&setup, &dir).unwrap();
        let src = created.root.join("src");
        assert!(src.join("kept.txt").is_file());
        assert_eq!(fs::read_dir(&src).unwrap().count(), 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn running_twice_yields_the_same_tree() {
        let dir = unique_temp_dir();
        let setup = write_setup(
            &dir,
            "project_name: demo\n\
             structure:\n\
             \x20 src:\n\
             \x20   - README.md: hello\n",
        );

        scaffold_project(&setup, &dir).unwrap();
        scaffold_project(&setup, &dir).unwrap();

        assert_eq!(
            fs::read_to_string(dir.join("demo").join("src").join("README.md")).unwrap(),
            "hello"
        );

        let _ = fs::remove_dir_all(&dir);
    }
}
