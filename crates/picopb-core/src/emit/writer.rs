//! Artifact and manifest writing.
//!
//! Artifacts are overwritten unconditionally, so regenerating from identical
//! input yields byte-identical files. The manifest is append-only: each
//! generation run targets a disjoint schema module, so accumulated lines are
//! never deduplicated.

use crate::error::{Error, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Marker line prefixed to every generated artifact
pub const GENERATED_HEADER: &str = "# Automatically generated by picopb. Do not edit.";

/// Writes one source artifact into the target directory.
///
/// The file is named `<name>.py`, prefixed with [`GENERATED_HEADER`], and
/// replaces any previous content. Returns the written path.
pub fn write_artifact(dir: &Path, name: &str, body: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| Error::directory_create(dir, e))?;
    let path = dir.join(format!("{name}.py"));
    fs::write(&path, format!("{GENERATED_HEADER}\n{body}"))
        .map_err(|e| Error::file_write(&path, e))?;
    Ok(path)
}

/// An open append-mode manifest handle.
///
/// Collects one import line per generated artifact across a run.
#[derive(Debug)]
pub struct Manifest {
    path: PathBuf,
    file: File,
}

impl Manifest {
    /// Opens (creating if needed) the manifest file for appending.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Error::file_write(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Appends one line to the manifest.
    pub fn append(&mut self, line: &str) -> Result<()> {
        writeln!(self.file, "{line}").map_err(|e| Error::file_write(&self.path, e))
    }
}
