//! Scratch files for downloaded objects
//!
//! Each item gets its own file whose name ends with the object's base name;
//! a random prefix keeps two items with the same base name apart. The file
//! is removed when the [`ScratchFile`] is dropped.

use csvmeta_common::Result;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

#[derive(Debug, Clone)]
pub struct ScratchArea {
    dir: PathBuf,
}

impl ScratchArea {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn file_for(&self, base_name: &str) -> Result<ScratchFile> {
        std::fs::create_dir_all(&self.dir)?;

        let suffix = format!("-{}", base_name);
        let file = tempfile::Builder::new()
            .prefix("csvmeta-")
            .suffix(&suffix)
            .tempfile_in(&self.dir)?;

        Ok(ScratchFile {
            path: file.into_temp_path(),
        })
    }
}

#[derive(Debug)]
pub struct ScratchFile {
    path: TempPath,
}

impl ScratchFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}
