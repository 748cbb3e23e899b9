//! Output directory writes.

use crate::error::{Result, SiteError};
use std::path::{Path, PathBuf};

/// A dist directory that pages and assets are written into.
#[derive(Debug)]
pub struct OutputDir {
    root: PathBuf,
    written: usize,
}

impl OutputDir {
    /// Remove everything under `root`, then recreate it empty.
    pub fn clean(root: &Path) -> Result<Self> {
        if root.exists() {
            std::fs::remove_dir_all(root).map_err(|source| SiteError::Clean {
                path: root.to_path_buf(),
                source,
            })?;
        }
        Self::open(root)
    }

    /// Use `root` as-is, creating it when missing.
    pub fn open(root: &Path) -> Result<Self> {
        std::fs::create_dir_all(root).map_err(|source| SiteError::Write {
            path: root.to_path_buf(),
            source,
        })?;
        Ok(Self {
            root: root.to_path_buf(),
            written: 0,
        })
    }

    /// Files written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&mut self, relative: &str, content: &str) -> Result<()> {
        let path = self.root.join(relative);
        create_parent(&path)?;
        std::fs::write(&path, content.as_bytes()).map_err(|source| SiteError::Write {
            path: path.clone(),
            source,
        })?;
        self.written += 1;
        diagnostics::debug!("wrote {relative}", relative: relative);
        Ok(())
    }

    pub fn copy_file(&mut self, from: &Path, relative: &str) -> Result<()> {
        let to = self.root.join(relative);
        create_parent(&to)?;
        std::fs::copy(from, &to).map_err(|source| SiteError::Read {
            path: from.to_path_buf(),
            source,
        })?;
        self.written += 1;
        Ok(())
    }

    /// Copy a directory tree under `relative`. Returns the number of files.
    pub fn copy_dir(&mut self, from: &Path, relative: &str) -> Result<usize> {
        let entries = std::fs::read_dir(from).map_err(|source| SiteError::Read {
            path: from.to_path_buf(),
            source,
        })?;
        let mut copied = 0;
        for entry in entries {
            let entry = entry.map_err(|source| SiteError::Read {
                path: from.to_path_buf(),
                source,
            })?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let target = format!("{relative}/{name}");
            let path = entry.path();
            if path.is_dir() {
                copied += self.copy_dir(&path, &target)?;
            } else {
                self.copy_file(&path, &target)?;
                copied += 1;
            }
        }
        Ok(copied)
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| SiteError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
