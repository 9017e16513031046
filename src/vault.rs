//! Vault layout and file placement.
//!
//! The vault is a plain directory tree: archived PDFs under the papers
//! subdirectory, composed notes under the notes subdirectory. Filenames are
//! the unit of identity; archiving a name that already exists overwrites the
//! earlier file.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::VaultConfig;

/// Errors from vault filesystem operations.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Cannot create vault directory {path}: {reason}")]
    CreateDir { path: PathBuf, reason: String },

    #[error("Source path {path} has no filename")]
    NoFilename { path: PathBuf },

    #[error("Source filename {path} is not valid UTF-8")]
    InvalidFilename { path: PathBuf },

    #[error("Cannot archive {from} to {to}: {reason}")]
    Archive {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    #[error("Cannot write note {path}: {reason}")]
    WriteNote { path: PathBuf, reason: String },
}

/// A PDF that has been moved into the papers directory.
#[derive(Debug, Clone)]
pub struct ArchivedPdf {
    /// Full path of the archived file
    pub path: PathBuf,
    /// Bare filename, extension included
    pub filename: String,
}

/// Handle on the vault directory tree.
#[derive(Debug, Clone)]
pub struct Vault {
    papers: PathBuf,
    notes: PathBuf,
    papers_dir: String,
}

impl Vault {
    pub fn new(config: &VaultConfig) -> Self {
        Self {
            papers: config.root.join(&config.papers_dir),
            notes: config.root.join(&config.notes_dir),
            papers_dir: config.papers_dir.clone(),
        }
    }

    /// Create the papers and notes directories if they are missing.
    pub fn ensure_layout(&self) -> Result<(), VaultError> {
        for dir in [&self.papers, &self.notes] {
            fs::create_dir_all(dir).map_err(|e| VaultError::CreateDir {
                path: dir.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Papers directory name as it appears in note links.
    pub fn papers_dir_name(&self) -> &str {
        &self.papers_dir
    }

    /// Move a PDF from the drop folder into the papers directory.
    ///
    /// Falls back to copy-and-remove when rename fails, so drop folders on
    /// a different filesystem than the vault still work.
    pub fn archive_pdf(&self, source: &Path) -> Result<ArchivedPdf, VaultError> {
        let name = source.file_name().ok_or_else(|| VaultError::NoFilename {
            path: source.to_path_buf(),
        })?;
        let filename = name
            .to_str()
            .ok_or_else(|| VaultError::InvalidFilename {
                path: source.to_path_buf(),
            })?
            .to_string();

        let dest = self.papers.join(&filename);
        if fs::rename(source, &dest).is_err() {
            let archive_err = |e: std::io::Error| VaultError::Archive {
                from: source.to_path_buf(),
                to: dest.clone(),
                reason: e.to_string(),
            };
            fs::copy(source, &dest).map_err(archive_err)?;
            fs::remove_file(source).map_err(archive_err)?;
        }

        Ok(ArchivedPdf {
            path: dest,
            filename,
        })
    }

    /// Note path for an archived PDF filename, extension replaced with md.
    pub fn note_path(&self, pdf_filename: &str) -> PathBuf {
        self.notes.join(Path::new(pdf_filename).with_extension("md"))
    }

    /// Write the composed note in a single operation.
    pub fn write_note(&self, pdf_filename: &str, content: &str) -> Result<PathBuf, VaultError> {
        let path = self.note_path(pdf_filename);
        fs::write(&path, content).map_err(|e| VaultError::WriteNote {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(path)
    }
}
