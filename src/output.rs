use crate::error::{MotifError, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// An output file written to a temporary file in its destination directory.
///
/// Nothing appears at the destination until [`StagedFile::persist`] is called;
/// dropping a staged file removes the temporary file.
#[derive(Debug)]
pub struct StagedFile {
    tmp: NamedTempFile,
    destination: PathBuf,
}

impl StagedFile {
    /// Creates the temporary file next to `destination`.
    ///
    /// # Errors
    /// * Returns `MotifError::Io` if `destination` is a directory or the
    ///   temporary file cannot be created
    pub fn new(destination: impl AsRef<Path>) -> Result<Self> {
        let destination = destination.as_ref();
        if destination.is_dir() {
            return Err(MotifError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is a directory", destination.display()),
            )));
        }
        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        Ok(StagedFile {
            tmp: NamedTempFile::new_in(dir)?,
            destination: destination.to_path_buf(),
        })
    }

    pub fn file_mut(&mut self) -> &mut File {
        self.tmp.as_file_mut()
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Moves the temporary file into place
    pub fn persist(self) -> Result<PathBuf> {
        self.tmp
            .persist(&self.destination)
            .map_err(|e| MotifError::Io(e.error))?;
        Ok(self.destination)
    }
}
