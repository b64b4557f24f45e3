use std::{fs, io, path::Path};

use crate::error::{AmapError, Result};

/// Create the directory if it doesn’t exist; error if a non-directory exists there.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            return Err(AmapError::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("path exists but is not a directory: {}", path.display()),
            )));
        }
    } else {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Error unless the directory already exists.
pub fn require_dir_exists(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(AmapError::MissingData(format!("directory does not exist: {}", path.display())));
    }
    Ok(())
}

/// Error unless the file already exists.
pub fn require_file_exists(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(AmapError::MissingData(format!("file does not exist: {}", path.display())));
    }
    Ok(())
}
