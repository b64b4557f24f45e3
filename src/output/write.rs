use std::{
    fs::{self, File},
    io::{self, BufWriter, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{AmapError, Result};

/// Write-then-rename wrapper: readers see either the old file or the complete
/// new one, never a partial write.
pub struct PendingWrite {
    target: PathBuf,
    tmp: BufWriter<NamedTempFile>,
}

impl PendingWrite {
    /// Open a temp file next to `target`, creating the parent directory.
    pub fn open(target: &Path) -> Result<Self> {
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;
        let tmp = NamedTempFile::new_in(parent)?;
        Ok(Self { target: target.to_path_buf(), tmp: BufWriter::new(tmp) })
    }

    #[inline] pub fn target(&self) -> &Path { &self.target }

    /// Flush, fsync, and rename over the target.
    pub fn finalize(self) -> Result<()> {
        let tmp = self.tmp.into_inner().map_err(|e| AmapError::Io(e.into_error()))?;
        if let Err(err) = tmp.as_file().sync_all() {
            log::warn!("fsync of temp file for {} failed: {err}", self.target.display());
        }
        tmp.persist(&self.target).map_err(|e| AmapError::Io(e.error))?;
        if let Some(dir) = self.target.parent().filter(|d| !d.as_os_str().is_empty()) {
            if let Err(err) = File::open(dir).and_then(|f| f.sync_all()) {
                log::warn!("fsync of directory {} failed: {err}", dir.display());
            }
        }
        Ok(())
    }
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.tmp.write(buf) }
    fn flush(&mut self) -> io::Result<()> { self.tmp.flush() }
}

impl Seek for PendingWrite {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> { self.tmp.seek(pos) }
}

/// Serialize `value` as compact JSON (non-ASCII kept as is) and atomically
/// replace `path` with it.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut sink = PendingWrite::open(path)?;
    serde_json::to_writer(&mut sink, value)?;
    sink.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "old").unwrap();

        write_json_atomic(&path, &json!({ "name": "北京市" })).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"name":"北京市"}"#);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn dropped_write_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        {
            let mut sink = PendingWrite::open(&path).unwrap();
            sink.write_all(b"partial").unwrap();
        }
        assert!(!path.exists());
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 0);
    }
}
