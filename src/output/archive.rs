use std::{fs::{self, File}, io, path::{Path, PathBuf}};

use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::{common::require_dir_exists, error::{AmapError, Result}, types::Level};

use super::{write::PendingWrite, MANIFEST_FILE, NINE_LINE_FILE};

pub const ARCHIVE_FILE: &str = "geojson.zip";

const COMPRESSION_LEVEL: i64 = 7;

/// Bundle the level files found in `dir` into `geojson.zip`, along with the
/// manifest and the nine-dash line when present. With `clean`, the bundled
/// level files are removed once the archive is in place. Returns the archive
/// path.
pub fn package_levels(dir: &Path, clean: bool) -> Result<PathBuf> {
    require_dir_exists(dir)?;
    let level_files: Vec<&str> = Level::order().iter().map(|l| l.file_name()).collect();
    let missing: Vec<&str> = level_files.iter().copied()
        .filter(|name| !dir.join(name).is_file())
        .collect();
    if !missing.is_empty() {
        return Err(AmapError::MissingData(format!(
            "{} is missing level files: {}", dir.display(), missing.join(", ")
        )));
    }

    let mut entries = level_files.clone();
    entries.extend([MANIFEST_FILE, NINE_LINE_FILE].into_iter().filter(|name| dir.join(name).is_file()));

    let archive_path = dir.join(ARCHIVE_FILE);
    let mut zip = ZipWriter::new(PendingWrite::open(&archive_path)?);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL));

    for name in &entries {
        zip.start_file(*name, options)?;
        io::copy(&mut File::open(dir.join(name))?, &mut zip)?;
        log::info!("{name} compressed");
    }
    zip.finish()?.finalize()?;

    if clean {
        for name in &level_files {
            fs::remove_file(dir.join(name))?;
        }
        log::info!("removed bundled level files from {}", dir.display());
    }
    Ok(archive_path)
}
