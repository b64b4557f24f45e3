//! Persisting the levels: GeoJSON files, manifest, and zip bundle.

mod archive;
mod geojson;
mod manifest;
mod write;

use std::path::Path;

pub use archive::{package_levels, ARCHIVE_FILE};
pub use geojson::{geometry_from_geojson, geometry_to_geojson, layer_to_geojson, record_to_feature};
pub use manifest::{sha256_file, FileHash, Manifest};
pub use write::{write_json_atomic, PendingWrite};

use crate::{common::ensure_dir_exists, error::Result, pipeline::Levels};

pub const MANIFEST_FILE: &str = "manifest.json";

pub const NINE_LINE_FILE: &str = "nine_line.geojson";

/// Write all four level files and the manifest into `dir`.
///
/// Every level is serialized before the first file is written, so a failure
/// never leaves a partial set behind.
pub fn write_levels(dir: &Path, levels: &Levels) -> Result<Manifest> {
    let documents = [
        (levels.district.level(), levels.district.len(), layer_to_geojson(&levels.district)?),
        (levels.city.level(), levels.city.len(), layer_to_geojson(&levels.city)?),
        (levels.province.level(), levels.province.len(), layer_to_geojson(&levels.province)?),
        (levels.country.level(), levels.country.len(), layer_to_geojson(&levels.country)?),
    ];

    ensure_dir_exists(dir)?;
    for (level, count, document) in &documents {
        let path = dir.join(level.file_name());
        write_json_atomic(&path, document)?;
        log::info!("wrote {} ({count} features)", path.display());
    }

    let manifest = Manifest::new(dir, &levels.counts())?;
    write_json_atomic(&dir.join(MANIFEST_FILE), &manifest)?;
    Ok(manifest)
}
