//! The South China Sea nine-dash line, taken from the DataV national outline.

use std::path::{Path, PathBuf};

use geo::Validation;
use serde_json::{json, Value};

use crate::{
    error::{AmapError, Result},
    geom::gcj_geometry_to_wgs,
    output::{geometry_from_geojson, geometry_to_geojson, write_json_atomic, NINE_LINE_FILE},
};

#[cfg(feature = "download")]
use super::client::AmapClient;

/// DataV's country outline with province features; the last feature is the
/// nine-dash line polygon, in GCJ-02.
pub const NINE_LINE_URL: &str = "https://geo.datav.aliyun.com/areas_v3/bound/100000_full.json";

const NINE_LINE_NAME: &str = "九段线";

/// Extract the nine-dash line from the national FeatureCollection, correct it
/// to WGS-84 and wrap it as a one-feature FeatureCollection.
pub fn nine_line_from_collection(collection: &Value, precision: u32) -> Result<Value> {
    let feature = collection["features"].as_array()
        .and_then(|features| features.last())
        .ok_or_else(|| AmapError::Decode("national outline has no features".into()))?;

    let geometry = gcj_geometry_to_wgs(&geometry_from_geojson(&feature["geometry"])?, precision);
    if geometry.0.is_empty() || !geometry.is_valid() {
        return Err(AmapError::invalid("nine-dash line", [NINE_LINE_NAME]));
    }

    Ok(json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": geometry_to_geojson(&geometry)?,
            "properties": { "name": NINE_LINE_NAME },
        }],
    }))
}

/// Write the collection to `nine_line.geojson` under `dir`.
pub fn write_nine_line(dir: &Path, collection: &Value) -> Result<PathBuf> {
    let path = dir.join(NINE_LINE_FILE);
    write_json_atomic(&path, collection)?;
    Ok(path)
}

#[cfg(feature = "download")]
impl AmapClient {
    /// Download the national outline and extract the nine-dash line.
    pub fn nine_line(&self, precision: u32) -> Result<Value> {
        let collection: Value = self.http.get(NINE_LINE_URL)
            .send()?
            .error_for_status()?
            .json()?;
        let nine_line = nine_line_from_collection(&collection, precision)?;
        log::info!("nine-dash line downloaded");
        Ok(nine_line)
    }
}
