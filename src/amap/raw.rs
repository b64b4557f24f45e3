use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::Result, output::write_json_atomic, types::DistrictProperties};

pub const RAW_DISTRICT_FILE: &str = "cn_district_raw.json";

/// One district as fetched: its identifiers plus the untouched GCJ-02 polyline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDistrict {
    #[serde(flatten)]
    pub properties: DistrictProperties,
    #[serde(default)]
    pub polyline: Option<String>,
}

pub fn read_raw_districts(path: &Path) -> Result<Vec<RawDistrict>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub fn write_raw_districts(path: &Path, districts: &[RawDistrict]) -> Result<()> {
    write_json_atomic(path, districts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Adcode;

    #[test]
    fn reads_back_what_it_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RAW_DISTRICT_FILE);
        let districts = vec![RawDistrict {
            properties: DistrictProperties {
                province_name: "江西省".into(),
                province_adcode: Adcode(360000),
                city_name: "吉安市".into(),
                city_adcode: Adcode(360800),
                district_name: "吉水县".into(),
                district_adcode: Adcode(360822),
                short_name: "吉水县".into(),
            },
            polyline: Some("115.1,27.1;115.2,27.1;115.2,27.2".into()),
        }];

        write_raw_districts(&path, &districts).unwrap();
        assert_eq!(read_raw_districts(&path).unwrap(), districts);
    }

    #[test]
    fn record_is_flat_and_polyline_optional() {
        let json = r#"[{
            "province_name": "台湾省", "province_adcode": 710000,
            "city_name": "台湾省", "city_adcode": 710000,
            "district_name": "台湾省", "district_adcode": 710000,
            "short_name": "台湾省"
        }]"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RAW_DISTRICT_FILE);
        std::fs::write(&path, json).unwrap();

        let districts = read_raw_districts(&path).unwrap();
        assert_eq!(districts[0].properties.district_adcode, Adcode(710000));
        assert!(districts[0].polyline.is_none());
    }
}
