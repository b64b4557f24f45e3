mod aggregate;
mod districts;

use std::collections::BTreeMap;

pub use aggregate::{aggregate, validate_layer, Aggregate};
pub use districts::{build_district_layer, decode_district, repair_layer};

use crate::{
    amap::RawDistrict,
    config::PipelineConfig,
    error::Result,
    types::{CityProperties, CountryProperties, DistrictProperties, Layer, Level, ProvinceProperties},
};

/// Every output level, each already validated as a coverage.
#[derive(Debug, Clone)]
pub struct Levels {
    pub district: Layer<DistrictProperties>,
    pub city: Layer<CityProperties>,
    pub province: Layer<ProvinceProperties>,
    pub country: Layer<CountryProperties>,
}

impl Levels {
    /// Feature count per level.
    pub fn counts(&self) -> BTreeMap<Level, usize> {
        BTreeMap::from([
            (Level::District, self.district.len()),
            (Level::City, self.city.len()),
            (Level::Province, self.province.len()),
            (Level::Country, self.country.len()),
        ])
    }
}

/// Run the geometric stages on raw district records: decode and correct,
/// repair the known defects, then dissolve upward one level at a time.
pub fn build_levels(raws: &[RawDistrict], config: &PipelineConfig) -> Result<Levels> {
    config.validate()?;

    let district = build_district_layer(raws, config)?;
    let city = aggregate(&district, config)?;
    let province = aggregate(&city, config)?;
    let country = aggregate(&province, config)?;

    Ok(Levels { district, city, province, country })
}
