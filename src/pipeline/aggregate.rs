//! Bottom-up dissolve: district -> city -> province -> country.

use std::collections::BTreeMap;

use geo::MultiPolygon;

use crate::{
    amap::{shorten_city_name, shorten_province_name},
    config::PipelineConfig,
    error::{AmapError, Result},
    geom::{dissolve, Coverage},
    types::{
        Adcode, AdminRecord, CityProperties, CountryProperties, DistrictProperties, Layer,
        Properties, ProvinceProperties,
    },
};

/// A level whose units group under a parent unit of the next level up.
pub trait Aggregate: Properties {
    type Parent: Properties;

    /// Adcode of the parent unit; the grouping key.
    fn parent_key(&self, config: &PipelineConfig) -> Adcode;

    /// Attributes shared by every child of the parent, child-only fields dropped.
    fn to_parent(&self, config: &PipelineConfig) -> Result<Self::Parent>;
}

impl Aggregate for DistrictProperties {
    type Parent = CityProperties;

    #[inline] fn parent_key(&self, _: &PipelineConfig) -> Adcode { self.city_adcode }

    fn to_parent(&self, _: &PipelineConfig) -> Result<CityProperties> {
        Ok(CityProperties {
            province_name: self.province_name.clone(),
            province_adcode: self.province_adcode,
            city_name: self.city_name.clone(),
            city_adcode: self.city_adcode,
            short_name: shorten_city_name(&self.city_name)?,
        })
    }
}

impl Aggregate for CityProperties {
    type Parent = ProvinceProperties;

    #[inline] fn parent_key(&self, _: &PipelineConfig) -> Adcode { self.province_adcode }

    fn to_parent(&self, _: &PipelineConfig) -> Result<ProvinceProperties> {
        Ok(ProvinceProperties {
            province_name: self.province_name.clone(),
            province_adcode: self.province_adcode,
            short_name: shorten_province_name(&self.province_name),
        })
    }
}

impl Aggregate for ProvinceProperties {
    type Parent = CountryProperties;

    #[inline] fn parent_key(&self, config: &PipelineConfig) -> Adcode { config.country_adcode }

    fn to_parent(&self, config: &PipelineConfig) -> Result<CountryProperties> {
        Ok(CountryProperties {
            country_name: config.country_name.clone(),
            country_adcode: config.country_adcode,
        })
    }
}

/// Fail unless every member of `layer` is valid and no two overlap.
pub fn validate_layer<P: Properties>(layer: &Layer<P>) -> Result<()> {
    let report = Coverage::new(layer.geometries()).check();
    if report.is_valid() {
        return Ok(());
    }
    Err(AmapError::invalid(
        &format!("{} coverage", layer.level()),
        report.offenders().into_iter().map(|idx| layer.records[idx].adcode()),
    ))
}

/// Group `layer` by parent and dissolve each group. The parent attributes
/// come from the first child in adcode order. The result is validated before
/// it is returned.
pub fn aggregate<P: Aggregate>(layer: &Layer<P>, config: &PipelineConfig) -> Result<Layer<P::Parent>> {
    debug_assert_eq!(P::LEVEL.parent(), Some(<P::Parent as Properties>::LEVEL));

    let mut groups: BTreeMap<Adcode, (&P, Vec<&MultiPolygon<f64>>)> = BTreeMap::new();
    for record in &layer.records {
        groups.entry(record.properties.parent_key(config))
            .or_insert_with(|| (&record.properties, Vec::new()))
            .1.push(&record.geometry);
    }

    let records = groups.into_values()
        .map(|(first, shapes)| {
            Ok(AdminRecord::new(first.to_parent(config)?, dissolve(shapes, config.precision)))
        })
        .collect::<Result<Vec<_>>>()?;

    let parent = Layer::new(records);
    validate_layer(&parent)?;
    log::info!("{} level: {} units from {} {} units", parent.level(), parent.len(), layer.len(), layer.level());
    Ok(parent)
}
