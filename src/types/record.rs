use geo::MultiPolygon;
use serde::{Deserialize, Serialize};

use super::{adcode::Adcode, level::Level};

/// Identifiers of a district-level unit. Units without districts (Taiwan,
/// street-level cities) stand in as their own district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictProperties {
    pub province_name: String,
    pub province_adcode: Adcode,
    pub city_name: String,
    pub city_adcode: Adcode,
    pub district_name: String,
    pub district_adcode: Adcode,
    #[serde(default)]
    pub short_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityProperties {
    pub province_name: String,
    pub province_adcode: Adcode,
    pub city_name: String,
    pub city_adcode: Adcode,
    pub short_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvinceProperties {
    pub province_name: String,
    pub province_adcode: Adcode,
    pub short_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryProperties {
    pub country_name: String,
    pub country_adcode: Adcode,
}

/// Flat attribute record attached to every feature of one level.
pub trait Properties: Serialize + Clone {
    const LEVEL: Level;

    /// The unit's own identifier at its level.
    fn adcode(&self) -> Adcode;
}

impl Properties for DistrictProperties {
    const LEVEL: Level = Level::District;
    #[inline] fn adcode(&self) -> Adcode { self.district_adcode }
}

impl Properties for CityProperties {
    const LEVEL: Level = Level::City;
    #[inline] fn adcode(&self) -> Adcode { self.city_adcode }
}

impl Properties for ProvinceProperties {
    const LEVEL: Level = Level::Province;
    #[inline] fn adcode(&self) -> Adcode { self.province_adcode }
}

impl Properties for CountryProperties {
    const LEVEL: Level = Level::Country;
    #[inline] fn adcode(&self) -> Adcode { self.country_adcode }
}

/// One geographic unit and the geometry it owns.
#[derive(Debug, Clone)]
pub struct AdminRecord<P> {
    pub properties: P,
    pub geometry: MultiPolygon<f64>,
}

impl<P: Properties> AdminRecord<P> {
    pub fn new(properties: P, geometry: MultiPolygon<f64>) -> Self {
        Self { properties, geometry }
    }

    #[inline] pub fn adcode(&self) -> Adcode { self.properties.adcode() }
}

/// All units of a single hierarchy level, in adcode order.
#[derive(Debug, Clone)]
pub struct Layer<P> {
    pub records: Vec<AdminRecord<P>>,
}

impl<P: Properties> Layer<P> {
    pub fn new(mut records: Vec<AdminRecord<P>>) -> Self {
        records.sort_by_key(|r| r.adcode());
        Self { records }
    }

    #[inline] pub fn level(&self) -> Level { P::LEVEL }

    #[inline] pub fn len(&self) -> usize { self.records.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Position of the record with `adcode`, if present.
    pub fn position(&self, adcode: Adcode) -> Option<usize> {
        self.records.binary_search_by_key(&adcode, |r| r.adcode()).ok()
    }

    /// Clone out the geometries, index-aligned with `records`.
    pub fn geometries(&self) -> Vec<MultiPolygon<f64>> {
        self.records.iter().map(|r| r.geometry.clone()).collect()
    }

    pub fn adcodes(&self) -> Vec<Adcode> {
        self.records.iter().map(|r| r.adcode()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, MultiPolygon};

    fn province(code: u32) -> AdminRecord<ProvinceProperties> {
        AdminRecord::new(
            ProvinceProperties {
                province_name: format!("p{code}"),
                province_adcode: Adcode(code),
                short_name: format!("p{code}"),
            },
            MultiPolygon(vec![polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)]]),
        )
    }

    #[test]
    fn layer_sorts_and_finds_by_adcode() {
        let layer = Layer::new(vec![province(440000), province(110000), province(360000)]);
        assert_eq!(layer.level(), Level::Province);
        assert_eq!(layer.adcodes(), vec![Adcode(110000), Adcode(360000), Adcode(440000)]);
        assert_eq!(layer.position(Adcode(360000)), Some(1));
        assert_eq!(layer.position(Adcode(500000)), None);
    }

    #[test]
    fn district_short_name_defaults_when_absent() {
        let json = r#"{
            "province_name": "江西省", "province_adcode": 360000,
            "city_name": "吉安市", "city_adcode": 360800,
            "district_name": "吉水县", "district_adcode": 360822
        }"#;
        let props: DistrictProperties = serde_json::from_str(json).unwrap();
        assert_eq!(props.adcode(), Adcode(360822));
        assert!(props.short_name.is_empty());
    }
}
