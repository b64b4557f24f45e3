//! Vendor district-query payloads and the flattening of the administrative
//! tree into one record per district-level unit.

use serde::Deserialize;

use crate::{
    amap::names::shorten_district_name,
    error::{AmapError, Result},
    types::{Adcode, DistrictProperties},
};

/// City-level units the vendor inserts under the four municipalities.
const MUNICIPAL_PSEUDO_CITIES: [&str; 5] = ["上海城区", "重庆城区", "重庆郊县", "天津城区", "北京城区"];

const DISTRICT_RENAMES: [(&str, &str); 2] = [
    ("澳门大学横琴校区(由澳门实施管辖)", "澳门大学横琴校区"),
    ("海西蒙古族藏族自治州直辖", "大柴旦行政委员会"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistrictLevel {
    Country,
    Province,
    City,
    District,
    Street,
    #[serde(other)]
    Unknown,
}

/// One node of the vendor district tree.
#[derive(Debug, Clone, Deserialize)]
pub struct DistrictNode {
    pub adcode: String,
    pub name: String,
    pub level: DistrictLevel,
    /// Only present on the top-level node when `extensions=all`.
    #[serde(default)]
    pub polyline: Option<String>,
    #[serde(default)]
    pub districts: Vec<DistrictNode>,
}

impl DistrictNode {
    pub fn adcode(&self) -> Result<Adcode> {
        self.adcode.parse().map_err(|_| {
            AmapError::Decode(format!("district {:?} has malformed adcode {:?}", self.name, self.adcode))
        })
    }
}

/// Body of a `/v3/config/district` response.
#[derive(Debug, Clone, Deserialize)]
pub struct DistrictResponse {
    pub status: String,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub infocode: String,
    #[serde(default)]
    pub districts: Vec<DistrictNode>,
}

impl DistrictResponse {
    /// `status == "0"` marks a transient failure worth retrying.
    pub fn check_status(self) -> Result<Self> {
        if self.status == "0" {
            return Err(AmapError::TransientSource { info: self.info, infocode: self.infocode });
        }
        Ok(self)
    }

    /// The polyline of the one unit a filtered single-district query returns.
    pub fn single_polyline(&self, adcode: Adcode) -> Result<String> {
        let node = match self.districts.as_slice() {
            [] => return Err(AmapError::MissingData(format!("adcode={adcode} not found"))),
            [node] => node,
            nodes => return Err(AmapError::Decode(format!(
                "adcode={adcode} matched {} districts", nodes.len()
            ))),
        };
        node.polyline.clone()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| AmapError::MissingData(format!("adcode={adcode} has no polyline")))
    }
}

fn unexpected(node: &DistrictNode, parent: &DistrictNode) -> AmapError {
    AmapError::Decode(format!(
        "unexpected level {:?} for {:?} under {:?}", node.level, node.name, parent.name
    ))
}

fn record(
    province: &DistrictNode,
    city: &DistrictNode,
    district: &DistrictNode,
) -> Result<DistrictProperties> {
    Ok(DistrictProperties {
        province_name: province.name.clone(),
        province_adcode: province.adcode()?,
        city_name: city.name.clone(),
        city_adcode: city.adcode()?,
        district_name: district.name.clone(),
        district_adcode: district.adcode()?,
        short_name: String::new(),
    })
}

fn flatten_province(province: &DistrictNode, out: &mut Vec<DistrictProperties>) -> Result<()> {
    // Taiwan carries no subdivisions.
    if province.districts.is_empty() {
        out.push(record(province, province, province)?);
        return Ok(());
    }
    if province.level != DistrictLevel::Province {
        return Err(AmapError::Decode(format!(
            "expected a province, got {:?} for {:?}", province.level, province.name
        )));
    }

    for city in &province.districts {
        match city.level {
            // Hong Kong and Macau go straight to districts.
            DistrictLevel::District => out.push(record(province, province, city)?),
            DistrictLevel::City => {
                for district in &city.districts {
                    match district.level {
                        // Cities without districts list streets instead.
                        DistrictLevel::Street => {
                            out.push(record(province, city, city)?);
                            break;
                        }
                        DistrictLevel::District => out.push(record(province, city, district)?),
                        _ => return Err(unexpected(district, city)),
                    }
                }
            }
            _ => return Err(unexpected(city, province)),
        }
    }
    Ok(())
}

fn apply_fixups(props: &mut DistrictProperties) {
    if MUNICIPAL_PSEUDO_CITIES.contains(&props.city_name.as_str()) {
        props.city_name = props.province_name.clone();
        props.city_adcode = props.province_adcode;
    }
    if let Some((_, to)) = DISTRICT_RENAMES.iter().find(|(from, _)| *from == props.district_name) {
        props.district_name = to.to_string();
    }
    props.short_name = shorten_district_name(&props.district_name);
}

/// Flatten a `subdistrict=3` response into district records sorted by adcode.
pub fn flatten_district_tree(response: &DistrictResponse) -> Result<Vec<DistrictProperties>> {
    let country = response.districts.first()
        .ok_or_else(|| AmapError::MissingData("district tree has no country node".into()))?;

    let mut out = Vec::new();
    for province in &country.districts {
        flatten_province(province, &mut out)?;
    }
    out.iter_mut().for_each(apply_fixups);
    out.sort_by_key(|p| p.district_adcode);
    Ok(out)
}
