#![allow(dead_code)]

use amapshp::{amap::RawDistrict, Adcode, DistrictProperties, PipelineConfig};

/// Polyline for an axis-aligned rectangle.
pub fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> String {
    format!("{x0:.6},{y0:.6};{x1:.6},{y0:.6};{x1:.6},{y1:.6};{x0:.6},{y1:.6}")
}

pub fn raw(province: (u32, &str), city: (u32, &str), district: u32, polyline: String) -> RawDistrict {
    RawDistrict {
        properties: DistrictProperties {
            province_name: province.1.to_string(),
            province_adcode: Adcode(province.0),
            city_name: city.1.to_string(),
            city_adcode: Adcode(city.0),
            district_name: format!("{district}区"),
            district_adcode: Adcode(district),
            short_name: String::new(),
        },
        polyline: Some(polyline),
    }
}

/// A 4x2 grid of districts near Beijing, `step` degrees apart: two provinces,
/// each with two cities of two districts.
///
/// ```text
///   y=1  | 110102 | 110202 | 120102 | 120202 |
///   y=0  | 110101 | 110201 | 120101 | 120201 |
///          110100   110200   120100   120200
/// ```
pub fn grid(origin: (f64, f64), step: f64) -> Vec<RawDistrict> {
    let provinces = [(110000, "北京市"), (120000, "天津市")];
    let cities = [
        [(110100, "甲市"), (110200, "乙市")],
        [(120100, "丙市"), (120200, "丁市")],
    ];

    let mut out = Vec::new();
    for (p, province) in provinces.into_iter().enumerate() {
        for (c, city) in cities[p].into_iter().enumerate() {
            let column = (p * 2 + c) as f64;
            for row in 0..2u32 {
                let x0 = origin.0 + column * step;
                let y0 = origin.1 + row as f64 * step;
                out.push(raw(province, city, city.0 + row + 1, square(x0, y0, x0 + step, y0 + step)));
            }
        }
    }
    out
}

pub fn config_without_defects() -> PipelineConfig {
    PipelineConfig { defective_adcodes: vec![], ..PipelineConfig::default() }
}
