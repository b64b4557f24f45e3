//! Short display names for administrative units.

use crate::error::{AmapError, Result};

const CITY_SUFFIXES: &[&str] = &[
    "土家族苗族自治州",
    "布依族苗族自治州",
    "哈尼族彝族自治州",
    "蒙古族藏族自治州",
    "傣族景颇族自治州",
    "苏柯尔克孜自治州",
    "黎族苗族自治县",
    "苗族侗族自治州",
    "藏族羌族自治州",
    "壮族苗族自治州",
    "朝鲜族自治州",
    "傈僳族自治州",
    "哈萨克自治州",
    "彝族自治州",
    "藏族自治州",
    "黎族自治县",
    "傣族自治州",
    "回族自治州",
    "蒙古自治州",
    "白族自治州",
    "特别行政区",
    "林区",
    "地区",
    "城区",
    "县",
    "盟",
    "省",
    "市",
];

// Longer entries come first so that a compound ethnic suffix wins over the
// shorter suffix it ends with.
const DISTRICT_SUFFIXES: &[&str] = &[
    "拉祜族佤族布朗族傣族自治县",
    "彝族回族苗族自治县",
    "彝族哈尼族拉祜族自治县",
    "哈尼族彝族傣族自治县",
    "傣族拉祜族佤族自治县",
    "苗族瑶族傣族自治县",
    "保安族东乡族撒拉族自治县",
    "白族普米族自治县",
    "独龙族怒族自治县",
    "满族蒙古族自治县",
    "苗族侗族自治县",
    "黎族苗族自治县",
    "土家族苗族自治县",
    "苗族土家族自治县",
    "仡佬族苗族自治县",
    "布依族苗族自治县",
    "苗族布依族自治县",
    "壮族瑶族自治县",
    "回族彝族自治县",
    "回族土族自治县",
    "哈尼族彝族自治县",
    "傣族彝族自治县",
    "傣族佤族自治县",
    "彝族苗族自治县",
    "彝族傣族自治县",
    "彝族回族自治县",
    "蒙古族自治县",
    "满族自治县",
    "回族自治县",
    "朝鲜族自治县",
    "畲族自治县",
    "侗族自治县",
    "苗族自治县",
    "黎族自治县",
    "土族自治县",
    "土家族自治县",
    "瑶族自治县",
    "仫佬族自治县",
    "毛南族自治县",
    "羌族自治县",
    "彝族自治县",
    "藏族自治县",
    "水族自治县",
    "纳西族自治县",
    "哈尼族自治县",
    "拉祜族自治县",
    "佤族自治县",
    "傈僳族自治县",
    "裕固族自治县",
    "哈萨克族自治县",
    "撒拉族自治县",
    "哈萨克自治县",
    "塔吉克自治县",
    "锡伯自治县",
    "蒙古自治县",
    "各族自治县",
    "达斡尔族自治旗",
    "达斡尔族区",
    "回族区",
    "自治旗",
];

fn leading_chars(name: &str, n: usize) -> String {
    name.chars().take(n).collect()
}

/// Keep the first two characters, or three for 内蒙古 and 黑龙江.
pub fn shorten_province_name(name: &str) -> String {
    if name.starts_with("内蒙古") || name.starts_with("黑龙江") {
        leading_chars(name, 3)
    } else {
        leading_chars(name, 2)
    }
}

/// Cut the name at the first administrative suffix it contains.
pub fn shorten_city_name(name: &str) -> Result<String> {
    if name.starts_with("重庆") {
        return Ok(name.to_string());
    }
    CITY_SUFFIXES.iter()
        .find_map(|suffix| name.find(suffix).map(|index| name[..index].to_string()))
        .ok_or_else(|| AmapError::Decode(format!("city name {name:?} has no known suffix")))
}

/// Drop the ethnic part of an autonomous county or banner, keeping the final
/// administrative character. Names without such a part are returned as is.
pub fn shorten_district_name(name: &str) -> String {
    match name {
        "喀喇沁左翼蒙古族自治县" => return "喀左县".to_string(),
        "东乡族自治县" => return "东乡县".to_string(),
        "鄂温克族自治旗" => return "鄂温克旗".to_string(),
        "海西蒙古族藏族自治州直辖" => return "自治州直辖".to_string(),
        _ => {}
    }

    for suffix in DISTRICT_SUFFIXES {
        if let Some(index) = name.find(suffix) {
            let last = suffix.chars().last().map(String::from).unwrap_or_default();
            return format!("{}{}", &name[..index], last);
        }
    }
    name.to_string()
}
