mod common;

use std::{fs::File, io::Read};

use amapshp::{
    amap::{nine_line_from_collection, read_raw_districts, write_nine_line, write_raw_districts, RAW_DISTRICT_FILE},
    build_levels,
    geom::signed_area,
    output::{sha256_file, ARCHIVE_FILE, MANIFEST_FILE, NINE_LINE_FILE},
    package_levels, write_levels, AmapError, Level, Manifest,
};
use geo::Coord;
use serde_json::{json, Value};

use common::{config_without_defects, grid, raw, square};

fn ring_coords(ring: &Value) -> Vec<Coord<f64>> {
    ring.as_array().unwrap().iter()
        .map(|pt| Coord { x: pt[0].as_f64().unwrap(), y: pt[1].as_f64().unwrap() })
        .collect()
}

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_reader(File::open(path).unwrap()).unwrap()
}

#[test]
fn writes_levels_and_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let levels = build_levels(&grid((116.0, 39.8), 0.1), &config_without_defects()).unwrap();
    let manifest = write_levels(dir.path(), &levels).unwrap();

    for level in Level::order() {
        let path = dir.path().join(level.file_name());
        let document = read_json(&path);
        assert_eq!(document["type"], "FeatureCollection");
        assert_eq!(document["features"].as_array().unwrap().len(), manifest.counts[level.to_str()]);
        assert_eq!(manifest.files[level.file_name()].sha256, sha256_file(&path).unwrap());
    }
    assert_eq!(manifest.counts["district"], 8);
    assert_eq!(manifest.counts["country"], 1);
    assert_eq!(manifest.crs, "EPSG:4326");

    let on_disk: Manifest = serde_json::from_reader(File::open(dir.path().join(MANIFEST_FILE)).unwrap()).unwrap();
    assert_eq!(on_disk, manifest);
}

#[test]
fn features_carry_flat_properties() {
    let dir = tempfile::tempdir().unwrap();
    let levels = build_levels(&grid((116.0, 39.8), 0.1), &config_without_defects()).unwrap();
    write_levels(dir.path(), &levels).unwrap();

    let districts = read_json(&dir.path().join("cn_district.json"));
    let first = &districts["features"][0]["properties"];
    assert_eq!(first["district_adcode"], 110101);
    assert_eq!(first["city_adcode"], 110100);
    assert_eq!(first["province_name"], "北京市");

    let border = read_json(&dir.path().join("cn_border.json"));
    let country = &border["features"][0];
    assert_eq!(country["properties"]["country_name"], "中华人民共和国");
    assert_eq!(country["properties"]["country_adcode"], 100000);
    assert_eq!(country["geometry"]["type"], "Polygon");
}

#[test]
fn exteriors_are_counter_clockwise_and_holes_clockwise() {
    let dir = tempfile::tempdir().unwrap();
    let province = (440000, "广东省");
    let city = (440100, "广州市");
    // Outer ring written clockwise.
    let outer = "10.0,10.0;10.0,13.0;13.0,13.0;13.0,10.0";
    let raws = vec![
        raw(province, city, 440103, format!("{outer}|{}", square(11.0, 11.0, 12.0, 12.0))),
        raw(province, city, 440104, square(11.0, 11.0, 12.0, 12.0)),
    ];
    let levels = build_levels(&raws, &config_without_defects()).unwrap();
    write_levels(dir.path(), &levels).unwrap();

    let districts = read_json(&dir.path().join("cn_district.json"));
    let rings = districts["features"][0]["geometry"]["coordinates"].as_array().unwrap();
    assert_eq!(rings.len(), 2);
    assert!(signed_area(&ring_coords(&rings[0])) > 0.0);
    assert!(signed_area(&ring_coords(&rings[1])) < 0.0);

    for ring in rings {
        let coords = ring_coords(ring);
        assert_eq!(coords.first(), coords.last());
    }
}

#[test]
fn packages_written_levels() {
    let dir = tempfile::tempdir().unwrap();
    let levels = build_levels(&grid((116.0, 39.8), 0.1), &config_without_defects()).unwrap();
    write_levels(dir.path(), &levels).unwrap();

    let archive_path = package_levels(dir.path(), true).unwrap();
    assert_eq!(archive_path, dir.path().join(ARCHIVE_FILE));
    for level in Level::order() {
        assert!(!dir.path().join(level.file_name()).exists());
    }
    assert!(dir.path().join(MANIFEST_FILE).exists());

    let mut archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    assert_eq!(archive.len(), 5);
    let mut content = String::new();
    archive.by_name("cn_province.json").unwrap().read_to_string(&mut content).unwrap();
    let provinces: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(provinces["features"].as_array().unwrap().len(), 2);
}

#[test]
fn nine_line_travels_with_the_levels() {
    let dir = tempfile::tempdir().unwrap();
    let levels = build_levels(&grid((116.0, 39.8), 0.1), &config_without_defects()).unwrap();
    write_levels(dir.path(), &levels).unwrap();

    let outline = json!({
        "type": "FeatureCollection",
        "features": [{ "type": "Feature", "properties": {}, "geometry": {
            "type": "MultiPolygon",
            "coordinates": [[[[112.0, 10.0], [113.0, 10.0], [113.0, 10.2], [112.0, 10.0]]]]
        }}]
    });
    let nine_line = nine_line_from_collection(&outline, 6).unwrap();
    let written = write_nine_line(dir.path(), &nine_line).unwrap();
    assert_eq!(written, dir.path().join(NINE_LINE_FILE));

    let archive_path = package_levels(dir.path(), true).unwrap();
    assert!(dir.path().join(NINE_LINE_FILE).exists());

    let mut archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    assert_eq!(archive.len(), 6);
    let mut content = String::new();
    archive.by_name(NINE_LINE_FILE).unwrap().read_to_string(&mut content).unwrap();
    let bundled: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(bundled["features"][0]["properties"]["name"], "九段线");
}

#[test]
fn packaging_requires_every_level() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cn_district.json"), "{}").unwrap();
    assert!(matches!(package_levels(dir.path(), false), Err(AmapError::MissingData(_))));
    assert!(!dir.path().join(ARCHIVE_FILE).exists());
}

#[test]
fn raw_file_feeds_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(RAW_DISTRICT_FILE);
    write_raw_districts(&path, &grid((116.0, 39.8), 0.1)).unwrap();

    let raws = read_raw_districts(&path).unwrap();
    assert_eq!(raws.len(), 8);
    let levels = build_levels(&raws, &config_without_defects()).unwrap();
    assert_eq!(levels.province.len(), 2);
}
