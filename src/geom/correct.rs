//! GCJ-02 ("Mars coordinates") to WGS-84 correction.
//!
//! AMap serves coordinates offset by the public GCJ-02 obfuscation. The
//! forward direction (WGS-84 -> GCJ-02) has a closed form; the inverse is
//! found by fixed-point iteration on the forward transform, starting from the
//! usual one-step approximation.

use std::f64::consts::PI;

use geo::{Coord, MapCoords};

/// Krasovsky 1940 semi-major axis and eccentricity squared.
const A: f64 = 6378245.0;
const EE: f64 = 0.006_693_421_622_965_943;

/// Stop iterating once the forward image is this close (degrees).
const INVERSE_EPS: f64 = 1e-10;
const INVERSE_MAX_ITER: usize = 10;

/// Rough bounding box outside which GCJ-02 leaves coordinates untouched.
#[inline]
fn outside_china(c: Coord<f64>) -> bool {
    !(72.004..=137.8347).contains(&c.x) || !(0.8293..=55.8271).contains(&c.y)
}

fn offset_lat(x: f64, y: f64) -> f64 {
    let mut ret = -100.0 + 2.0 * x + 3.0 * y + 0.2 * y * y + 0.1 * x * y + 0.2 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (y * PI).sin() + 40.0 * (y / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (160.0 * (y / 12.0 * PI).sin() + 320.0 * (y * PI / 30.0).sin()) * 2.0 / 3.0;
    ret
}

fn offset_lon(x: f64, y: f64) -> f64 {
    let mut ret = 300.0 + x + 2.0 * y + 0.1 * x * x + 0.1 * x * y + 0.1 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (x * PI).sin() + 40.0 * (x / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (150.0 * (x / 12.0 * PI).sin() + 300.0 * (x / 30.0 * PI).sin()) * 2.0 / 3.0;
    ret
}

/// Forward transform, WGS-84 (lon, lat) to GCJ-02.
pub fn wgs_to_gcj(wgs: Coord<f64>) -> Coord<f64> {
    if outside_china(wgs) { return wgs }

    let (x, y) = (wgs.x - 105.0, wgs.y - 35.0);
    let rad_lat = wgs.y / 180.0 * PI;
    let magic = 1.0 - EE * rad_lat.sin() * rad_lat.sin();
    let sqrt_magic = magic.sqrt();

    let d_lat = (offset_lat(x, y) * 180.0) / ((A * (1.0 - EE)) / (magic * sqrt_magic) * PI);
    let d_lon = (offset_lon(x, y) * 180.0) / (A / sqrt_magic * rad_lat.cos() * PI);

    Coord { x: wgs.x + d_lon, y: wgs.y + d_lat }
}

/// Inverse transform, GCJ-02 (lon, lat) to WGS-84, accurate well below 1e-6 degrees.
pub fn gcj_to_wgs(gcj: Coord<f64>) -> Coord<f64> {
    if outside_china(gcj) { return gcj }

    // One-step approximation, then refine until the forward image matches.
    let mut curr = gcj - (wgs_to_gcj(gcj) - gcj);
    for _ in 0..INVERSE_MAX_ITER {
        let diff = wgs_to_gcj(curr) - gcj;
        curr = curr - diff;
        if diff.x.abs().max(diff.y.abs()) <= INVERSE_EPS { break }
    }
    curr
}

/// Round a value to `precision` decimal digits.
#[inline]
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

#[inline]
pub fn round_coord(c: Coord<f64>, precision: u32) -> Coord<f64> {
    Coord { x: round_to(c.x, precision), y: round_to(c.y, precision) }
}

/// Round every vertex of any geometry to `precision` decimal digits.
pub fn round_geometry<G>(geometry: &G, precision: u32) -> G::Output
where
    G: MapCoords<f64, f64>,
{
    geometry.map_coords(move |c| round_coord(c, precision))
}

/// Correct every vertex from GCJ-02 to WGS-84, rounding after the transform.
/// Ring structure, point count, and point order are preserved.
pub fn gcj_geometry_to_wgs<G>(geometry: &G, precision: u32) -> G::Output
where
    G: MapCoords<f64, f64>,
{
    geometry.map_coords(move |c| round_coord(gcj_to_wgs(c), precision))
}

/// Whether every coordinate already sits on the `precision` grid.
pub fn is_on_grid(coords: impl IntoIterator<Item = Coord<f64>>, precision: u32) -> bool {
    coords.into_iter().all(|c| round_coord(c, precision) == c)
}
