//! AMap polyline strings.
//!
//! Longitude and latitude are separated by `,`, points by `;`, and pieces by
//! `|`. The vendor never stores holes: a polygon with holes, or a
//! multipolygon, arrives as several hole-free pieces whose union rebuilds it.

use geo::{unary_union, BooleanOps, BoundingRect, Contains, Coord, LineString, MultiPolygon, Polygon, Rect};

use crate::error::{AmapError, Result};
use crate::geom::{distinct_points, ensure_closed};

pub const PIECE_DELIMITER: char = '|';
pub const POINT_DELIMITER: char = ';';
pub const COORD_DELIMITER: char = ',';

fn parse_coord(token: &str) -> Option<Coord<f64>> {
    let mut parts = token.split(COORD_DELIMITER);
    let x: f64 = parts.next()?.trim().parse().ok()?;
    let y: f64 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() || !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Coord { x, y })
}

fn parse_piece(index: usize, piece: &str) -> Result<Polygon<f64>> {
    let mut coords = Vec::new();
    for token in piece.split(POINT_DELIMITER).map(str::trim).filter(|t| !t.is_empty()) {
        let coord = parse_coord(token).ok_or_else(|| {
            AmapError::Decode(format!("piece {index}: malformed coordinate pair {token:?}"))
        })?;
        coords.push(coord);
    }

    let distinct = distinct_points(&coords);
    if distinct < 3 {
        return Err(AmapError::Decode(format!(
            "piece {index}: {distinct} distinct points, a ring needs at least 3"
        )));
    }

    ensure_closed(&mut coords);
    Ok(Polygon::new(LineString(coords), vec![]))
}

/// Split a polyline into its simple (hole-free) pieces, in input order.
pub fn parse_pieces(polyline: &str) -> Result<Vec<Polygon<f64>>> {
    let polyline = polyline.trim();
    if polyline.is_empty() {
        return Err(AmapError::Decode("empty polyline".into()));
    }
    polyline.split(PIECE_DELIMITER)
        .enumerate()
        .map(|(i, piece)| parse_piece(i, piece))
        .collect()
}

#[inline]
fn rect_contains(outer: &Rect<f64>, inner: &Rect<f64>) -> bool {
    outer.min().x <= inner.min().x && outer.min().y <= inner.min().y
        && outer.max().x >= inner.max().x && outer.max().y >= inner.max().y
}

/// For each piece, the number of other pieces that contain it.
pub fn nesting_depths(pieces: &[Polygon<f64>]) -> Vec<usize> {
    let rects: Vec<Option<Rect<f64>>> = pieces.iter().map(|p| p.bounding_rect()).collect();

    (0..pieces.len()).map(|i| {
        (0..pieces.len())
            .filter(|&j| j != i)
            .filter(|&j| match (&rects[j], &rects[i]) {
                (Some(outer), Some(inner)) => rect_contains(outer, inner),
                _ => false,
            })
            .filter(|&j| pieces[j].contains(&pieces[i]))
            .count()
    }).collect()
}

/// Rebuild the true geometry from decoded pieces.
///
/// Pieces at the same nesting depth are unioned, so side-by-side or
/// overlapping pieces merge exactly as a plain union would. Successive depth
/// layers are combined by symmetric difference, which turns a piece nested
/// inside another into a hole.
pub fn assemble(pieces: &[Polygon<f64>]) -> MultiPolygon<f64> {
    let depths = nesting_depths(pieces);
    let max_depth = depths.iter().copied().max().unwrap_or(0);

    let layer = |depth: usize| -> MultiPolygon<f64> {
        unary_union(pieces.iter().zip(&depths).filter(|&(_, &d)| d == depth).map(|(p, _)| p))
    };

    let mut result = layer(0);
    for depth in 1..=max_depth {
        result = result.xor(&layer(depth));
    }
    result
}

/// Decode a polyline into one Polygon (single member) or MultiPolygon.
pub fn decode(polyline: &str) -> Result<MultiPolygon<f64>> {
    Ok(assemble(&parse_pieces(polyline)?))
}
