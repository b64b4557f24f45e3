use ahash::AHashSet;
use geo::{unary_union, Coord, LineString, MultiPolygon, Polygon};

/// Get the signed area of a closed coordinate list (positive when counter-clockwise).
pub fn signed_area(pts: &[Coord<f64>]) -> f64 {
    let mut a = 0.0;
    for w in pts.windows(2) {
        a += w[0].x * w[1].y - w[1].x * w[0].y;
    }
    a / 2.0
}

/// Ensure first and last are the same for geo::LineString coords.
pub fn ensure_closed(coords: &mut Vec<Coord<f64>>) {
    if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
        if first != last {
            coords.push(first)
        }
    }
}

/// Number of distinct vertices in an open or closed ring.
pub fn distinct_points(coords: &[Coord<f64>]) -> usize {
    coords.iter()
        .map(|c| (c.x.to_bits(), c.y.to_bits()))
        .collect::<AHashSet<_>>()
        .len()
}

/// Rewind a ring so its signed area has the requested sign.
fn wind(ring: LineString<f64>, counter_clockwise: bool) -> LineString<f64> {
    let mut coords = ring.0;
    ensure_closed(&mut coords);
    let area = signed_area(&coords);
    if (counter_clockwise && area < 0.0) || (!counter_clockwise && area > 0.0) {
        coords.reverse();
    }
    LineString(coords)
}

/// Right-hand rule: exterior counter-clockwise, holes clockwise.
pub fn orient_polygon(polygon: &Polygon<f64>) -> Polygon<f64> {
    let (exterior, interiors) = polygon.clone().into_inner();
    Polygon::new(
        wind(exterior, true),
        interiors.into_iter().map(|ring| wind(ring, false)).collect(),
    )
}

/// Orient every member independently.
pub fn orient(mp: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    MultiPolygon(mp.0.iter().map(orient_polygon).collect())
}

/// Replace every member by its exterior ring alone. Members that end up
/// nested (an enclave inside another member's hole) are merged.
pub fn fill_holes(mp: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    let shells: Vec<Polygon<f64>> = mp.0.iter()
        .map(|polygon| Polygon::new(polygon.exterior().clone(), vec![]))
        .collect();
    if shells.len() <= 1 {
        return MultiPolygon(shells);
    }
    unary_union(&shells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, Area};

    fn square_with_hole() -> Polygon<f64> {
        // Deliberately wrong winding on both rings.
        polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 0.0, y: 10.0), (x: 10.0, y: 10.0), (x: 10.0, y: 0.0)],
            interiors: [[(x: 2.0, y: 2.0), (x: 8.0, y: 2.0), (x: 8.0, y: 8.0), (x: 2.0, y: 8.0)]],
        )
    }

    #[test]
    fn signed_area_sign_follows_winding() {
        let ccw = [
            Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 }, Coord { x: 0.0, y: 0.0 },
        ];
        assert!((signed_area(&ccw) - 0.5).abs() < 1e-12);
        let mut cw = ccw;
        cw.reverse();
        assert!((signed_area(&cw) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn orient_applies_right_hand_rule() {
        let oriented = orient_polygon(&square_with_hole());
        assert!(signed_area(&oriented.exterior().0) > 0.0);
        for hole in oriented.interiors() {
            assert!(signed_area(&hole.0) < 0.0);
        }
        assert!((oriented.unsigned_area() - 64.0).abs() < 1e-9);
    }

    #[test]
    fn fill_holes_keeps_exterior_only() {
        let filled = fill_holes(&MultiPolygon(vec![square_with_hole()]));
        assert_eq!(filled.0.len(), 1);
        assert!(filled.0[0].interiors().is_empty());
        assert!((filled.unsigned_area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn fill_holes_absorbs_enclaves() {
        let enclave = polygon![(x: 4.0, y: 4.0), (x: 6.0, y: 4.0), (x: 6.0, y: 6.0), (x: 4.0, y: 6.0)];
        let filled = fill_holes(&MultiPolygon(vec![square_with_hole(), enclave]));
        assert_eq!(filled.0.len(), 1);
        assert!((filled.unsigned_area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn distinct_points_ignores_closing_vertex() {
        let ring = [
            Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 }, Coord { x: 0.0, y: 0.0 },
        ];
        assert_eq!(distinct_points(&ring), 2);
    }
}
