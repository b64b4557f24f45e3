use geo::{unary_union, BooleanOps, ConvexHull, Intersects, MultiPolygon, Polygon, Relate};

use super::{correct::round_geometry, coverage::Coverage, ring::fill_holes};

/// Pockets of `region` that share interior with `defective`.
fn under(region: MultiPolygon<f64>, defective: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    MultiPolygon(region.0.into_iter()
        .filter(|pocket| pocket.intersects(defective) && !pocket.relate(defective).is_touches())
        .collect())
}

/// Rebuild member `idx` of `coverage` from the neighbors it overlaps.
///
/// The gap the neighbors leave is taken from the holes of their union. When
/// no hole lies under the defective polygon (a unit on a strip, or on the
/// edge of the covered area), the bays between the union and its convex hull
/// are used instead. Only pockets under the defective polygon are kept, and
/// so is whatever part of the polygon no neighbor claims.
///
/// When the polygon has no enclaves, neighbor holes are filled first, so a
/// neighbor that itself wraps around the defect would swallow it.
/// Returns `None` when nothing is left.
pub fn repair_member(coverage: &Coverage, idx: usize, precision: u32) -> Option<MultiPolygon<f64>> {
    let defective = &coverage.shapes()[idx];
    let neighbors = coverage.neighbors(idx);

    let mut adjacent: Vec<MultiPolygon<f64>> = neighbors.iter()
        .map(|&j| coverage.shapes()[j].clone())
        .collect();
    if defective.0.len() == 1 {
        adjacent = adjacent.iter().map(fill_holes).collect();
    }

    let unioned = unary_union(&adjacent);
    let mut gap = under(fill_holes(&unioned).difference(&unioned), defective);
    if gap.0.is_empty() && !unioned.0.is_empty() {
        let hull: Polygon<f64> = unioned.convex_hull();
        gap = under(MultiPolygon(vec![hull]).difference(&unioned), defective);
    }

    let unclaimed = defective.difference(&unioned);
    let repaired = round_geometry(&gap.union(&unclaimed), precision);

    (!repaired.0.is_empty()).then_some(repaired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, Area, BoundingRect};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![(x: x0, y: y0), (x: x1, y: y0), (x: x1, y: y1), (x: x0, y: y1)]])
    }

    fn assert_unit_square_at(mp: &MultiPolygon<f64>, x0: f64, y0: f64) {
        assert!((mp.unsigned_area() - 1.0).abs() < 1e-9, "area {}", mp.unsigned_area());
        let bbox = mp.bounding_rect().unwrap();
        assert!((bbox.min().x - x0).abs() < 1e-9 && (bbox.min().y - y0).abs() < 1e-9);
        assert!((bbox.max().x - x0 - 1.0).abs() < 1e-9 && (bbox.max().y - y0 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn strip_middle_overlapping_both_neighbors() {
        let coverage = Coverage::new(vec![
            rect(0.0, 0.0, 1.0, 1.0),
            rect(0.6, 0.0, 2.4, 1.0),
            rect(2.0, 0.0, 3.0, 1.0),
        ]);
        assert!(!coverage.is_valid_coverage());

        let repaired = repair_member(&coverage, 1, 6).unwrap();
        assert_unit_square_at(&repaired, 1.0, 0.0);

        let mut shapes = coverage.into_shapes();
        shapes[1] = repaired;
        assert!(Coverage::new(shapes).is_valid_coverage());
    }

    #[test]
    fn strip_middle_shrunk_across_and_overlapping_both_neighbors() {
        let coverage = Coverage::new(vec![
            rect(0.0, 0.0, 1.0, 1.0),
            rect(0.9, 0.1, 2.1, 0.9),
            rect(2.0, 0.0, 3.0, 1.0),
        ]);
        assert!(!coverage.is_valid_coverage());

        let repaired = repair_member(&coverage, 1, 6).unwrap();
        assert_unit_square_at(&repaired, 1.0, 0.0);

        let mut shapes = coverage.into_shapes();
        shapes[1] = repaired;
        let coverage = Coverage::new(shapes);
        assert!(coverage.is_valid_coverage());
        assert!(coverage.enclosed_gaps(1, 6).0.is_empty());
    }

    #[test]
    fn surrounded_center_is_recovered_from_neighbors() {
        let mut shapes = Vec::new();
        for x in 0..3 {
            for y in 0..3 {
                if (x, y) != (1, 1) {
                    shapes.push(rect(x as f64, y as f64, x as f64 + 1.0, y as f64 + 1.0));
                }
            }
        }
        // Corrupted outline bleeding into all eight neighbors.
        shapes.push(rect(0.9, 0.9, 2.1, 2.1));
        let idx = shapes.len() - 1;
        let coverage = Coverage::new(shapes);

        let repaired = repair_member(&coverage, idx, 6).unwrap();
        assert_unit_square_at(&repaired, 1.0, 1.0);
    }

    #[test]
    fn isolated_member_repairs_to_nothing_outside_its_own_shape() {
        let coverage = Coverage::new(vec![rect(0.0, 0.0, 1.0, 1.0), rect(5.0, 5.0, 6.0, 6.0)]);
        let repaired = repair_member(&coverage, 1, 6).unwrap();
        assert!((repaired.unsigned_area() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn fully_covered_member_repairs_to_none() {
        let coverage = Coverage::new(vec![rect(0.0, 0.0, 4.0, 4.0), rect(1.0, 1.0, 2.0, 2.0)]);
        assert!(repair_member(&coverage, 1, 6).is_none());
    }
}
