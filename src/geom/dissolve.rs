use geo::{unary_union, Area, MultiPolygon, Polygon};

use super::correct::round_geometry;

/// Drop members and holes that enclose no area.
fn drop_degenerate(mp: MultiPolygon<f64>) -> MultiPolygon<f64> {
    MultiPolygon(mp.0.into_iter()
        .filter(|polygon| Polygon::new(polygon.exterior().clone(), vec![]).unsigned_area() > 0.0)
        .map(|polygon| {
            let (exterior, interiors) = polygon.into_inner();
            let interiors = interiors.into_iter()
                .filter(|ring| Polygon::new(ring.clone(), vec![]).unsigned_area() > 0.0)
                .collect();
            Polygon::new(exterior, interiors)
        })
        .collect())
}

/// Coverage-aware dissolve: union the members, drop zero-area rings left
/// along the shared edges, then snap the result back onto the precision grid.
pub fn dissolve<'a>(shapes: impl IntoIterator<Item = &'a MultiPolygon<f64>>, precision: u32) -> MultiPolygon<f64> {
    let unioned = unary_union(shapes);
    round_geometry(&drop_degenerate(unioned), precision)
}
