use std::collections::{BTreeMap, BTreeSet};

use geo::{unary_union, Area, BooleanOps, BoundingRect, Intersects, MultiPolygon, Relate, Validation};
use rstar::RTree;

use super::{
    bbox::{MemberBox, ToEnvelope},
    ring::fill_holes,
};

/// Outcome of checking a set of polygons against the coverage rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    /// Members that are empty or fail the simplicity check.
    pub invalid: Vec<usize>,
    /// Member pairs `(i, j)`, `i < j`, whose interiors intersect.
    pub overlaps: Vec<(usize, usize)>,
}

impl CoverageReport {
    #[inline] pub fn is_valid(&self) -> bool { self.invalid.is_empty() && self.overlaps.is_empty() }

    /// Every member involved in any violation, sorted.
    pub fn offenders(&self) -> Vec<usize> {
        let mut out: Vec<usize> = self.invalid.iter().copied()
            .chain(self.overlaps.iter().flat_map(|&(i, j)| [i, j]))
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }
}

/// A set of polygons meant to tile a region without overlaps, with an
/// R-tree over member bounding boxes for neighbor queries.
#[derive(Debug, Clone)]
pub struct Coverage {
    shapes: Vec<MultiPolygon<f64>>,
    rtree: RTree<MemberBox>,
}

impl Coverage {
    /// Construct a Coverage from a vector of MultiPolygons. Empty members get
    /// no R-tree entry and never appear as neighbors.
    pub fn new(shapes: Vec<MultiPolygon<f64>>) -> Self {
        Self {
            rtree: RTree::bulk_load(
                shapes.iter().enumerate()
                    .filter_map(|(i, shape)| shape.bounding_rect().map(|rect| MemberBox::new(i, &rect)))
                    .collect()
            ),
            shapes,
        }
    }

    /// Get the number of members.
    #[inline] pub fn len(&self) -> usize { self.shapes.len() }

    /// Check if there are no members.
    #[inline] pub fn is_empty(&self) -> bool { self.shapes.is_empty() }

    /// Get a reference to the list of MultiPolygons.
    #[inline] pub fn shapes(&self) -> &[MultiPolygon<f64>] { &self.shapes }

    #[inline] pub fn into_shapes(self) -> Vec<MultiPolygon<f64>> { self.shapes }

    /// Non-empty and simple, with holes properly nested.
    #[inline]
    pub fn is_valid_member(&self, idx: usize) -> bool {
        let shape = &self.shapes[idx];
        !shape.0.is_empty() && shape.is_valid()
    }

    /// Members other than `exclude` whose geometry intersects `shape`
    /// (boundary contact included), in index order.
    pub fn intersecting(&self, shape: &MultiPolygon<f64>, exclude: Option<usize>) -> Vec<usize> {
        let Some(rect) = shape.bounding_rect() else { return Vec::new() };
        let mut out: Vec<usize> = self.rtree.locate_in_envelope_intersecting(&rect.to_envelope())
            .map(|bb| bb.idx())
            .filter(|&j| Some(j) != exclude)
            .filter(|&j| self.shapes[j].intersects(shape))
            .collect();
        out.sort_unstable();
        out
    }

    /// Members touching or overlapping member `idx`.
    #[inline]
    pub fn neighbors(&self, idx: usize) -> Vec<usize> {
        self.intersecting(&self.shapes[idx], Some(idx))
    }

    /// All member pairs whose interiors intersect.
    /// Pure boundary touches (edge or point) are NOT considered overlaps.
    pub fn overlaps(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for i in 0..self.shapes.len() {
            let Some(rect) = self.shapes[i].bounding_rect() else { continue };

            for cand in self.rtree.locate_in_envelope_intersecting(&rect.to_envelope()) {
                let j = cand.idx();
                if j <= i { continue; } // check each unordered pair once

                // One relate() call gives the full DE-9IM:
                let im = self.shapes[i].relate(&self.shapes[j]);

                // Overlap (including containment/equality) = intersects but not merely touching.
                if im.is_intersects() && !im.is_touches() {
                    pairs.push((i, j));
                }
            }
        }
        pairs.sort_unstable();
        pairs
    }

    /// Run every check without mutating anything.
    pub fn check(&self) -> CoverageReport {
        CoverageReport {
            invalid: (0..self.len()).filter(|&i| !self.is_valid_member(i)).collect(),
            overlaps: self.overlaps(),
        }
    }

    #[inline] pub fn is_valid_coverage(&self) -> bool { self.check().is_valid() }

    /// Uncovered pockets bordering member `idx` that the members within two
    /// neighbor steps of it close off. Pockets smaller than one grid cell at
    /// `precision` are ignored.
    pub fn enclosed_gaps(&self, idx: usize, precision: u32) -> MultiPolygon<f64> {
        let member = &self.shapes[idx];
        let mut nearby: BTreeSet<usize> = BTreeSet::from([idx]);
        for j in self.neighbors(idx) {
            nearby.insert(j);
            nearby.extend(self.neighbors(j));
        }
        let local = unary_union(nearby.iter().map(|&j| &self.shapes[j]));
        let pockets = fill_holes(&local).difference(&local);
        if pockets.0.is_empty() {
            return pockets;
        }

        let fillers = self.intersecting(&pockets, Some(idx));
        let uncovered = if fillers.is_empty() {
            pockets
        } else {
            pockets.difference(&unary_union(fillers.iter().map(|&j| &self.shapes[j])))
        };

        let min_area = 10f64.powi(-2 * precision as i32);
        MultiPolygon(uncovered.0.into_iter()
            .filter(|pocket| pocket.unsigned_area() >= min_area && pocket.intersects(member))
            .collect())
    }
}

/// Group `members` by key and return the keys whose members do not form a
/// valid coverage, in key order.
pub fn invalid_groups<K: Ord + Clone>(
    members: impl IntoIterator<Item = (K, MultiPolygon<f64>)>,
) -> Vec<K> {
    let mut groups: BTreeMap<K, Vec<MultiPolygon<f64>>> = BTreeMap::new();
    for (key, shape) in members {
        groups.entry(key).or_default().push(shape);
    }
    groups.into_iter()
        .filter(|(_, shapes)| !Coverage::new(shapes.clone()).is_valid_coverage())
        .map(|(key, _)| key)
        .collect()
}
