use geo::Rect;
use rstar::{RTreeObject, AABB};

pub(super) type Envelope = AABB<[f64; 2]>;

pub(super) trait ToEnvelope {
    fn to_envelope(&self) -> Envelope;
}

impl ToEnvelope for Rect<f64> {
    #[inline]
    fn to_envelope(&self) -> Envelope {
        AABB::from_corners(self.min().into(), self.max().into())
    }
}

/// R-tree entry for one coverage member, keyed by its position.
#[derive(Debug, Clone)]
pub(super) struct MemberBox {
    idx: usize,
    envelope: Envelope,
}

impl MemberBox {
    pub(super) fn new(idx: usize, rect: &Rect<f64>) -> Self {
        Self { idx, envelope: rect.to_envelope() }
    }

    #[inline] pub(super) fn idx(&self) -> usize { self.idx }
}

impl RTreeObject for MemberBox {
    type Envelope = Envelope;

    #[inline]
    fn envelope(&self) -> Envelope { self.envelope }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;
    use rstar::RTree;

    #[test]
    fn members_are_found_by_envelope() {
        let rects = [
            Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 }),
            Rect::new(coord! { x: 5.0, y: 5.0 }, coord! { x: 6.0, y: 6.0 }),
        ];
        let tree = RTree::bulk_load(rects.iter().enumerate().map(|(i, r)| MemberBox::new(i, r)).collect());

        let query = Rect::new(coord! { x: 0.5, y: 0.5 }, coord! { x: 2.0, y: 2.0 }).to_envelope();
        let hits: Vec<usize> = tree.locate_in_envelope_intersecting(&query).map(MemberBox::idx).collect();
        assert_eq!(hits, vec![0]);
    }
}
