mod bbox;
mod correct;
mod coverage;
mod dissolve;
mod repair;
mod ring;

pub use correct::{gcj_geometry_to_wgs, gcj_to_wgs, is_on_grid, round_coord, round_geometry, round_to, wgs_to_gcj};
pub use coverage::{invalid_groups, Coverage, CoverageReport};
pub use dissolve::dissolve;
pub use repair::repair_member;
pub use ring::{distinct_points, ensure_closed, fill_holes, orient, orient_polygon, signed_area};
