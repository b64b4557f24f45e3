//! Code specific to the AMap web service: polyline encoding and the district
//! tree with its naming rules. The fetch client and the DataV nine-dash line
//! live here too.

#[cfg(feature = "download")]
mod client;
mod district;
mod names;
mod nine_line;
mod polyline;
mod raw;
mod retry;

#[cfg(feature = "download")]
pub use client::{AmapClient, DISTRICT_URL};
pub use district::{flatten_district_tree, DistrictLevel, DistrictNode, DistrictResponse};
pub use names::{shorten_city_name, shorten_district_name, shorten_province_name};
pub use nine_line::{nine_line_from_collection, write_nine_line, NINE_LINE_URL};
pub use polyline::{assemble, decode, nesting_depths, parse_pieces};
pub use raw::{read_raw_districts, write_raw_districts, RawDistrict, RAW_DISTRICT_FILE};
pub use retry::RetryPolicy;
