use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Administrative division code, e.g. 360822 for a county, 360800 for its city.
///
/// Parents are taken from the vendor hierarchy rather than derived from the
/// digits: municipalities, Hong Kong, Macau, and Taiwan do not follow the
/// two-digit-per-level layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Adcode(pub u32);

impl fmt::Display for Adcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Adcode {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Adcode)
    }
}
