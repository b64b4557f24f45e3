/// Administrative hierarchy level, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Country,    // Highest-level entity
    Province,   // Province -> Country
    City,       // City -> Province
    District,   // Lowest-level entity
}

impl Level {
    pub fn to_str(&self) -> &'static str {
        match self {
            Level::Country => "country",
            Level::Province => "province",
            Level::City => "city",
            Level::District => "district",
        }
    }

    /// Output file name for the level's FeatureCollection.
    pub fn file_name(&self) -> &'static str {
        match self {
            Level::Country => "cn_border.json",
            Level::Province => "cn_province.json",
            Level::City => "cn_city.json",
            Level::District => "cn_district.json",
        }
    }

    /// The level this one dissolves into, if any.
    pub fn parent(&self) -> Option<Level> {
        match self {
            Level::Country => None,
            Level::Province => Some(Level::Country),
            Level::City => Some(Level::Province),
            Level::District => Some(Level::City),
        }
    }

    /// Levels in aggregation order (bottom-up).
    pub fn order() -> [Level; 4] {
        [
            Level::District,
            Level::City,
            Level::Province,
            Level::Country,
        ]
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}
