mod adcode;
mod level;
mod record;

pub use adcode::Adcode;
pub use level::Level;
pub use record::{
    AdminRecord, CityProperties, CountryProperties, DistrictProperties, Layer, Properties,
    ProvinceProperties,
};
