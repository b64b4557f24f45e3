#![doc = "Topologically consistent China administrative boundaries from AMap polylines"]
pub mod amap;
mod common;
mod config;
mod error;
pub mod geom;
pub mod output;
pub mod pipeline;
mod types;

#[doc(inline)]
pub use common::{ensure_dir_exists, require_dir_exists, require_file_exists};

#[doc(inline)]
pub use config::{PipelineConfig, DEFAULT_DEFECTIVE_ADCODES};

#[doc(inline)]
pub use error::{AmapError, Result};

#[doc(inline)]
pub use types::{
    Adcode, AdminRecord, CityProperties, CountryProperties, DistrictProperties, Layer, Level,
    Properties, ProvinceProperties,
};

#[doc(inline)]
pub use pipeline::{build_levels, Levels};

#[doc(inline)]
pub use output::{package_levels, write_levels, Manifest};
