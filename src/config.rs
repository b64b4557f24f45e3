use std::{fs::File, io::BufReader, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{error::{AmapError, Result}, types::Adcode};

/// Known vendor defects: 江西省吉安市吉水县 and 宜春市高安市 overlap their neighbors.
pub const DEFAULT_DEFECTIVE_ADCODES: [u32; 2] = [360822, 360983];

/// Settings threaded through every pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Decimal digits kept after coordinate correction (6 ~ 0.11 m).
    pub precision: u32,

    /// Units repaired from their neighbors instead of their own polylines.
    pub defective_adcodes: Vec<Adcode>,

    /// Pause between consecutive district fetches.
    pub request_delay_ms: u64,

    /// Attempts per request when the API reports a transient failure.
    pub max_attempts: u32,

    /// Pause between transient-failure retries.
    pub retry_delay_ms: u64,

    pub country_name: String,
    pub country_adcode: Adcode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            precision: 6,
            defective_adcodes: DEFAULT_DEFECTIVE_ADCODES.iter().copied().map(Adcode).collect(),
            request_delay_ms: 250,
            max_attempts: 5,
            retry_delay_ms: 1000,
            country_name: "中华人民共和国".to_string(),
            country_adcode: Adcode(100000),
        }
    }
}

impl PipelineConfig {
    /// Read a JSON config file; absent fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.precision > 15 {
            return Err(AmapError::Config(format!(
                "precision must be at most 15 decimal digits, got {}", self.precision
            )));
        }
        if self.max_attempts == 0 {
            return Err(AmapError::Config("max_attempts must be at least 1".into()));
        }
        let mut codes = self.defective_adcodes.clone();
        codes.sort();
        if codes.windows(2).any(|w| w[0] == w[1]) {
            return Err(AmapError::Config("defective_adcodes contains duplicates".into()));
        }
        Ok(())
    }

    #[inline] pub fn request_delay(&self) -> Duration { Duration::from_millis(self.request_delay_ms) }

    #[inline] pub fn retry_delay(&self) -> Duration { Duration::from_millis(self.retry_delay_ms) }
}
