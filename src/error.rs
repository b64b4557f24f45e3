use thiserror::Error;

use crate::types::Adcode;

/// Errors raised while fetching, decoding, validating, or writing boundaries.
#[derive(Debug, Error)]
pub enum AmapError {
    /// The web API answered with `status == "0"`; retried by the fetch client.
    #[error("transient AMap failure: info='{info}', infocode='{infocode}'")]
    TransientSource { info: String, infocode: String },

    /// A unit was not found, or was found without boundary data.
    #[error("missing data: {0}")]
    MissingData(String),

    /// Malformed polyline or unexpected vendor payload.
    #[error("decode error: {0}")]
    Decode(String),

    /// A polygon failed the simplicity check, or a coverage has interior overlaps.
    #[error("invalid geometry at {stage}: {}", fmt_keys(.keys))]
    GeometryInvalid { stage: String, keys: Vec<String> },

    /// A registered defective unit was repaired but the coverage is still invalid.
    #[error("repair failed for adcode {adcode}: {reason}")]
    RepairFailed { adcode: Adcode, reason: String },

    /// Registered defective units that no longer overlap anything.
    #[error("defective-unit list is stale, these adcodes are valid: {}", fmt_keys(.adcodes))]
    StaleDefectList { adcodes: Vec<Adcode> },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    #[cfg(feature = "download")]
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T, E = AmapError> = std::result::Result<T, E>;

impl AmapError {
    pub(crate) fn invalid<K: ToString>(stage: &str, keys: impl IntoIterator<Item = K>) -> Self {
        Self::GeometryInvalid {
            stage: stage.to_string(),
            keys: keys.into_iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Whether the fetch client should retry after this error.
    #[inline] pub fn is_transient(&self) -> bool { matches!(self, Self::TransientSource { .. }) }
}

fn fmt_keys<K: std::fmt::Display>(keys: &[K]) -> String {
    keys.iter().map(|k| k.to_string()).collect::<Vec<_>>().join(", ")
}
