use std::{thread, time::Duration};

use reqwest::blocking::Client;

use crate::{
    config::PipelineConfig,
    error::{AmapError, Result},
    types::{Adcode, DistrictProperties},
};

use super::{
    district::{flatten_district_tree, DistrictResponse},
    raw::RawDistrict,
    retry::RetryPolicy,
};

pub const DISTRICT_URL: &str = "https://restapi.amap.com/v3/config/district";

/// Blocking client for the AMap district-query API.
pub struct AmapClient {
    pub(super) http: Client,
    key: String,
    retry: RetryPolicy,
    request_delay: Duration,
}

impl AmapClient {
    pub fn new(key: impl Into<String>, config: &PipelineConfig) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(AmapError::Config("an AMap key is required (--key or AMAP_KEY)".into()));
        }
        let http = Client::builder()
            .user_agent(concat!("amapshp/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            http,
            key,
            retry: RetryPolicy::from_config(config),
            request_delay: config.request_delay(),
        })
    }

    fn query(&self, params: &[(&str, &str)]) -> Result<DistrictResponse> {
        self.retry.run(|| {
            let response: DistrictResponse = self.http.get(DISTRICT_URL)
                .query(&[("key", self.key.as_str())])
                .query(params)
                .send()?
                .error_for_status()?
                .json()?;
            response.check_status()
        })
    }

    /// Every district-level unit of the country, sorted by adcode.
    pub fn district_list(&self) -> Result<Vec<DistrictProperties>> {
        let response = self.query(&[("subdistrict", "3")])?;
        flatten_district_tree(&response)
    }

    /// The GCJ-02 boundary polyline of one unit.
    pub fn district_polyline(&self, adcode: Adcode) -> Result<String> {
        let code = adcode.to_string();
        let response = self.query(&[
            ("keywords", code.as_str()),
            ("subdistrict", "0"),
            ("extensions", "all"),
            ("filter", code.as_str()),
        ])?;

        response.single_polyline(adcode)
    }

    /// Fetch the district list, then each district's polyline in turn,
    /// pausing between requests.
    pub fn fetch_raw_districts(&self) -> Result<Vec<RawDistrict>> {
        let list = self.district_list()?;
        log::info!("district list has {} units", list.len());

        let mut out = Vec::with_capacity(list.len());
        for (i, properties) in list.into_iter().enumerate() {
            if i > 0 {
                thread::sleep(self.request_delay);
            }
            let polyline = self.district_polyline(properties.district_adcode)?;
            log::debug!(
                "fetched {} {} {} ({})",
                properties.province_name, properties.city_name, properties.district_name,
                properties.district_adcode,
            );
            out.push(RawDistrict { properties, polyline: Some(polyline) });
        }
        log::info!("downloaded {} district polylines", out.len());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_a_config_error() {
        let config = PipelineConfig::default();
        assert!(matches!(AmapClient::new("  ", &config), Err(AmapError::Config(_))));
        assert!(AmapClient::new("abc123", &config).is_ok());
    }
}
