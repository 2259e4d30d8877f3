//! Postal-code to place lookup.
//!
//! Best-effort enrichment: any failure (malformed code, transport error, non-2xx status,
//! unexpected body, no places) yields `None` and is only logged at debug level.

use serde::Deserialize;

use ctomop_core::validate_zip_code;

use crate::{ClientConfig, ClientError, ClientResult};

/// City and region resolved from a postal code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Place {
    pub city: String,
    pub region: String,
}

#[derive(Deserialize)]
struct ZipLookupRes {
    #[serde(default)]
    places: Vec<ZipPlace>,
}

#[derive(Deserialize)]
struct ZipPlace {
    #[serde(rename = "place name")]
    place_name: String,
    #[serde(default)]
    state: String,
}

#[derive(Clone, Debug)]
pub struct ZipLookup {
    http: reqwest::Client,
    base_url: String,
}

impl ZipLookup {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Standalone lookup with its own HTTP client and no session cookies.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(ClientError::Http)?;
        Ok(Self::new(http, config.zip_lookup_url()))
    }

    /// Looks up the first place for `zip`. Only well-formed five-digit codes hit the network.
    pub async fn lookup(&self, zip: &str) -> Option<Place> {
        let zip = match validate_zip_code(zip) {
            Ok(zip) => zip,
            Err(e) => {
                tracing::debug!(error = %e, "skipping zip lookup");
                return None;
            }
        };

        let url = format!("{}/{}", self.base_url, zip);
        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(%zip, error = %e, "zip lookup request failed");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::debug!(%zip, status = %response.status(), "zip lookup returned no match");
            return None;
        }

        let body: ZipLookupRes = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(%zip, error = %e, "zip lookup returned an unexpected body");
                return None;
            }
        };

        body.places.into_iter().next().map(|place| Place {
            city: place.place_name,
            region: place.state,
        })
    }
}
