use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use crate::config::Config;
use crate::error::ScanError;
use crate::models::{OpenFoodFactsResponse, RawProduct};

const USER_AGENT: &str = concat!("scan-backend/", env!("CARGO_PKG_VERSION"));

/// Where product records come from.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetches the raw product for a barcode. Unknown products are
    /// `ScanError::NotFound`; transport failures are `ScanError::Upstream`.
    async fn fetch_product(&self, barcode: &str) -> Result<RawProduct, ScanError>;
}

/// Product source backed by the OpenFoodFacts v0 product API.
pub struct OpenFoodFactsClient {
    client: reqwest::Client,
    base_url: Url,
}

impl OpenFoodFactsClient {
    pub fn new(config: &Config) -> Result<Self, ScanError> {
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let base_url = Url::parse(&config.off_base_url).map_err(|e| {
            ScanError::Upstream(format!("invalid base URL {}: {}", config.off_base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ScanError::Upstream(format!(
                "invalid base URL {}: cannot have path segments",
                config.off_base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// `{base}/api/v0/product/{barcode}.json`, with the barcode escaped as a
    /// single path segment.
    pub fn product_url(&self, barcode: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "v0", "product"])
                .push(&format!("{barcode}.json"));
        }
        url
    }
}

#[async_trait]
impl ProductSource for OpenFoodFactsClient {
    async fn fetch_product(&self, barcode: &str) -> Result<RawProduct, ScanError> {
        let url = self.product_url(barcode);
        log::debug!("Requesting {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<OpenFoodFactsResponse>()
            .await?;

        into_product(response)
    }
}

fn into_product(response: OpenFoodFactsResponse) -> Result<RawProduct, ScanError> {
    if !response.is_found() {
        return Err(ScanError::NotFound);
    }

    Ok(response
        .product
        .unwrap_or_else(|| Value::Object(Default::default()))
        .into())
}
