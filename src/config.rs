//! Client configuration.
//!
//! Everything the store client and the listing display need is carried in
//! one [`Config`] value built at startup and passed down explicitly.

use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use chrono::FixedOffset;

/// Keys per `ListObjectsV2` response; also the service maximum.
pub const DEFAULT_PAGE_SIZE: i32 = 1000;

const FALLBACK_REGION: &str = "us-east-1";

#[derive(Debug, Clone)]
pub struct Config {
    /// AWS region; falls back to the default provider chain, then `us-east-1`.
    pub region: Option<String>,

    /// Custom endpoint URL for S3-compatible stores.
    pub endpoint: Option<String>,

    /// Named profile from the shared AWS config files.
    pub profile: Option<String>,

    /// Static credentials, used only when both halves are present.
    pub access_key: Option<String>,
    pub secret_key: Option<String>,

    /// Maximum keys requested per listing page.
    pub page_size: i32,

    /// Offset used when displaying timestamps; UTC when unset.
    pub utc_offset: Option<FixedOffset>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: None,
            endpoint: None,
            profile: None,
            access_key: None,
            secret_key: None,
            page_size: DEFAULT_PAGE_SIZE,
            utc_offset: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set the page size, clamped to `1..=1000`.
    pub fn with_page_size(mut self, page_size: i32) -> Self {
        self.page_size = page_size.clamp(1, DEFAULT_PAGE_SIZE);
        self
    }

    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = Some(offset);
        self
    }

    /// Build an S3 client.
    pub async fn s3_client(&self) -> aws_sdk_s3::Client {
        let region_provider = RegionProviderChain::first_try(self.region.clone().map(Region::new))
            .or_default_provider()
            .or_else(FALLBACK_REGION);

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);

        if let Some(endpoint) = &self.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        if let (Some(access_key), Some(secret_key)) = (&self.access_key, &self.secret_key) {
            let credentials = Credentials::new(access_key, secret_key, None, None, "s3ls");
            loader = loader.credentials_provider(credentials);
        }

        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }

        let sdk_config = loader.load().await;

        // Most S3-compatible stores only speak path-style addressing.
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(self.endpoint.is_some())
            .build();

        aws_sdk_s3::Client::from_conf(s3_config)
    }
}
