//! # Sanity Configuration
//!
//! Project, dataset, and API settings for the Sanity query API.

use cart_core::CheckoutError;
use std::env;

const DEFAULT_DATASET: &str = "production";
const DEFAULT_API_VERSION: &str = "2022-03-10";

/// Sanity API configuration
#[derive(Debug, Clone)]
pub struct SanityConfig {
    /// Project ID (e.g., "vfxfwnaw")
    pub project_id: String,

    /// Dataset name
    pub dataset: String,

    /// Dated API version, without the leading `v`
    pub api_version: String,

    /// Read token for private datasets
    pub token: Option<String>,

    /// Query the edge-cached API instead of the live one
    pub use_cdn: bool,

    /// Override for the API host (for testing/mocking)
    pub api_base_url: Option<String>,
}

impl SanityConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `Ok(None)` when `SANITY_PROJECT_ID` is not set, so callers can
    /// fall back to a static catalog.
    pub fn from_env() -> Result<Option<Self>, CheckoutError> {
        dotenvy::dotenv().ok();

        let project_id = match env::var("SANITY_PROJECT_ID") {
            Ok(id) if !id.trim().is_empty() => id,
            _ => return Ok(None),
        };

        let mut config = Self::new(project_id);

        if let Ok(dataset) = env::var("SANITY_DATASET") {
            if !dataset.is_empty() {
                config.dataset = dataset;
            }
        }
        if let Ok(version) = env::var("SANITY_API_VERSION") {
            if !version.is_empty() {
                config = config.with_api_version(version);
            }
        }
        config.token = env::var("SANITY_TOKEN").ok().filter(|t| !t.is_empty());
        config.use_cdn = env::var("SANITY_USE_CDN")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        config.validate()?;
        Ok(Some(config))
    }

    /// Create config for a project with default dataset and API version
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: DEFAULT_DATASET.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            token: None,
            use_cdn: false,
            api_base_url: None,
        }
    }

    /// Project IDs and datasets end up in hostnames and paths
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let valid = |s: &str| {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };

        if !valid(&self.project_id) {
            return Err(CheckoutError::Configuration(format!(
                "Invalid SANITY_PROJECT_ID: {}",
                self.project_id
            )));
        }
        if !valid(&self.dataset) {
            return Err(CheckoutError::Configuration(format!(
                "Invalid SANITY_DATASET: {}",
                self.dataset
            )));
        }
        Ok(())
    }

    /// Builder: set dataset
    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = dataset.into();
        self
    }

    /// Builder: set API version (accepts `v2021-10-21` or `2021-10-21`)
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        let version: String = version.into();
        self.api_version = version.trim_start_matches('v').to_string();
        self
    }

    /// Builder: set read token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into().trim_end_matches('/').to_string());
        self
    }

    /// GROQ query endpoint for the configured dataset
    pub fn query_url(&self) -> String {
        let base = match &self.api_base_url {
            Some(url) => url.clone(),
            None => {
                let host = if self.use_cdn { "apicdn" } else { "api" };
                format!("https://{}.{}.sanity.io", self.project_id, host)
            }
        };
        format!("{}/v{}/data/query/{}", base, self.api_version, self.dataset)
    }

    /// Base URL image asset IDs resolve against
    pub fn image_cdn_base(&self) -> String {
        format!(
            "https://cdn.sanity.io/images/{}/{}",
            self.project_id, self.dataset
        )
    }
}
