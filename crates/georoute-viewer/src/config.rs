//! Viewer configuration from environment.

use std::env;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GEOROUTE_IDENTITY_POOL_ID is not set; route requests cannot be authorized")]
    MissingIdentityPoolId,
    #[error("GEOROUTE_API_KEY is not set; the map style cannot be loaded")]
    MissingApiKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub region: String,
    pub map_style: String,
    pub api_key: String,
    pub identity_pool_id: String,
    /// Overrides the regional routes endpoint (local stubs, tests)
    pub routes_endpoint: Option<String>,
    /// Overrides the regional identity endpoint (local stubs, tests)
    pub identity_endpoint: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            map_style: "Standard".to_string(),
            api_key: String::new(),
            identity_pool_id: String::new(),
            routes_endpoint: None,
            identity_endpoint: None,
        }
    }
}

impl ViewerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        Self {
            region: non_empty("GEOROUTE_REGION").unwrap_or(defaults.region),
            map_style: non_empty("GEOROUTE_MAP_STYLE").unwrap_or(defaults.map_style),
            api_key: non_empty("GEOROUTE_API_KEY").unwrap_or_default(),
            identity_pool_id: non_empty("GEOROUTE_IDENTITY_POOL_ID").unwrap_or_default(),
            routes_endpoint: non_empty("GEOROUTE_ROUTES_ENDPOINT"),
            identity_endpoint: non_empty("GEOROUTE_IDENTITY_ENDPOINT"),
        }
    }

    /// Route fetching needs the identity pool id; the map style needs the
    /// key. The pool id is checked first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.identity_pool_id.is_empty() {
            return Err(ConfigError::MissingIdentityPoolId);
        }
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }

    /// Map style descriptor URL for the vector map widget.
    pub fn style_url(&self) -> String {
        format!(
            "https://maps.geo.{}.amazonaws.com/v2/styles/{}/descriptor?color-scheme=Dark&key={}",
            self.region, self.map_style, self.api_key
        )
    }
}
