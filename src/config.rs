//! Engine configuration.
//!
//! Constructed explicitly by the embedding application; `from_env` layers
//! environment overrides on top of the defaults for development builds.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::compat::ZodiacSign;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the discovery API, without a trailing slash.
    pub base_url: String,
    /// Bearer token attached to every request when present.
    pub auth_token: Option<String>,
    /// Candidates requested per discovery page.
    pub page_size: u32,
    /// Preload kicks in when this many unconsumed candidates remain.
    pub preload_threshold: usize,
    pub request_timeout: Duration,
    /// The signed-in user's sign, for match narratives the server did not
    /// score. Unknown until the profile loads.
    pub viewer_sign: Option<ZodiacSign>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.starmatch.app/v1".into(),
            auth_token: None,
            page_size: 10,
            preload_threshold: 3,
            request_timeout: Duration::from_secs(10),
            viewer_sign: None,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `STARMATCH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = env::var("STARMATCH_API_BASE") {
            config.base_url = value.trim_end_matches('/').to_string();
        }
        if let Ok(value) = env::var("STARMATCH_AUTH_TOKEN") {
            config.auth_token = Some(value);
        }
        if let Ok(value) = env::var("STARMATCH_PAGE_SIZE") {
            config.page_size = value
                .parse()
                .with_context(|| format!("invalid STARMATCH_PAGE_SIZE '{value}'"))?;
        }
        if let Ok(value) = env::var("STARMATCH_PRELOAD_THRESHOLD") {
            config.preload_threshold = value
                .parse()
                .with_context(|| format!("invalid STARMATCH_PRELOAD_THRESHOLD '{value}'"))?;
        }
        if let Ok(value) = env::var("STARMATCH_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = value
                .parse()
                .with_context(|| format!("invalid STARMATCH_REQUEST_TIMEOUT_SECS '{value}'"))?;
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Ok(value) = env::var("STARMATCH_VIEWER_SIGN") {
            let sign = value
                .parse::<ZodiacSign>()
                .with_context(|| format!("invalid STARMATCH_VIEWER_SIGN '{value}'"))?;
            config.viewer_sign = Some(sign);
        }

        Ok(config)
    }
}
