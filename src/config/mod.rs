use serde::{Deserialize, Serialize};

use crate::extractors::fetch::DESKTOP_USER_AGENT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Storefront country code baked into rebuilt catalogue URLs.
    pub storefront: String,
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storefront: "us".to_string(),
            user_agent: DESKTOP_USER_AGENT.to_string(),
            timeout: 30,
        }
    }
}
