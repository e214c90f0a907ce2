use crate::types::Result;
use reqwest::Client;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "ipo-digest/0.1".to_string(),
            timeout_seconds: 5,
        }
    }
}

/// Build the one HTTP client shared by the calendar sources and the
/// mail transport. The timeout bounds every request; there are no
/// retries, a slow upstream just counts as down for this run.
pub fn http_client(config: &FetchConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .build()?;

    Ok(client)
}
