pub mod nasdaq;
pub mod nyse;

pub use nasdaq::NasdaqSource;
pub use nyse::NyseSource;

use crate::types::Listing;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use tracing::warn;

/// One upstream IPO calendar. Fetching recovers locally from every
/// upstream failure: a non-success status or transport error is
/// logged and yields an empty batch, never an error.
#[async_trait]
pub trait IpoSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, client: &Client, now: DateTime<Utc>) -> Vec<Listing>;
}

/// Parse the MM/DD/YYYY date strings both calendars use. An empty
/// field is simply absent; anything else unparseable is logged and
/// treated as absent so the listing still makes the digest.
pub(crate) fn parse_expected_date(source: &str, raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, "%m/%d/%Y") {
        Ok(date) => Some(date),
        Err(e) => {
            warn!("{source}: unparseable expected date {raw:?}: {e}");
            None
        }
    }
}
