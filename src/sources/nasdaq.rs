use super::{parse_expected_date, IpoSource};
use crate::types::{Amount, Listing, Offering};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info, warn};

const NASDAQ_CALENDAR_URL: &str = "https://api.nasdaq.com/api/ipo/calendar";

// Nasdaq rejects requests that don't look like they come from a browser.
const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 6.1; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/88.0.4324.104 Safari/537.36";

/// The secondary exchange calendar: requires a browser-like user
/// agent and a `date=YYYY-MM` query; rows sit several levels deep.
pub struct NasdaqSource {
    url: String,
}

impl NasdaqSource {
    pub fn new() -> Self {
        Self {
            url: NASDAQ_CALENDAR_URL.to_string(),
        }
    }
}

impl Default for NasdaqSource {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct NasdaqCalendar {
    data: NasdaqData,
}

#[derive(Deserialize)]
struct NasdaqData {
    upcoming: NasdaqUpcoming,
}

#[derive(Deserialize)]
struct NasdaqUpcoming {
    #[serde(rename = "upcomingTable")]
    upcoming_table: NasdaqTable,
}

#[derive(Deserialize)]
struct NasdaqTable {
    #[serde(default)]
    rows: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NasdaqRow {
    company_name: String,
    proposed_ticker_symbol: Option<String>,
    proposed_share_price: String,
    shares_offered: Option<String>,
    expected_price_date: Option<String>,
}

impl From<NasdaqRow> for Listing {
    fn from(row: NasdaqRow) -> Self {
        Listing {
            company_name: row.company_name,
            ticker_symbol: row.proposed_ticker_symbol.filter(|s| !s.is_empty()),
            offering: Offering::Amount(parse_shares_offered(row.shares_offered.as_deref())),
            price_range: row.proposed_share_price,
            expected_date: row
                .expected_price_date
                .as_deref()
                .and_then(|d| parse_expected_date("Nasdaq", d)),
        }
    }
}

/// Share counts arrive comma-grouped ("8,600,977"); an empty or
/// missing field means the filing left the size open.
fn parse_shares_offered(raw: Option<&str>) -> Amount {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Amount::Unspecified;
    };
    match raw.replace(',', "").parse::<f64>() {
        Ok(value) => Amount::Value(value),
        Err(e) => {
            warn!("Nasdaq: unparseable sharesOffered {raw:?}: {e}");
            Amount::Unspecified
        }
    }
}

/// Parse one Nasdaq calendar payload, decoding rows individually so a
/// malformed record drops only itself.
pub fn parse_calendar(body: &str) -> Vec<Listing> {
    let calendar: NasdaqCalendar = match serde_json::from_str(body) {
        Ok(calendar) => calendar,
        Err(e) => {
            error!("Nasdaq: malformed calendar payload: {e}");
            return Vec::new();
        }
    };

    calendar
        .data
        .upcoming
        .upcoming_table
        .rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<NasdaqRow>(row) {
            Ok(row) => Some(Listing::from(row)),
            Err(e) => {
                warn!("Nasdaq: skipping malformed calendar row: {e}");
                None
            }
        })
        .collect()
}

#[async_trait]
impl IpoSource for NasdaqSource {
    fn name(&self) -> &'static str {
        "Nasdaq"
    }

    async fn fetch(&self, client: &Client, now: DateTime<Utc>) -> Vec<Listing> {
        // TODO: listings expected early next month are missed until the
        // query month rolls over; widen to two months when a week spans
        // the boundary.
        let month = now.format("%Y-%m").to_string();

        let response = match client
            .get(&self.url)
            .query(&[("date", month.as_str())])
            .header(reqwest::header::USER_AGENT, CHROME_UA)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Nasdaq: calendar request failed: {e}");
                return Vec::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Nasdaq: calendar returned {status}: {body}");
            return Vec::new();
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!("Nasdaq: failed to read calendar body: {e}");
                return Vec::new();
            }
        };

        let listings = parse_calendar(&body);
        info!("Nasdaq: {} upcoming listings", listings.len());
        listings
    }
}
