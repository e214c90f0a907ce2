use super::{parse_expected_date, IpoSource};
use crate::types::{Amount, Listing, Offering};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info, warn};

const NYSE_CALENDAR_URL: &str = "https://www.nyse.com/api/ipo-center/calendar";

/// The primary exchange calendar: an unauthenticated GET returning
/// rows under a top-level `calendarList`.
pub struct NyseSource {
    url: String,
}

impl NyseSource {
    pub fn new() -> Self {
        Self {
            url: NYSE_CALENDAR_URL.to_string(),
        }
    }
}

impl Default for NyseSource {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct NyseCalendar {
    #[serde(rename = "calendarList")]
    calendar_list: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct NyseRow {
    issuer_nm: String,
    symbol: Option<String>,
    current_filed_proceeds_with_overallotment_usd_amt: f64,
    current_shares_filed: f64,
    current_file_price_range_usd: String,
    expected_dt_report: Option<String>,
}

impl From<NyseRow> for Listing {
    fn from(row: NyseRow) -> Self {
        Listing {
            company_name: row.issuer_nm,
            ticker_symbol: row.symbol.filter(|s| !s.is_empty()),
            offering: Offering::SharesAndAmount {
                shares: Amount::Value(row.current_shares_filed),
                amount: Amount::Value(row.current_filed_proceeds_with_overallotment_usd_amt),
            },
            price_range: row.current_file_price_range_usd,
            expected_date: row
                .expected_dt_report
                .as_deref()
                .and_then(|d| parse_expected_date("NYSE", d)),
        }
    }
}

/// Parse one NYSE calendar payload. Rows are decoded individually so
/// one malformed record drops only itself, not the batch.
pub fn parse_calendar(body: &str) -> Vec<Listing> {
    let calendar: NyseCalendar = match serde_json::from_str(body) {
        Ok(calendar) => calendar,
        Err(e) => {
            error!("NYSE: malformed calendar payload: {e}");
            return Vec::new();
        }
    };

    calendar
        .calendar_list
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<NyseRow>(row) {
            Ok(row) => Some(Listing::from(row)),
            Err(e) => {
                warn!("NYSE: skipping malformed calendar row: {e}");
                None
            }
        })
        .collect()
}

#[async_trait]
impl IpoSource for NyseSource {
    fn name(&self) -> &'static str {
        "NYSE"
    }

    async fn fetch(&self, client: &Client, _now: DateTime<Utc>) -> Vec<Listing> {
        let response = match client.get(&self.url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("NYSE: calendar request failed: {e}");
                return Vec::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("NYSE: calendar returned {status}: {body}");
            return Vec::new();
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!("NYSE: failed to read calendar body: {e}");
                return Vec::new();
            }
        };

        let listings = parse_calendar(&body);
        info!("NYSE: {} upcoming listings", listings.len());
        listings
    }
}
