use crate::types::{DigestMode, Listing};
use chrono::Datelike;

/// Body used instead of an empty string so a quiet day still sends a
/// readable email.
pub const EMPTY_DIGEST_BODY: &str = "No IPOs scheduled.";

/// Apply the day filter for this run's mode. Weekly keeps everything;
/// daily keeps listings dated for that weekday. A listing with no
/// expected date never passes the daily filter. Order is preserved as
/// aggregated, no re-sorting.
pub fn filter_listings(listings: &[Listing], mode: DigestMode) -> Vec<&Listing> {
    match mode {
        DigestMode::Weekly => listings.iter().collect(),
        DigestMode::Daily(weekday) => listings
            .iter()
            .filter(|listing| {
                listing
                    .expected_date
                    .is_some_and(|date| date.weekday() == weekday)
            })
            .collect(),
    }
}

/// Render the digest body for one run: filtered listings as three-line
/// entries separated by blank lines, or the fixed placeholder.
pub fn render(listings: &[Listing], mode: DigestMode) -> String {
    let retained = filter_listings(listings, mode);
    if retained.is_empty() {
        return EMPTY_DIGEST_BODY.to_string();
    }

    retained
        .iter()
        .map(|listing| render_listing(listing))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_listing(listing: &Listing) -> String {
    format!(
        "{}\nOffering: {}\nPrice: {}",
        company_line(listing),
        listing.offering,
        listing.price_range
    )
}

fn company_line(listing: &Listing) -> String {
    match &listing.ticker_symbol {
        Some(ticker) => format!("Company: {} ({})", listing.company_name, ticker),
        None => format!("Company: {}", listing.company_name),
    }
}
