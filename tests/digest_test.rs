use chrono::{NaiveDate, Weekday};
use ipo_digest::digest::{filter_listings, render, EMPTY_DIGEST_BODY};
use ipo_digest::{Amount, DigestMode, Listing, Offering};

fn listing(name: &str, ticker: Option<&str>, date: Option<NaiveDate>) -> Listing {
    Listing {
        company_name: name.to_string(),
        ticker_symbol: ticker.map(str::to_string),
        offering: Offering::Amount(Amount::Value(1_000_000.0)),
        price_range: "10.00 - 12.00".to_string(),
        expected_date: date,
    }
}

fn wednesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 2, 3).unwrap()
}

#[test]
fn ticker_renders_as_parenthetical_only_when_present() {
    let with_ticker = listing("ON24 INC", Some("ONTF"), None);
    let without_ticker = listing("ON24 INC", None, None);

    let body = render(&[with_ticker], DigestMode::Weekly);
    assert!(body.starts_with("Company: ON24 INC (ONTF)\n"));

    let body = render(&[without_ticker], DigestMode::Weekly);
    assert!(body.starts_with("Company: ON24 INC\n"));
    assert!(!body.contains('('));
}

#[test]
fn daily_mode_retains_only_that_weekday_and_drops_undated_listings() {
    let listings = vec![
        listing("Wednesday Co", None, Some(wednesday())),
        listing("Friday Co", None, Some(NaiveDate::from_ymd_opt(2021, 2, 5).unwrap())),
        listing("Undated Co", None, None),
    ];

    let retained = filter_listings(&listings, DigestMode::Daily(Weekday::Wed));
    assert_eq!(retained.len(), 1);
    assert_eq!(retained[0].company_name, "Wednesday Co");
}

#[test]
fn weekly_mode_retains_everything_including_undated_listings() {
    let listings = vec![
        listing("Wednesday Co", None, Some(wednesday())),
        listing("Undated Co", None, None),
    ];

    let retained = filter_listings(&listings, DigestMode::Weekly);
    assert_eq!(retained.len(), 2);
}

#[test]
fn source_order_is_preserved() {
    let listings = vec![
        listing("First", None, None),
        listing("Second", None, None),
        listing("Third", None, None),
    ];

    let body = render(&listings, DigestMode::Weekly);
    let first = body.find("First").unwrap();
    let second = body.find("Second").unwrap();
    let third = body.find("Third").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn empty_retained_set_renders_the_placeholder() {
    assert_eq!(render(&[], DigestMode::Weekly), EMPTY_DIGEST_BODY);

    // Listings exist but none survive the daily filter.
    let listings = vec![listing("Undated Co", None, None)];
    assert_eq!(
        render(&listings, DigestMode::Daily(Weekday::Wed)),
        EMPTY_DIGEST_BODY
    );
}

#[test]
fn entries_are_joined_with_a_blank_line() {
    let listings = vec![
        listing("First", None, None),
        listing("Second", None, None),
    ];

    let body = render(&listings, DigestMode::Weekly);
    assert_eq!(body.matches("\n\n").count(), 1);
    assert!(body.contains("Price: 10.00 - 12.00\n\nCompany: Second"));
}

#[test]
fn nyse_scenario_renders_shares_and_amount_pair() {
    let sana = Listing {
        company_name: "Sana Biotechnology, Inc.".to_string(),
        ticker_symbol: Some("SANA".to_string()),
        offering: Offering::SharesAndAmount {
            shares: Amount::Value(15_000_000.0),
            amount: Amount::Value(370_875_000.0),
        },
        price_range: "20.00 - 23.00".to_string(),
        expected_date: Some(wednesday()),
    };

    let body = render(&[sana], DigestMode::Daily(Weekday::Wed));
    assert_eq!(
        body,
        "Company: Sana Biotechnology, Inc. (SANA)\n\
         Offering: 15000000 / 370875000\n\
         Price: 20.00 - 23.00"
    );
}

#[test]
fn amounts_render_as_integers_only_when_whole() {
    assert_eq!(Amount::Value(370_875_000.0).to_string(), "370875000");
    assert_eq!(Amount::Value(45.5).to_string(), "45.5");
    assert_eq!(Amount::Unspecified.to_string(), "Unspecified");
}
