use chrono::{NaiveDate, Weekday};
use std::fmt;

/// One upcoming IPO, normalized from a single upstream calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub company_name: String,
    pub ticker_symbol: Option<String>,
    pub offering: Offering,
    pub price_range: String,
    pub expected_date: Option<NaiveDate>,
}

/// A dollar or share figure as reported upstream. Sources sometimes
/// omit the value entirely, which renders as the literal "Unspecified".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    Value(f64),
    Unspecified,
}

impl fmt::Display for Amount {
    /// Integer text when the fractional part is exactly zero, the
    /// plain decimal otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Value(v) if v.fract() == 0.0 => write!(f, "{v:.0}"),
            Amount::Value(v) => write!(f, "{v}"),
            Amount::Unspecified => write!(f, "Unspecified"),
        }
    }
}

/// What a source reports about the size of the offering. NYSE reports
/// a share count distinct from the filed amount; Nasdaq reports one
/// figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offering {
    Amount(Amount),
    SharesAndAmount { shares: Amount, amount: Amount },
}

impl fmt::Display for Offering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offering::Amount(amount) => write!(f, "{amount}"),
            Offering::SharesAndAmount { shares, amount } => write!(f, "{shares} / {amount}"),
        }
    }
}

/// Day classifier for one run: Sundays get the unfiltered weekly
/// digest, every other day filters to that weekday's listings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DigestMode {
    Weekly,
    Daily(Weekday),
}

impl DigestMode {
    pub fn subject(&self) -> &'static str {
        match self {
            DigestMode::Weekly => "This week's IPOs",
            DigestMode::Daily(_) => "Today's IPOs",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("mail transport rejected the message: HTTP {status}: {body}")]
    SendRejected { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, DigestError>;
