use chrono::{Datelike as _, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to whole pesos, half away from zero
pub fn round_pesos(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

/// Parses `YYYY-MM` or `YYYY-MM-DD` into the period key (first day of the month)
pub fn parse_period(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d"))
        .ok()?;

    Some(first_day_of_month(date))
}

/// Splits a RUT like `12.345.678-5` into its body (`12345678`) and check digit (`5`)
pub fn split_rut(rut: &str) -> (String, String) {
    let cleaned = rut.trim().replace('.', "");

    match cleaned.rsplit_once('-') {
        Some((body, dv)) => (body.to_owned(), dv.to_uppercase()),
        None => {
            let mut body = cleaned;
            let dv = body.pop().map(|c| c.to_ascii_uppercase().to_string()).unwrap_or_default();
            (body, dv)
        }
    }
}

/// Splits a last name field into (paternal, maternal)
pub fn split_last_names(last_name: &str) -> (String, String) {
    let mut parts = last_name.split_whitespace();
    let paternal = parts.next().unwrap_or_default().to_owned();
    let maternal = parts.collect::<Vec<_>>().join(" ");

    (paternal, maternal)
}
