//! Invoice arithmetic shared by the on-screen invoice and the printed one.
//!
//! The discount is a percentage and is not range-checked here; the lab desk
//! validates it before an invoice is created.

use crate::models::PriceLookup;

/// Sum of test prices. Tests missing from the catalog cost nothing.
pub fn subtotal<P: PriceLookup + ?Sized>(tests: &[String], prices: &P) -> f64 {
    tests
        .iter()
        .map(|t| prices.price_of(t).unwrap_or(0.0))
        .sum()
}

pub fn discount_amount(subtotal: f64, discount_percent: f64) -> f64 {
    subtotal * discount_percent / 100.0
}

/// `subtotal - subtotal * discount / 100`
pub fn total<P: PriceLookup + ?Sized>(tests: &[String], discount_percent: f64, prices: &P) -> f64 {
    let subtotal = subtotal(tests, prices);
    subtotal - discount_amount(subtotal, discount_percent)
}

pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// On-screen currency, e.g. `₹450.00`.
pub fn format_rupees(amount: f64) -> String {
    format!("₹{}", format_amount(amount))
}

/// Two totals agree when they print the same to the paisa.
pub fn amounts_agree(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.005
}
