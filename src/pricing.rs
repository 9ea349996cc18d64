//! Order math and display formatting for the storefront.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TAX_RATE: f64 = 0.08;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderTotals {
    pub tax: f64,
    pub shipping: f64,
    pub total: f64,
}

/// Format a price as US dollars with thousands grouping, e.g. `$1,234.50`.
pub fn format_price(price: f64) -> String {
    let cents = (price * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!(
        "{}${}.{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.chars().rev().collect()
}

pub fn calculate_tax(subtotal: f64, tax_rate: f64) -> f64 {
    subtotal * tax_rate
}

/// Flat shipping tiers: free over $100, $5.99 over $50, $9.99 below.
pub fn calculate_shipping(subtotal: f64) -> f64 {
    if subtotal >= 100.0 {
        0.0
    } else if subtotal >= 50.0 {
        5.99
    } else {
        9.99
    }
}

pub fn calculate_total(subtotal: f64) -> OrderTotals {
    let tax = calculate_tax(subtotal, DEFAULT_TAX_RATE);
    let shipping = calculate_shipping(subtotal);
    OrderTotals {
        tax,
        shipping,
        total: subtotal + tax + shipping,
    }
}

/// Truncate to a character budget, appending `...` when anything was cut.
/// Counts chars, not bytes, so multi-byte text never splits mid-character.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        return text.to_string();
    }
    let byte_end = text
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    format!("{}...", &text[..byte_end])
}
