//! Checkout form validation and order assembly.
//!
//! Checkout is simulated: validation and pricing are real, payment is not.
//! Field rules mirror the storefront form exactly, and validation reports
//! every failing field rather than stopping at the first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartItem};
use crate::pricing::calculate_total;

/// Simulated payment processing delay, matching the storefront's fake
/// checkout.
pub const PROCESSING_DELAY_MS: u64 = 1500;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    // Customer information
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,

    // Shipping address
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,

    // Payment information (fake)
    pub card_number: String,
    pub card_name: String,
    pub expiry_date: String,
    pub cvv: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl CheckoutForm {
    /// Validate every field, collecting all errors.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if char_count(&self.first_name) < 2 {
            errors.push(FieldError::new(
                "firstName",
                "First name must be at least 2 characters",
            ));
        }
        if char_count(&self.last_name) < 2 {
            errors.push(FieldError::new(
                "lastName",
                "Last name must be at least 2 characters",
            ));
        }
        if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "Invalid email address"));
        }
        if !is_digits(&self.phone) || self.phone.len() < 10 {
            errors.push(FieldError::new("phone", "Phone must be at least 10 digits"));
        }
        if char_count(&self.address) < 5 {
            errors.push(FieldError::new(
                "address",
                "Address must be at least 5 characters",
            ));
        }
        if char_count(&self.city) < 2 {
            errors.push(FieldError::new("city", "City must be at least 2 characters"));
        }
        if char_count(&self.state) < 2 {
            errors.push(FieldError::new("state", "Please select a state"));
        }
        if self.zip_code.len() != 5 || !is_digits(&self.zip_code) {
            errors.push(FieldError::new("zipCode", "ZIP code must be 5 digits"));
        }
        if self.country.is_empty() {
            errors.push(FieldError::new("country", "Please select a country"));
        }
        if self.card_number.len() != 16 || !is_digits(&self.card_number) {
            errors.push(FieldError::new(
                "cardNumber",
                "Card number must be 16 digits",
            ));
        }
        if char_count(&self.card_name) < 3 {
            errors.push(FieldError::new("cardName", "Name on card is required"));
        }
        if !is_valid_expiry(&self.expiry_date) {
            errors.push(FieldError::new(
                "expiryDate",
                "Expiry date must be in MM/YY format",
            ));
        }
        if !is_digits(&self.cvv) || !(3..=4).contains(&self.cvv.len()) {
            errors.push(FieldError::new("cvv", "CVV must be 3 or 4 digits"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn char_count(s: &str) -> usize {
    s.chars().count()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn is_valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !s.chars().any(char::is_whitespace)
}

/// Exactly `MM/YY`.
fn is_valid_expiry(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 5
        && bytes[2] == b'/'
        && [0, 1, 3, 4]
            .iter()
            .all(|&i| (bytes[i] as char).is_ascii_digit())
}

/// The payload the checkout operation consumes: cart lines plus the form.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CartItem>,
    pub customer: CheckoutForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub items: Vec<CartItem>,
    pub customer: CheckoutForm,
    pub subtotal: f64,
    pub tax: f64,
    pub shipping: f64,
    pub total: f64,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

/// Validate the request and assemble the priced order. Pure aside from the
/// clock; the simulated processing delay is the caller's concern.
pub fn build_order(request: CheckoutRequest) -> Result<Order, Vec<FieldError>> {
    request.customer.validate()?;

    let mut cart = Cart::new();
    for item in request.items {
        cart.add_item(item.product, item.quantity);
    }

    let subtotal = cart.total();
    let totals = calculate_total(subtotal);
    let created_at = Utc::now();

    Ok(Order {
        id: format!("ord-{}", created_at.timestamp_millis()),
        items: cart.items().to_vec(),
        customer: request.customer,
        subtotal,
        tax: totals.tax,
        shipping: totals.shipping,
        total: totals.total,
        created_at,
        status: OrderStatus::Completed,
    })
}
