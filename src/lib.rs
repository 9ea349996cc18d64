//! Backend library for the vitrine demo storefront.
//!
//! The `review` module implements the pull request review dashboard
//! (fetch → classify → sort → group); `github` talks to the hosting
//! provider's REST API; the remaining modules back the demo shop
//! (catalog, cart, pricing, checkout, vector search, chat identity).

pub mod cache;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod github;
pub mod identity;
pub mod pricing;
pub mod review;
pub mod search;
