//! Builders
//!
//! Fluent builder patterns for issuers and clients.

pub mod client;
pub mod issuer;

pub use client::ClientBuilder;
pub use issuer::{issuer_builder, IssuerBuilder};
