//! OIDC Types
//!
//! Data definitions shared by the flows.

pub mod callback;
pub mod config;
pub mod token;

pub use callback::*;
pub use config::*;
pub use token::*;
