//! OIDC Core Components
//!
//! Query codec, endpoint URLs and the HTTP transport seam.

pub mod endpoint;
pub mod query;
pub mod transport;

pub use endpoint::*;
pub use query::*;
pub use transport::*;
