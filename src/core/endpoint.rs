//! Endpoint URLs
//!
//! A provider endpoint split into its query-less base and the query
//! parameters it was configured with.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::core::query::{recompose, QueryParams};
use crate::error::{ConfigurationError, OidcError, OidcResult};

/// Parsed endpoint: the configured text up to its query, plus the query.
///
/// The base is kept as written; an endpoint without a path is not given one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointUrl {
    base: String,
    query: QueryParams,
}

impl EndpointUrl {
    /// Parse an absolute endpoint URL. The fragment is dropped.
    pub fn parse(input: &str) -> OidcResult<Self> {
        let input = input.trim();
        let url = Url::parse(input).map_err(|e| invalid(input, e.to_string()))?;
        if url.cannot_be_a_base() || !url.has_host() {
            return Err(invalid(input, "URL has no host".to_string()));
        }

        let without_fragment = input.split_once('#').map_or(input, |(head, _)| head);
        let (base, raw_query) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));

        Ok(Self {
            base: base.to_string(),
            query: QueryParams::parse(raw_query)?,
        })
    }

    /// Endpoint without any query component.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Query parameters captured from the configured URL.
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Rebuild the endpoint with `query` replacing its query component.
    pub fn with_query(&self, query: &QueryParams) -> String {
        recompose(self, query)
    }
}

impl FromStr for EndpointUrl {
    type Err = OidcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The endpoint with its own captured parameters, re-encoded.
impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&recompose(self, &self.query))
    }
}

fn invalid(url: &str, message: String) -> OidcError {
    OidcError::Configuration(ConfigurationError::InvalidEndpoint {
        url: url.to_string(),
        message,
    })
}
