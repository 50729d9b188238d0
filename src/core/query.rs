//! Query Codec
//!
//! Multi-valued query parameters with deterministic serialization.
//!
//! Keys are emitted in lexicographic order of the raw key and, within a key,
//! values in lexicographic order of the raw value. Every byte outside the
//! unreserved set (`A-Z a-z 0-9 - _ . ~`) is percent-encoded, including `/`,
//! `:` and space, so generated URLs and form bodies are reproducible.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::core::EndpointUrl;
use crate::error::{ConfigurationError, OidcError, OidcResult};

/// Mapping of query keys to their ordered values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    /// Create empty parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw query string.
    ///
    /// A leading `?` and surrounding whitespace are ignored and a segment
    /// without `=` yields an empty value. Trailing empty segments are dropped;
    /// an empty segment between two others is an empty key with an empty value.
    pub fn parse(raw: &str) -> OidcResult<Self> {
        let mut query = Self::new();

        let trimmed = raw.trim();
        let trimmed = trimmed.strip_prefix('?').unwrap_or(trimmed);

        let mut segments: Vec<&str> = trimmed.split('&').collect();
        while segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }

        for segment in segments {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            let key = percent_decode(key)?;
            let value = percent_decode(value)?;
            query.add(key.as_str(), value.as_str());
        }

        Ok(query)
    }

    /// Decode the query component of a URL.
    pub fn from_url(url: &Url) -> OidcResult<Self> {
        Self::parse(url.query().unwrap_or_default())
    }

    /// Append a value; a missing key or value is a no-op.
    pub fn add<'a>(&mut self, key: impl Into<Option<&'a str>>, value: impl Into<Option<&'a str>>) {
        if let (Some(key), Some(value)) = (key.into(), value.into()) {
            self.params
                .entry(key.to_string())
                .or_default()
                .push(value.to_string());
        }
    }

    /// Replace all values of `key` with `value`; a missing key or value is a no-op.
    pub fn put<'a>(&mut self, key: impl Into<Option<&'a str>>, value: impl Into<Option<&'a str>>) {
        if let (Some(key), Some(value)) = (key.into(), value.into()) {
            self.params.insert(key.to_string(), vec![value.to_string()]);
        }
    }

    /// Alias for [`QueryParams::put`].
    pub fn set<'a>(&mut self, key: impl Into<Option<&'a str>>, value: impl Into<Option<&'a str>>) {
        self.put(key, value);
    }

    /// Remove every value of `key`.
    pub fn remove<'a>(&mut self, key: impl Into<Option<&'a str>>) -> Option<Vec<String>> {
        key.into().and_then(|key| self.params.remove(key))
    }

    /// All values of `key`, in insertion order.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.params.get(key).map(Vec::as_slice)
    }

    /// First value of `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate keys in sorted order with their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Encode into a query string; empty parameters encode to `""`.
    pub fn encode(&self) -> String {
        let mut pairs = Vec::new();

        for (key, values) in self.iter() {
            let mut sorted: Vec<&String> = values.iter().collect();
            sorted.sort();
            let key = percent_encode(key);
            for value in sorted {
                pairs.push(format!("{}={}", key, percent_encode(value)));
            }
        }

        pairs.join("&")
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for QueryParams {
    type Err = OidcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.add(key, value);
        }
        query
    }
}

/// Percent-encode everything outside the unreserved set.
pub fn percent_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Decode a percent-encoded component as UTF-8; `+` decodes to a space.
pub fn percent_decode(input: &str) -> OidcResult<String> {
    let bytes = input.as_bytes();
    for (i, _) in input.match_indices('%') {
        let well_formed = bytes.len() > i + 2
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();
        if !well_formed {
            return Err(malformed(input, format!("incomplete escape at offset {}", i)));
        }
    }

    let spaced = input.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| malformed(input, e.to_string()))
}

fn malformed(input: &str, message: String) -> OidcError {
    OidcError::Configuration(ConfigurationError::MalformedQuery {
        input: input.to_string(),
        message,
    })
}

/// Rebuild `endpoint` with `query` as its only query component.
///
/// The `?` separator is omitted when the encoded query is empty.
pub fn recompose(endpoint: &EndpointUrl, query: &QueryParams) -> String {
    let encoded = query.encode();
    if encoded.is_empty() {
        endpoint.base().to_string()
    } else {
        format!("{}?{}", endpoint.base(), encoded)
    }
}
