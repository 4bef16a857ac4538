//! Caller supplied native fragments merged into an encoded query.
//!
//! Recognised keys, matched case-insensitively:
//! - `q`: raw native query, wrapped into the native query slot
//! - `f`: raw native filter, wrapped and AND-ed with the compiled filter
//! - `a`: aggregations as a JSON object keyed by aggregation name
//! - `native-only`: `true` discards the compiled filter

use crate::errors::EncodeError;
use crate::query::QueryFragment;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Aggregation name -> aggregation type -> body.
pub type Aggregations = BTreeMap<String, BTreeMap<String, Map<String, Value>>>;

pub const NATIVE_QUERY: &str = "q";
pub const NATIVE_FILTER: &str = "f";
pub const AGGREGATIONS: &str = "a";
pub const NATIVE_ONLY: &str = "native-only";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParams {
    pub query: Option<String>,
    pub filter: Option<String>,
    pub aggregations: Option<String>,
    pub native_only: bool,
}

impl ViewParams {
    pub fn from_map(raw: &HashMap<String, String>) -> Self {
        let mut params = ViewParams::default();
        for (key, value) in raw {
            match key.to_ascii_lowercase().as_str() {
                NATIVE_QUERY => params.query = Some(value.clone()),
                NATIVE_FILTER => params.filter = Some(value.clone()),
                AGGREGATIONS => params.aggregations = Some(value.clone()),
                NATIVE_ONLY => params.native_only = value.trim().eq_ignore_ascii_case("true"),
                other => tracing::trace!("Ignoring view parameter {}", other),
            }
        }
        params
    }

    pub fn is_empty(&self) -> bool {
        self == &ViewParams::default()
    }

    /// Folds the native query and filter into the two query slots.
    pub fn apply(&self, filter: &mut QueryFragment, native_query: &mut QueryFragment) {
        if self.native_only {
            tracing::debug!("Native-only view parameters, dropping the compiled filter");
            *filter = QueryFragment::match_all();
        }
        if let Some(source) = &self.query {
            *native_query = QueryFragment::wrapper(source);
        }
        if let Some(source) = &self.filter {
            let wrapped = QueryFragment::wrapper(source);
            *filter = if self.native_only || filter.is_match_all() {
                wrapped
            } else {
                let compiled = std::mem::replace(filter, QueryFragment::match_all());
                QueryFragment::must(vec![compiled, wrapped])
            };
        }
    }

    /// Parses the `a` parameter, retrying on its URL-decoded form when allowed.
    pub fn parse_aggregations(&self, url_decode: bool) -> Result<Option<Aggregations>, EncodeError> {
        self.aggregations
            .as_deref()
            .map(|raw| parse_json::<Aggregations>(raw, "aggregations", url_decode).map(|(a, _)| a))
            .transpose()
    }

    /// Checks that `q` and `f` hold JSON, replacing URL-encoded values with
    /// their decoded text.
    pub fn validated(mut self, url_decode: bool) -> Result<Self, EncodeError> {
        if let Some(raw) = self.query.take() {
            self.query = Some(parse_json::<Value>(&raw, "native query", url_decode)?.1);
        }
        if let Some(raw) = self.filter.take() {
            self.filter = Some(parse_json::<Value>(&raw, "native filter", url_decode)?.1);
        }
        Ok(self)
    }
}

/// Parses `raw` as JSON, then its URL-decoded form when allowed. Returns the
/// value together with the text it was parsed from.
fn parse_json<T: DeserializeOwned>(
    raw: &str,
    what: &str,
    url_decode: bool,
) -> Result<(T, String), EncodeError> {
    let first = match serde_json::from_str::<T>(raw) {
        Ok(value) => return Ok((value, raw.to_string())),
        Err(err) => err,
    };
    if !url_decode {
        return Err(EncodeError::ViewParam(format!(
            "Unable to parse {}: {}",
            what, first
        )));
    }
    let decoded = urlencoding::decode(raw)
        .map_err(|e| EncodeError::ViewParam(format!("Unable to decode {}: {}", what, e)))?;
    serde_json::from_str::<T>(&decoded)
        .map(|value| (value, decoded.into_owned()))
        .map_err(|e| EncodeError::ViewParam(format!("Unable to parse {}: {}", what, e)))
}
