//! Filter to Elasticsearch query compilation.

mod translate;

use crate::capabilities::Capabilities;
use crate::config::EncoderConfig;
use crate::errors::EncodeError;
use crate::query::QueryFragment;
use crate::view_params::{Aggregations, ViewParams};
use ogc_filter::{Filter, SchemaProvider};
use serde_json::{json, Value};
use std::collections::HashMap;
use translate::Translator;

/// A filter together with the view parameters of the request it came with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filter: Option<Filter>,
    pub view_params: HashMap<String, String>,
}

impl Query {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter: Some(filter),
            view_params: HashMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.view_params.insert(key.into(), value.into());
        self
    }
}

/// Compiles filters against one schema and keeps the result of the last call.
pub struct FilterToElastic<'a> {
    schema: &'a dyn SchemaProvider,
    config: EncoderConfig,
    capabilities: Capabilities,
    filter: QueryFragment,
    native_query: QueryFragment,
    aggregations: Option<Aggregations>,
    fully_supported: bool,
}

impl<'a> FilterToElastic<'a> {
    pub fn new(schema: &'a dyn SchemaProvider) -> Self {
        Self {
            schema,
            config: EncoderConfig::default(),
            capabilities: Capabilities::default(),
            filter: QueryFragment::match_all(),
            native_query: QueryFragment::match_all(),
            aggregations: None,
            fully_supported: true,
        }
    }

    pub fn with_config(mut self, config: EncoderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Translates `filter`, replacing the previously compiled filter.
    ///
    /// On error the previous result is left untouched.
    pub fn encode(&mut self, filter: &Filter) -> Result<(), EncodeError> {
        tracing::debug!("Encoding {} filter", filter.kind());
        let translator = Translator {
            schema: self.schema,
            config: &self.config,
        };
        let fragment = translator.translate(filter)?;
        self.fully_supported = self.capabilities.fully_supports(filter);
        self.filter = fragment;
        Ok(())
    }

    /// Encodes the query's filter, then merges its view parameters.
    pub fn encode_query(&mut self, query: &Query) -> Result<(), EncodeError> {
        let filter = query
            .filter
            .as_ref()
            .ok_or_else(|| EncodeError::invalid("query has no filter"))?;
        self.encode(filter)?;
        self.add_view_params(&query.view_params)
    }

    /// Merges caller supplied native fragments into the compiled result.
    pub fn add_view_params(&mut self, params: &HashMap<String, String>) -> Result<(), EncodeError> {
        let params = ViewParams::from_map(params);
        if params.is_empty() {
            return Ok(());
        }
        let url_decode = self.config.url_decode_view_params;
        let aggregations = params.parse_aggregations(url_decode)?;
        let params = params.validated(url_decode)?;
        params.apply(&mut self.filter, &mut self.native_query);
        if aggregations.is_some() {
            self.aggregations = aggregations;
        }
        Ok(())
    }

    /// The compiled filter combined with the native query.
    pub fn query_builder(&self) -> QueryFragment {
        if self.native_query.is_match_all() {
            self.filter.clone()
        } else if self.filter.is_match_all() {
            self.native_query.clone()
        } else {
            QueryFragment::must(vec![self.native_query.clone(), self.filter.clone()])
        }
    }

    pub fn filter_builder(&self) -> &QueryFragment {
        &self.filter
    }

    pub fn native_query_builder(&self) -> &QueryFragment {
        &self.native_query
    }

    pub fn aggregations(&self) -> Option<&Aggregations> {
        self.aggregations.as_ref()
    }

    /// Whether the last encoded filter needs no in-memory post filtering.
    pub fn fully_supported(&self) -> bool {
        self.fully_supported
    }

    pub fn create_capabilities(&self) -> Capabilities {
        self.capabilities.clone()
    }

    pub fn to_json(&self) -> Value {
        json!({
            "query": self.query_builder(),
            "aggregations": self.aggregations,
            "fully_supported": self.fully_supported,
        })
    }
}

#[cfg(test)]
mod tests;
