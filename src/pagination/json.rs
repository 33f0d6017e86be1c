//! Untyped list operation over any paginated GET endpoint

use super::types::{DynamicParams, ListOperation, Page, PageRequest};
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;
use reqwest::Method;

/// Lists an arbitrary endpoint returning `{ <items_field>: [...], next: ... }`.
///
/// Parameters are sent as query parameters on every call, together with any
/// fixed query (for example a required `version`).
#[derive(Debug)]
pub struct JsonListOperation<'a> {
    client: &'a HttpClient,
    url: String,
    items_field: String,
    fixed_query: StringMap,
    headers: StringMap,
}

impl<'a> JsonListOperation<'a> {
    /// Create an operation listing `url`, reading items from `items_field`
    pub fn new(
        client: &'a HttpClient,
        url: impl Into<String>,
        items_field: impl Into<String>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            items_field: items_field.into(),
            fixed_query: StringMap::new(),
            headers: StringMap::new(),
        }
    }

    /// Query parameter sent with every page request
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fixed_query.insert(key.into(), value.into());
        self
    }

    /// Header sent with every page request
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

#[async_trait]
impl ListOperation for JsonListOperation<'_> {
    type Params = DynamicParams;
    type Item = JsonValue;

    async fn fetch_page(&self, params: DynamicParams) -> Result<Page<JsonValue>> {
        let mut config = RequestConfig::new().header("Accept", "application/json");
        config.headers.extend(self.headers.clone());
        config.query.extend(self.fixed_query.clone());
        config.query.extend(params.to_query());

        let body: JsonValue = self
            .client
            .request_json(Method::GET, &self.url, config)
            .await?;
        Page::from_json(body, &self.items_field, params.cursor_field())
    }
}
