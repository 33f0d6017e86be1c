//! Pagination types and traits
//!
//! Defines the page shape returned by list operations, the request side
//! contract for carrying a cursor, and the list operation abstraction the
//! [`Pager`](super::Pager) drives.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, StringMap};
use async_trait::async_trait;
use std::future::Future;
use std::marker::PhantomData;

/// One decoded response of a list operation
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// Continuation token for the next page, `None` on the last page
    pub next_cursor: Option<String>,
    /// Total number of items reported by the server (informational only)
    pub total_count: Option<u64>,
    /// Page size reported by the server
    pub limit: Option<u64>,
}

impl<T> Page<T> {
    /// A page with no continuation
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
            total_count: None,
            limit: None,
        }
    }

    /// A page followed by another one starting at `cursor`
    pub fn with_next(items: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            items,
            next_cursor: Some(cursor.into()),
            total_count: None,
            limit: None,
        }
    }

    /// Set the reported total count
    #[must_use]
    pub fn total_count(mut self, total_count: u64) -> Self {
        self.total_count = Some(total_count);
        self
    }

    /// Set the reported page size
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether the server announced another page
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Map every item, keeping the pagination metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            total_count: self.total_count,
            limit: self.limit,
        }
    }
}

impl Page<JsonValue> {
    /// Decode an untyped list response.
    ///
    /// Items are read from the `items_field` array. The continuation is taken
    /// from `next.start`, then `next.<cursor_field>`, then the `cursor_field`
    /// query parameter of `next.href`. An empty continuation counts as absent.
    pub fn from_json(body: JsonValue, items_field: &str, cursor_field: &str) -> Result<Self> {
        let JsonValue::Object(mut map) = body else {
            return Err(Error::decode(format!(
                "list response must be a JSON object, got {}",
                json_kind(&body)
            )));
        };

        let items = match map.remove(items_field) {
            Some(JsonValue::Array(items)) => items,
            Some(other) => {
                return Err(Error::decode(format!(
                    "field '{items_field}' must be an array, got {}",
                    json_kind(&other)
                )))
            }
            None => {
                return Err(Error::decode(format!(
                    "list response is missing the '{items_field}' array"
                )))
            }
        };

        let body = JsonValue::Object(map);
        let next_cursor = extract_jsonpath(&body, "next.start")
            .or_else(|| extract_jsonpath(&body, &format!("next.{cursor_field}")))
            .or_else(|| {
                extract_jsonpath(&body, "next.href")
                    .and_then(|href| cursor_from_href(&href, cursor_field))
            })
            .filter(|cursor| !cursor.is_empty());

        Ok(Self {
            items,
            next_cursor,
            total_count: body.get("total_count").and_then(JsonValue::as_u64),
            limit: body.get("limit").and_then(JsonValue::as_u64),
        })
    }
}

/// Request parameters that carry a pagination cursor.
///
/// Implementors decide which request field the cursor lands in
/// (`start`, `offset`, ...). The value is an opaque token: it is written
/// exactly as received from the previous page.
pub trait PageRequest: Clone + Send + Sync {
    /// Name of the request field holding the cursor
    fn cursor_field(&self) -> &str;

    /// Replace the cursor with the continuation of the previous page
    fn set_cursor(&mut self, cursor: String);
}

/// A list endpoint that can be fetched one page at a time
#[async_trait]
pub trait ListOperation: Send + Sync {
    /// Parameters of one call
    type Params: PageRequest;
    /// Element type of a page
    type Item: Send;

    /// Perform one call of the underlying operation
    async fn fetch_page(&self, params: Self::Params) -> Result<Page<Self::Item>>;
}

/// [`ListOperation`] backed by a closure, see [`list_fn`]
pub struct FnListOperation<F, P, T> {
    f: F,
    _marker: PhantomData<fn(P) -> T>,
}

/// Adapt an async closure into a [`ListOperation`]
pub fn list_fn<F, Fut, P, T>(f: F) -> FnListOperation<F, P, T>
where
    F: Fn(P) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Page<T>>> + Send,
    P: PageRequest + 'static,
    T: Send + 'static,
{
    FnListOperation {
        f,
        _marker: PhantomData,
    }
}

#[async_trait]
impl<F, Fut, P, T> ListOperation for FnListOperation<F, P, T>
where
    F: Fn(P) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Page<T>>> + Send,
    P: PageRequest + 'static,
    T: Send + 'static,
{
    type Params = P;
    type Item = T;

    async fn fetch_page(&self, params: P) -> Result<Page<T>> {
        (self.f)(params).await
    }
}

/// Untyped parameters: a JSON object plus the name of its cursor field
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicParams {
    cursor_field: String,
    values: JsonObject,
}

impl DynamicParams {
    /// Empty parameters
    pub fn new(cursor_field: impl Into<String>) -> Self {
        Self {
            cursor_field: cursor_field.into(),
            values: JsonObject::new(),
        }
    }

    /// Parameters from a JSON value, which must be an object (or null)
    pub fn from_value(cursor_field: impl Into<String>, value: JsonValue) -> Result<Self> {
        let values = match value {
            JsonValue::Object(map) => map,
            JsonValue::Null => JsonObject::new(),
            other => {
                return Err(Error::invalid_pager_params(format!(
                    "initial parameters must be a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };
        Ok(Self {
            cursor_field: cursor_field.into(),
            values,
        })
    }

    /// Set a filter value
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Raw parameter values
    pub fn values(&self) -> &JsonObject {
        &self.values
    }

    /// Current cursor, if any
    pub fn cursor(&self) -> Option<&str> {
        self.values.get(&self.cursor_field).and_then(JsonValue::as_str)
    }

    /// Render as query parameters. Nulls are skipped, arrays are comma joined.
    pub fn to_query(&self) -> StringMap {
        self.values
            .iter()
            .filter_map(|(key, value)| query_value(value).map(|v| (key.clone(), v)))
            .collect()
    }
}

impl PageRequest for DynamicParams {
    fn cursor_field(&self) -> &str {
        &self.cursor_field
    }

    fn set_cursor(&mut self, cursor: String) {
        self.values
            .insert(self.cursor_field.clone(), JsonValue::String(cursor));
    }
}

fn query_value(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Array(values) => Some(
            values
                .iter()
                .filter_map(query_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        JsonValue::Object(_) => Some(value.to_string()),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Read the value of query parameter `param` out of a (possibly relative) link
pub fn cursor_from_href(href: &str, param: &str) -> Option<String> {
    let url = url::Url::parse(href)
        .or_else(|_| url::Url::parse("http://localhost/")?.join(href))
        .ok()?;
    url.query_pairs()
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())
}

/// Extract a value from JSON using a simple JSONPath expression
/// Supports basic paths like "$.next.start" or "next.start"
pub fn extract_jsonpath(value: &JsonValue, path: &str) -> Option<String> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    let parts: Vec<&str> = path.split('.').collect();

    let mut current = value;
    for part in parts {
        match current {
            JsonValue::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }

    match current {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
