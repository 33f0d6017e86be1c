//! Pagination module
//!
//! Cursor-based traversal of IBM Cloud list operations.
//!
//! # Overview
//!
//! A list operation returns one [`Page`] per call: the items plus an opaque
//! continuation token. The [`Pager`] feeds each token back into the next
//! request until a page arrives without one. Callers can consume pages one
//! at a time ([`Pager::get_next`]), all at once ([`Pager::get_all`]) or as
//! a `futures::Stream` ([`Pager::into_stream`]).
//!
//! Endpoints differ in the name of their cursor field (`start` for Transit
//! Gateway, `offset` for DNS Services); each [`PageRequest`] names its own.

mod json;
mod pager;
mod types;

pub use json::JsonListOperation;
pub use pager::{Pager, PagerState};
pub use types::{
    cursor_from_href, extract_jsonpath, list_fn, DynamicParams, FnListOperation, ListOperation,
    Page, PageRequest,
};

#[cfg(test)]
mod tests;
