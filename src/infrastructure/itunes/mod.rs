//! iTunes Search API client.

mod client;
pub mod dto;
mod http_cache;
pub mod request_url;

pub use client::{ITUNES_API_BASE, ItunesClient, LOOKUP_TIMEOUT};
pub use http_cache::HttpResponseCache;
