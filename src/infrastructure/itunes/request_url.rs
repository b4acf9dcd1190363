//! Maps catalog requests onto iTunes Search API URLs.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::Url;

use crate::domain::entities::CatalogRequest;
use crate::domain::errors::CatalogError;
use crate::infrastructure::locale::Locale;

const LOOKUP_PATH: &str = "lookup";
const SEARCH_PATH: &str = "search";
const SOFTWARE_ENTITY: &str = "software";

/// Bytes escaped in query values: whitespace and controls, `%`, RFC 3986
/// reserved characters and the characters URLs may never carry literally.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'%')
    .add(b':')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'[')
    .add(b']')
    .add(b'@')
    .add(b'!')
    .add(b'$')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'=')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encodes a query value. Unreserved ASCII is left as is.
#[must_use]
pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Returns the endpoint path and encoded query string for `request`.
#[must_use]
pub fn path_and_query(request: &CatalogRequest, locale: &Locale) -> (&'static str, String) {
    let (path, selector) = match request {
        CatalogRequest::Developer(id) => (LOOKUP_PATH, format!("id={id}")),
        CatalogRequest::AppIds(ids) => {
            let joined = ids
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(",");
            (LOOKUP_PATH, format!("id={joined}"))
        }
        CatalogRequest::SearchTerm(term) => {
            (SEARCH_PATH, format!("term={}", encode_query_value(term)))
        }
    };

    let query = format!(
        "{selector}&entity={SOFTWARE_ENTITY}&country={}&l={}",
        encode_query_value(locale.country()),
        encode_query_value(locale.language()),
    );

    (path, query)
}

/// Builds the full request URL against `base_url`.
///
/// # Errors
/// Returns [`CatalogError::UnbuildableRequest`] if the result is not a valid URL.
pub fn build_url(
    base_url: &str,
    request: &CatalogRequest,
    locale: &Locale,
) -> Result<Url, CatalogError> {
    let (path, query) = path_and_query(request, locale);
    let raw = format!("{}/{path}?{query}", base_url.trim_end_matches('/'));
    Url::parse(&raw).map_err(|_| CatalogError::UnbuildableRequest)
}
