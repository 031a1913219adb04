/*!
   Module `mapping` translates between axum's HTTP types and the invocation events.

   Multi-valued headers and query keys keep only their first value. This mirrors what a
   single-value proxy integration delivers and is intentional.
*/

use greeter_core::{RequestEvent, ResponseEvent, ValueMap, canonical_header_key};

use axum::body::Body;
use axum::http::header::{InvalidHeaderName, InvalidHeaderValue};
use axum::http::status::InvalidStatusCode;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, request::Parts};
use axum::response::Response;
use thiserror::Error;
use url::form_urlencoded;

#[derive(Debug, Error)]
pub enum InvalidResponseError {
    #[error(transparent)]
    Status(#[from] InvalidStatusCode),
    #[error(transparent)]
    HeaderName(#[from] InvalidHeaderName),
    #[error(transparent)]
    HeaderValue(#[from] InvalidHeaderValue),
}

/// Builds the [RequestEvent] a proxy integration would deliver for this request.
///
/// The body is decoded as UTF-8, replacing invalid sequences, and is never flagged as base64.
pub fn request_event_from_parts(parts: &Parts, body: &[u8]) -> RequestEvent {
    RequestEvent::new(parts.method.as_str(), parts.uri.path())
        .with_headers(first_header_values(&parts.headers))
        .with_query_string_parameters(first_query_values(parts.uri.query()))
        .with_body(String::from_utf8_lossy(body), false)
}

/// One entry per header name, holding the first value seen under that name.
pub fn first_header_values(headers: &HeaderMap) -> ValueMap {
    headers
        .keys()
        .filter_map(|name| {
            let value = headers.get(name)?;
            Some((
                canonical_header_key(name.as_str()),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            ))
        })
        .collect()
}

/// Decodes a form-urlencoded query string, keeping the first value of every key.
pub fn first_query_values(query: Option<&str>) -> ValueMap {
    let mut params = ValueMap::new();
    for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}

/// Copies status, headers and body of a [ResponseEvent] onto an HTTP response.
///
/// # Errors
///
/// - [InvalidResponseError] if the status code, a header name or a header value cannot be
///   represented in HTTP.
pub fn response_from_event(event: &ResponseEvent) -> Result<Response, InvalidResponseError> {
    let status = StatusCode::from_u16(event.status_code())?;

    let mut response = Response::new(Body::from(event.body().to_owned()));
    *response.status_mut() = status;
    for (name, value) in event.headers() {
        response.headers_mut().insert(
            HeaderName::try_from(name.as_str())?,
            HeaderValue::try_from(value.as_str())?,
        );
    }

    Ok(response)
}
