use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name → single value mapping used for headers, query and path parameters.
pub type ValueMap = BTreeMap<String, String>;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Renders a header name in canonical MIME form: the first letter and every letter following
/// a hyphen upper-cased, the rest lower-cased (`x-request-id` becomes `X-Request-Id`).
pub fn canonical_header_key(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

/// An inbound request in the shape an API Gateway proxy integration hands to a function.
///
/// Multi-valued headers and query keys are reduced to their first value before they reach
/// this type. Fields are serialized with the proxy event's own names so a logged event reads
/// like the payload the platform would deliver.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestEvent {
    path: String,
    http_method: String,
    headers: ValueMap,
    query_string_parameters: ValueMap,
    path_parameters: ValueMap,
    body: String,
    is_base64_encoded: bool,
}

impl RequestEvent {
    pub fn new(http_method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_headers(self, headers: ValueMap) -> Self {
        Self { headers, ..self }
    }

    pub fn with_query_string_parameters(self, query_string_parameters: ValueMap) -> Self {
        Self {
            query_string_parameters,
            ..self
        }
    }

    pub fn with_path_parameters(self, path_parameters: ValueMap) -> Self {
        Self {
            path_parameters,
            ..self
        }
    }

    pub fn with_body(self, body: impl Into<String>, is_base64_encoded: bool) -> Self {
        Self {
            body: body.into(),
            is_base64_encoded,
            ..self
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn http_method(&self) -> &str {
        &self.http_method
    }

    pub fn headers(&self) -> &ValueMap {
        &self.headers
    }

    pub fn query_string_parameters(&self) -> &ValueMap {
        &self.query_string_parameters
    }

    pub fn path_parameters(&self) -> &ValueMap {
        &self.path_parameters
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_base64_encoded(&self) -> bool {
        self.is_base64_encoded
    }
}

/// The outbound counterpart of [RequestEvent], consumed by whichever entrypoint emits it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEvent {
    status_code: u16,
    headers: ValueMap,
    body: String,
}

impl ResponseEvent {
    pub fn new(status_code: u16, headers: ValueMap, body: impl Into<String>) -> Self {
        Self {
            status_code,
            headers,
            body: body.into(),
        }
    }

    /// A response carrying `payload` serialized as JSON, with a matching content type.
    pub fn json<T: Serialize>(status_code: u16, payload: &T) -> Result<Self, InvocationError> {
        let body = serde_json::to_string(payload)?;
        let headers = ValueMap::from([(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())]);

        Ok(Self::new(status_code, headers, body))
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &ValueMap {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// The payload every entrypoint answers with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    message: String,
}

impl Greeting {
    pub const HELLO: &'static str = "hello";

    pub fn hello() -> Self {
        Self {
            message: Self::HELLO.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("failed to serialize response payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_request_event_uses_proxy_field_names() {
        let event = RequestEvent::new("GET", "/")
            .with_query_string_parameters(ValueMap::from([("q".into(), "1".into())]));

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["httpMethod"], "GET");
        assert_eq!(json["queryStringParameters"]["q"], "1");
        assert_eq!(json["isBase64Encoded"], false);
        assert!(json["pathParameters"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_canonical_header_key() {
        assert_eq!(canonical_header_key("x-test"), "X-Test");
        assert_eq!(canonical_header_key("CONTENT-TYPE"), "Content-Type");
        assert_eq!(canonical_header_key("x--double"), "X--Double");
        assert_eq!(canonical_header_key("host"), "Host");
    }

    #[test]
    fn test_empty_object_is_zero_valued_event() {
        let event: RequestEvent = serde_json::from_str("{}").unwrap();

        assert_eq!(event, RequestEvent::default());
    }

    #[test]
    fn test_json_response_sets_content_type() {
        let response = ResponseEvent::json(200, &Greeting::hello()).unwrap();

        assert_eq!(response.status_code(), 200);
        assert_eq!(response.body(), r#"{"message":"hello"}"#);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).map(String::as_str),
            Some(APPLICATION_JSON)
        );
    }
}
