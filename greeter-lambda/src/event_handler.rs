use greeter_core::{InvocationHandler, RequestEvent, ResponseEvent, ValueMap, canonical_header_key};

use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use http::header::{InvalidHeaderName, InvalidHeaderValue};
use http::{HeaderMap, HeaderName, HeaderValue};
use lambda_runtime::{Diagnostic, LambdaEvent, tracing};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyResponseError {
    #[error(transparent)]
    HeaderName(#[from] InvalidHeaderName),
    #[error(transparent)]
    HeaderValue(#[from] InvalidHeaderValue),
}

/// Reduces a proxy request to a [RequestEvent], keeping the first value of every header and
/// query key.
pub fn request_event_from_proxy(request: &ApiGatewayProxyRequest) -> RequestEvent {
    let headers: ValueMap = request
        .headers
        .keys()
        .filter_map(|name| {
            let value = request.headers.get(name)?;
            Some((
                canonical_header_key(name.as_str()),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            ))
        })
        .collect();

    let mut query = ValueMap::new();
    for (key, value) in request.query_string_parameters.iter() {
        query
            .entry(key.to_string())
            .or_insert_with(|| value.to_string());
    }

    let path_parameters: ValueMap = request
        .path_parameters
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    RequestEvent::new(
        request.http_method.as_str(),
        request.path.as_deref().unwrap_or_default(),
    )
    .with_headers(headers)
    .with_query_string_parameters(query)
    .with_path_parameters(path_parameters)
    .with_body(
        request.body.as_deref().unwrap_or_default(),
        request.is_base64_encoded,
    )
}

/// Expresses a [ResponseEvent] as the proxy response the platform expects.
pub fn proxy_response_from_event(
    event: &ResponseEvent,
) -> Result<ApiGatewayProxyResponse, ProxyResponseError> {
    let mut headers = HeaderMap::new();
    for (name, value) in event.headers() {
        headers.insert(
            HeaderName::try_from(name.as_str())?,
            HeaderValue::try_from(value.as_str())?,
        );
    }

    Ok(ApiGatewayProxyResponse {
        status_code: i64::from(event.status_code()),
        headers,
        body: Some(Body::Text(event.body().to_owned())),
        is_base64_encoded: false,
        ..Default::default()
    })
}

pub(crate) async fn function_handler<H: InvocationHandler>(
    handler: &H,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Diagnostic> {
    tracing::debug!(request_id = %event.context.request_id, "received proxy event");

    let request = request_event_from_proxy(&event.payload);
    let response = handler
        .invoke(&request)
        .await
        .map_err(anyhow::Error::from)?;

    Ok(proxy_response_from_event(&response).map_err(anyhow::Error::from)?)
}

#[cfg(test)]
mod test {
    use super::*;

    use greeter_core::{HelloHandler, InvocationError};

    use std::collections::HashMap;

    use http::Method;
    use lambda_runtime::Context;

    #[derive(Debug, Clone)]
    struct FailingHandler;

    impl InvocationHandler for FailingHandler {
        async fn invoke(&self, _: &RequestEvent) -> Result<ResponseEvent, InvocationError> {
            Err(InvocationError::Unknown(anyhow::anyhow!("boom")))
        }
    }

    fn proxy_request() -> ApiGatewayProxyRequest {
        let mut headers = HeaderMap::new();
        headers.append("x-test", HeaderValue::from_static("a"));
        headers.append("x-test", HeaderValue::from_static("b"));

        ApiGatewayProxyRequest {
            path: Some("/foo".to_string()),
            http_method: Method::POST,
            headers,
            query_string_parameters: HashMap::from([("q".to_string(), "1".to_string())]).into(),
            path_parameters: HashMap::from([("id".to_string(), "7".to_string())]),
            body: Some(r#"{"k":"v"}"#.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_request_event_from_proxy() {
        let event = request_event_from_proxy(&proxy_request());

        assert_eq!(event.path(), "/foo");
        assert_eq!(event.http_method(), "POST");
        assert_eq!(event.body(), r#"{"k":"v"}"#);
        assert_eq!(
            event.headers(),
            &ValueMap::from([("X-Test".into(), "a".into())])
        );
        assert_eq!(
            event.query_string_parameters(),
            &ValueMap::from([("q".into(), "1".into())])
        );
        assert_eq!(
            event.path_parameters(),
            &ValueMap::from([("id".into(), "7".into())])
        );
        assert!(!event.is_base64_encoded());
    }

    #[test]
    fn test_zero_valued_proxy_request() {
        let event = request_event_from_proxy(&ApiGatewayProxyRequest::default());

        assert_eq!(event.path(), "");
        assert_eq!(event.body(), "");
        assert!(event.headers().is_empty());
    }

    #[test]
    fn test_proxy_response_rejects_invalid_header() {
        let event = ResponseEvent::new(200, ValueMap::from([("x".into(), "a\nb".into())]), "");

        assert!(matches!(
            proxy_response_from_event(&event),
            Err(ProxyResponseError::HeaderValue(_))
        ));
    }

    #[tokio::test]
    async fn test_function_handler_answers_hello() {
        let event = LambdaEvent::new(proxy_request(), Context::default());

        let response = function_handler(&HelloHandler, event).await.unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["content-type"], "application/json");
        assert_eq!(
            response.body,
            Some(Body::Text(r#"{"message":"hello"}"#.to_string()))
        );
        assert!(!response.is_base64_encoded);
    }

    #[tokio::test]
    async fn test_function_handler_reports_failure() {
        let event = LambdaEvent::new(ApiGatewayProxyRequest::default(), Context::default());

        let result = function_handler(&FailingHandler, event).await;

        assert!(result.is_err());
    }

    #[test]
    fn test_proxy_response_serializes_like_the_platform_expects() {
        let response = proxy_response_from_event(&greeter_core::hello_response().unwrap()).unwrap();

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["body"], r#"{"message":"hello"}"#);
        assert_eq!(json["headers"]["content-type"], "application/json");
    }
}
