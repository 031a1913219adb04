/*!
   Module `service` provides the canonical implementation of the [InvocationHandler] port.
*/

use super::{
    models::{Greeting, InvocationError, RequestEvent, ResponseEvent},
    ports::InvocationHandler,
    report::InvocationReport,
};

/// Builds the response shared by every entrypoint: 200 with the [Greeting] as JSON.
pub fn hello_response() -> Result<ResponseEvent, InvocationError> {
    ResponseEvent::json(200, &Greeting::hello())
}

/// Logs each event it receives and answers with [hello_response].
#[derive(Debug, Clone, Copy, Default)]
pub struct HelloHandler;

impl InvocationHandler for HelloHandler {
    async fn invoke(&self, event: &RequestEvent) -> Result<ResponseEvent, InvocationError> {
        tracing::info!("{}", InvocationReport(event));

        hello_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::{APPLICATION_JSON, CONTENT_TYPE, ValueMap};

    #[tokio::test]
    async fn test_zero_valued_event_gets_hello() {
        let response = HelloHandler.invoke(&RequestEvent::default()).await.unwrap();

        assert_eq!(response.status_code(), 200);
        assert_eq!(response.body(), r#"{"message":"hello"}"#);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).map(String::as_str),
            Some(APPLICATION_JSON)
        );
    }

    #[tokio::test]
    async fn test_response_does_not_depend_on_event() {
        let event = RequestEvent::new("DELETE", "/anything/else")
            .with_headers(ValueMap::from([("X-Test".into(), "a".into())]))
            .with_path_parameters(ValueMap::from([("id".into(), "7".into())]))
            .with_body("not json at all", true);

        let response = HelloHandler.invoke(&event).await.unwrap();

        assert_eq!(response, hello_response().unwrap());
    }
}
