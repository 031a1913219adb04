mod event_handler;

pub use event_handler::{ProxyResponseError, proxy_response_from_event, request_event_from_proxy};

use greeter_core::InvocationHandler;

use aws_lambda_events::event::apigw::ApiGatewayProxyRequest;
use lambda_runtime::{Error, LambdaEvent, service_fn, tracing};

/// Installs the runtime's default subscriber and serves API Gateway proxy events through
/// `handler` until the runtime shuts down.
pub async fn run<H: InvocationHandler>(handler: H) -> Result<(), Error> {
    tracing::init_default_subscriber();

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<ApiGatewayProxyRequest>| {
            let handler = handler.clone();
            async move { event_handler::function_handler(&handler, event).await }
        },
    ))
    .await
}
