use super::api::{ApiError, BodyReadError};
use super::mapping::{request_event_from_parts, response_from_event};
use super::{BodyLimits, LocalState, SimulatorState};

use greeter_core::report::{JsonReport, write_block};
use greeter_core::{InvocationHandler, hello_response};

use std::fmt::{self, Display, Formatter};

use axum::body::{Body, Bytes, to_bytes};
use axum::extract::{Request, State};
use axum::http::request::Parts;
use axum::response::Response;

/// Trace of a request as received by the local server, before any event mapping.
struct HttpRequestReport<'a> {
    parts: &'a Parts,
    body: &'a Result<Bytes, BodyReadError>,
}

/// Reads the whole body, bounded in size by `limits.max_bytes` and in total duration by
/// `limits.read_timeout`.
async fn read_body(body: Body, limits: BodyLimits) -> Result<Bytes, BodyReadError> {
    tokio::time::timeout(limits.read_timeout, to_bytes(body, limits.max_bytes))
        .await
        .map_err(|_| BodyReadError::TimedOut(limits.read_timeout))?
        .map_err(BodyReadError::from)
}

impl Display for HttpRequestReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_block(f, "HTTP Request", |f| {
            writeln!(f, "Method: {}", self.parts.method)?;
            writeln!(f, "URL: {}", self.parts.uri)?;
            writeln!(f, "Headers: {:?}", self.parts.headers)?;
            match self.body {
                Ok(body) => writeln!(f, "Body: {}", String::from_utf8_lossy(body)),
                Err(e) => writeln!(f, "Error reading body: {e}"),
            }
        })
    }
}

/// Log the raw request and answer with the shared hello response.
///
/// # Responses
///
/// - 200 OK: always, including when the body could not be read.
/// - 500 Internal server error: the hello response itself could not be built.
pub(super) async fn local_handler(
    State(state): State<LocalState>,
    request: Request,
) -> Result<Response, ApiError> {
    let (parts, body) = request.into_parts();
    let body = read_body(body, state.body_limits).await;

    tracing::info!(
        "{}",
        HttpRequestReport {
            parts: &parts,
            body: &body,
        }
    );

    let response = hello_response()?;
    Ok(response_from_event(&response)?)
}

/// Repackage the request as an invocation event, run it through the handler and translate
/// the handler's response back into HTTP.
///
/// # Responses
///
/// - Whatever status the handler's response event carries (200 for the hello handler).
/// - 500 Internal server error: the body could not be read, the handler failed, or its
///   response event is not valid HTTP. The body is plain text.
pub(super) async fn simulator_handler<H: InvocationHandler>(
    State(state): State<SimulatorState<H>>,
    request: Request,
) -> Result<Response, ApiError> {
    let (parts, body) = request.into_parts();
    let body = read_body(body, state.body_limits)
        .await
        .map_err(ApiError::BodyRead)?;

    let event = request_event_from_parts(&parts, &body);
    tracing::info!("{}", JsonReport::new("API Gateway Simulator Request", &event));

    let response = state.handler.invoke(&event).await?;
    tracing::info!("{}", JsonReport::new("API Gateway Simulator Response", &response));

    Ok(response_from_event(&response)?)
}
