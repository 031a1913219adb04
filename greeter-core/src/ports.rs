/*
   Module `ports` specifies the API through which entrypoints reach the invocation handler.

   The trait is bounded by `Clone + Send + Sync + 'static`, since implementations are shared
   between request-handling tasks of the HTTP servers and the function runtime.
*/

use std::future::Future;

use crate::models::{InvocationError, RequestEvent, ResponseEvent};

/// `InvocationHandler` is the function every entrypoint ultimately calls.
///
/// Entrypoints adapt their native request types into a [RequestEvent] and the returned
/// [ResponseEvent] back into their native response; the handler never sees transport details.
pub trait InvocationHandler: Clone + Send + Sync + 'static {
    /// Asynchronously handle one invocation.
    ///
    /// # Errors
    ///
    /// - [InvocationError::Serialize] if the response payload cannot be serialized.
    /// - [InvocationError::Unknown] for any other failure an implementation reports.
    fn invoke(
        &self,
        event: &RequestEvent,
    ) -> impl Future<Output = Result<ResponseEvent, InvocationError>> + Send;
}
