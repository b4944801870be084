use super::{DiagnosticSink, Proceed, ResponseInspector};
use crate::response::Response;

/// Trait for hooks the load engine runs after each completed exchange
///
/// `request`, `context` and `events` belong to the engine and are passed
/// through untouched. Implementations must call `proceed` exactly once.
pub trait ResponseHook<Req, Ctx, Ev>: Send + Sync {
    /// Called after receiving a response
    fn after_response(
        &self,
        request: &Req,
        response: &Response,
        context: &Ctx,
        events: &Ev,
        proceed: Proceed,
    );
}

impl<S, Req, Ctx, Ev> ResponseHook<Req, Ctx, Ev> for ResponseInspector<S>
where
    S: DiagnosticSink,
{
    fn after_response(
        &self,
        request: &Req,
        response: &Response,
        context: &Ctx,
        events: &Ev,
        proceed: Proceed,
    ) {
        self.inspect(request, response, context, events, proceed);
    }
}
