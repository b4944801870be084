mod hook;
mod sink;

pub use hook::ResponseHook;
pub use sink::{DiagnosticSink, Level, LogSink, MemorySink};

use crate::response::Response;
use log::trace;

const ABSENT: &str = "undefined";

/// Completion signal handed back to the engine.
///
/// `call` takes `self`, so a signal can fire at most once.
pub struct Proceed(Box<dyn FnOnce() + Send>);

impl Proceed {
    pub fn new(f: impl FnOnce() + Send + 'static) -> Self {
        Proceed(Box::new(f))
    }

    pub fn noop() -> Self {
        Proceed::new(|| {})
    }

    pub fn call(self) {
        (self.0)()
    }
}

impl std::fmt::Debug for Proceed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Proceed")
    }
}

/// Logs status and body of every response, plus headers when the
/// response failed or came back empty.
#[derive(Debug, Clone, Default)]
pub struct ResponseInspector<S> {
    sink: S,
}

impl<S: DiagnosticSink> ResponseInspector<S> {
    pub fn new(sink: S) -> Self {
        ResponseInspector { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Report on `response`, then release the engine through `proceed`.
    /// The pass-through arguments are not read.
    pub fn inspect<Req: ?Sized, Ctx: ?Sized, Ev: ?Sized>(
        &self,
        _request: &Req,
        response: &Response,
        _context: &Ctx,
        _events: &Ev,
        proceed: Proceed,
    ) {
        self.report(response);
        trace!("releasing engine");
        proceed.call();
    }

    pub fn report(&self, response: &Response) {
        let status = response
            .status_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| ABSENT.to_string());
        self.sink.info(&format!("Response status: {}", status));
        self.sink.info(&format!(
            "Response body: {}",
            response.body.as_deref().unwrap_or(ABSENT)
        ));

        if response.is_failure() {
            self.sink.error("Failed request or empty body");
            self.sink
                .error(&format!("Headers: {}", render_headers(response)));
        }
    }
}

fn render_headers(response: &Response) -> String {
    serde_json::to_string(&response.headers).unwrap_or_else(|_| format!("{:?}", response.headers))
}
