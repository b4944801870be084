pub mod inspector;
pub mod response;
pub mod server;

pub use inspector::{DiagnosticSink, LogSink, Proceed, ResponseHook, ResponseInspector};
pub use response::Response;
