//! TXTDirect Application Layer
pub mod ports;
pub mod response_sink;
pub mod services;
pub mod use_cases;

pub use response_sink::ResponseSink;
