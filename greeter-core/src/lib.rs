pub mod models;
pub mod ports;
pub mod report;
pub mod service;

pub use models::{
    Greeting, InvocationError, RequestEvent, ResponseEvent, ValueMap, canonical_header_key,
};
pub use ports::InvocationHandler;
pub use service::{HelloHandler, hello_response};
