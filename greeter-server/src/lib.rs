pub mod inbound;

pub use inbound::{
    BodyLimits, DEFAULT_BODY_READ_TIMEOUT, DEFAULT_MAX_BODY_BYTES, HttpServer, HttpServerConfig,
    local_router, simulator_router,
};
