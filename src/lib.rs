//! Catalog Router Library
//!
//! Declarative route table for the character / episode / location catalog
//! browser, with forward and reverse lookup, an in-memory navigation
//! history, and an HTTP resolution API.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Navigator, RouteTable};
