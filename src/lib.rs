//! A minimal HTTP server that answers `GET /` and applies a CORS policy loaded
//! from a JSON file at startup.
//!
//! The policy engine is usable on its own:
//!
//! ```
//! use cors_gate::{AllowedOrigins, CorsDecision, CorsEngine, PolicyConfig, RequestContext};
//!
//! let engine = CorsEngine::new(
//!     PolicyConfig::new().allowed_origins(AllowedOrigins::list(["https://app.example"])),
//! );
//!
//! let request = RequestContext::new("GET").with_origin("https://app.example");
//! assert!(matches!(engine.check(&request), CorsDecision::Simple(_)));
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod logging;

mod allowed_headers;
mod allowed_methods;
mod context;
mod engine;
mod error;
mod exposed_headers;
mod header_builder;
mod headers;
mod origin;
mod policy;
mod result;
mod routes;
mod service;
mod util;

pub use allowed_headers::AllowedHeaders;
pub use allowed_methods::AllowedMethods;
pub use config::ConfigError;
pub use context::RequestContext;
pub use engine::CorsEngine;
pub use error::AppError;
pub use exposed_headers::ExposedHeaders;
pub use headers::Headers;
pub use origin::{AllowedOrigins, OriginDecision, OriginPredicateFn};
pub use policy::{PolicyConfig, ValidationError};
pub use result::{CorsDecision, PreflightResult, RejectedResult, SimpleResult};
pub use routes::Routes;
pub use service::{Body, CorsService};
