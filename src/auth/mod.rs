//! Authentication layer: strategies, credential decoding, path exemptions
//! and the axum glue that runs them per request.

pub mod basic;
pub mod codec;
pub mod exemption;
pub mod middleware;
pub mod password;
pub mod request;
pub mod session;
pub mod strategy;

pub use basic::BasicAuth;
pub use exemption::{requires_auth, ExemptionList};
pub use middleware::{AppState, CurrentUser};
pub use request::AuthRequest;
pub use session::SessionAuth;
pub use strategy::AuthStrategy;
