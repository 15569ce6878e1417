//! Spu API crate - axum HTTP surface for the assistant.
//!
//! Serves the stateless chat endpoint used by the web front end plus a
//! health check. Clients send the full conversation with every request;
//! the server keeps no session state.

pub mod error;
pub mod handlers;
pub mod rate_limit;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
