//! Parley API crate - axum HTTP server and route handlers.
//!
//! Exposes conversation management and message exchange over JSON, with the
//! response engine generating the bot side of every exchange.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
