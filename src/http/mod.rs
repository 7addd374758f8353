//! HTTP server for the aggregation API.
//!
//! Thin layer over the services: `router` wires the endpoints, `state`
//! carries the shared snapshots, `handlers` map requests to service
//! calls and `error` maps failures onto status codes.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
