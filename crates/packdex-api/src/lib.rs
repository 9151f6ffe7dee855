//! HTTP API boundary for packdex.
//!
//! A thin axum layer over the domain engine: request DTOs in, response
//! DTOs out, domain errors mapped deterministically to status codes.

pub mod config;
pub mod error;
pub mod server;
pub mod state;
pub mod types;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use server::{create_router, run_server};
pub use state::ApiState;
