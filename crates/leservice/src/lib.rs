//! leservice - HTTP Service
//!
//! *Le Service* (The Service) - Axum-based HTTP front end for the Blue Ship Sync decision core

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// API error types
pub mod error;

/// HTTP handlers for REST endpoints
pub mod handlers;

/// Service configuration from TOML and environment
pub mod config;

/// API response types owned by the service
pub mod responses;

/// Server instance management
pub mod server;

/// Command-line interface
pub mod cli;

pub use config::ServiceConfig;
pub use error::{ApiError, ApiResult};
pub use handlers::{create_router, AppState};
pub use server::{build_app, AiServiceServer};
