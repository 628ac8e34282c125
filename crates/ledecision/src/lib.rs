//! ledecision - Decision Core
//!
//! *Le Décision* (The Decision) - recommendation ranking and JIT transfer planning for the
//! Blue Ship Sync warehouse service. Both operations are pure functions of a [`Catalog`];
//! the planner also takes the current time and a random source from its caller.

#![warn(missing_docs)]

/// Static reference data
pub mod catalog;

/// Error types
pub mod error;

/// Request and response types
pub mod models;

/// JIT transfer planning
pub mod planner;

/// Recommendation scoring and ranking
pub mod scorer;

/// Strict plan request checks
pub mod validation;

pub use catalog::{Candidate, CarrierEntry, Catalog, SourcePolicy};
pub use error::{CatalogError, PlanError, ValidationError};
pub use models::{
    Action, ActionType, CarrierOption, PlanRequest, PlanResponse, RankRequest, Recommendation,
};
pub use planner::plan_jit;
pub use scorer::{calculate_score, rank};
pub use validation::validate_plan_request;
