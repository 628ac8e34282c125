//! Error types for catalog loading, planning and request validation

use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Errors raised while loading or checking a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog file {path:?}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid TOML for a catalog
    #[error("Failed to parse catalog file {path:?}: {source}")]
    Parse {
        /// File that was being parsed
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// Catalog could not be rendered as TOML
    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No carriers to choose from
    #[error("Catalog must define at least one carrier")]
    NoCarriers,

    /// Two candidates share an id
    #[error("Duplicate candidate id: {0}")]
    DuplicateCandidate(String),

    /// Candidate has no entry in the action template table
    #[error("Candidate {0} has no action template")]
    MissingActionTemplate(String),

    /// A scoring factor is NaN or infinite
    #[error("Candidate {id} has a non-finite {factor} factor")]
    NonFiniteFactor {
        /// Candidate id
        id: String,
        /// Factor name
        factor: &'static str,
    },

    /// Carrier cost is negative, NaN or infinite
    #[error("Carrier {name} has invalid cost {cost}, expected a finite value >= 0")]
    InvalidCarrierCost {
        /// Carrier name
        name: String,
        /// Offending cost
        cost: f64,
    },

    /// Carrier reliability falls outside [0, 1]
    #[error("Carrier {name} has invalid reliability {reliability}, expected a value in [0, 1]")]
    InvalidCarrierReliability {
        /// Carrier name
        name: String,
        /// Offending reliability
        reliability: f64,
    },

    /// Carrier transit time exceeds the supported horizon
    #[error("Carrier {name} has eta_hours {eta_hours}, maximum is {max}")]
    CarrierEtaTooLong {
        /// Carrier name
        name: String,
        /// Offending transit time
        eta_hours: u32,
        /// Largest accepted transit time
        max: u32,
    },

    /// A source policy route resolves to no warehouse
    #[error("Source policy for destination {0:?} has no candidate warehouses")]
    EmptySourceRoute(String),
}

/// Errors raised by the planner when the catalog cannot satisfy a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Source policy yields no warehouse for the destination
    #[error("No source warehouse available for destination {0}")]
    NoSourceWarehouse(String),

    /// Catalog has no carriers
    #[error("No carriers available")]
    NoCarriers,

    /// Carrier arrival time does not fit in a timestamp
    #[error("ETA for carrier {0} is out of range")]
    EtaOutOfRange(String),
}

/// Strict-mode rejections of a plan request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// SKU id is empty or whitespace
    #[error("sku_id must not be empty")]
    EmptySku,

    /// SKU is not in the catalog
    #[error("Unknown SKU: {0}")]
    UnknownSku(String),

    /// Quantity is zero or negative
    #[error("qty must be positive, got {0}")]
    NonPositiveQuantity(i64),

    /// Destination is not a known warehouse
    #[error("Unknown destination warehouse: {0}")]
    UnknownWarehouse(String),
}
