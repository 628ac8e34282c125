//! Request and response types shared by the scorer and the planner

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of instruction attached to a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    /// Move stock between two warehouses
    CreateTransfer,

    /// Book a carrier for an outbound shipment
    CreateShipment,

    /// Reorder stock from a supplier
    CreatePurchaseOrder,

    /// Merge several pending shipments into one
    ConsolidateShipments,
}

/// Structured instruction for downstream execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Action tag
    #[serde(rename = "type")]
    pub action_type: ActionType,

    /// Tag-specific parameters
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl Action {
    /// Create an action with no parameters
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            params: Map::new(),
        }
    }

    /// Add a parameter, builder style
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Look up a parameter by name
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }
}

/// Ranked recommendation returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Identifier, unique within one response
    pub id: String,

    /// Short headline
    pub title: String,

    /// Score in [0, 1]
    pub score: f64,

    /// Why this recommendation was produced
    pub rationale: String,

    /// Ordered actions to execute
    pub actions: Vec<Action>,
}

/// Carrier offer computed for a single plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierOption {
    /// Carrier display name
    pub name: String,

    /// Shipping cost
    pub cost: f64,

    /// Estimated arrival
    pub eta: DateTime<Utc>,

    /// Historical on-time ratio in [0, 1]
    pub reliability: f64,

    /// Units the carrier can take on this run
    pub capacity: u32,
}

/// Body of a ranking request
///
/// Both fields are accepted for forward compatibility; ranking does not read them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankRequest {
    /// Warehouse the caller is interested in
    #[serde(default)]
    pub warehouse_id: Option<String>,

    /// Free-form caller context
    #[serde(default)]
    pub context: Map<String, Value>,
}

/// Body of a JIT planning request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// SKU to move
    pub sku_id: String,

    /// Units to move
    pub qty: i64,

    /// Warehouse receiving the stock
    pub dest_warehouse_id: String,
}

impl PlanRequest {
    /// Convenience constructor
    pub fn new(sku_id: impl Into<String>, qty: i64, dest_warehouse_id: impl Into<String>) -> Self {
        Self {
            sku_id: sku_id.into(),
            qty,
            dest_warehouse_id: dest_warehouse_id.into(),
        }
    }
}

/// Result of JIT planning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    /// Transfer recommendation with its two actions
    pub recommendation: Recommendation,

    /// Carrier offers, cheapest first
    pub carriers: Vec<CarrierOption>,

    /// Human-readable plan summary
    pub explanation: String,
}
