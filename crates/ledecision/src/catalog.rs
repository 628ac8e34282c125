//! Static reference data
//!
//! Everything the scorer and planner read lives here: candidate recommendations, their action
//! templates, the carrier list, the warehouse universe and the source-warehouse policy. The
//! built-in [`Catalog::default`] carries the mock data; a TOML file with the same shape can
//! replace it.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Action, ActionType};

/// Longest carrier transit time a catalog may declare, one year
pub const MAX_ETA_HOURS: u32 = 24 * 365;

/// Candidate recommendation before scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Recommendation id, also the key into the action template table
    pub id: String,

    /// Short headline
    pub title: String,

    /// How soon this needs attention
    pub urgency: f64,

    /// Expected benefit
    pub impact: f64,

    /// Cost of carrying it out
    pub effort: f64,

    /// Trust in the underlying signal
    pub confidence: f64,

    /// Why this recommendation exists
    pub rationale: String,
}

/// Carrier entry in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierEntry {
    /// Carrier display name
    pub name: String,

    /// Base cost
    pub cost: f64,

    /// Transit time in hours from the moment of planning
    pub eta_hours: u32,

    /// Historical on-time ratio
    pub reliability: f64,
}

/// Maps a destination warehouse to the warehouses stock may come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcePolicy {
    /// Candidates for any destination without a route
    pub fallback: Vec<String>,

    /// Destination-specific candidates
    #[serde(default)]
    pub routes: BTreeMap<String, Vec<String>>,
}

impl SourcePolicy {
    /// Candidate source warehouses for `dest`
    pub fn candidates_for(&self, dest: &str) -> &[String] {
        self.routes
            .get(dest)
            .map(Vec::as_slice)
            .unwrap_or(&self.fallback)
    }
}

impl Default for SourcePolicy {
    /// Stock for CHI comes from DAL; every other destination is served from CHI.
    fn default() -> Self {
        let mut routes = BTreeMap::new();
        routes.insert("CHI".to_string(), vec!["DAL".to_string()]);
        Self {
            fallback: vec!["CHI".to_string()],
            routes,
        }
    }
}

/// All reference data used by the decision core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Known warehouse codes
    pub warehouses: Vec<String>,

    /// Known SKU ids
    pub skus: Vec<String>,

    /// Candidates ranked by the scorer, in tie-break order
    pub candidates: Vec<Candidate>,

    /// Actions attached to each candidate, keyed by candidate id
    pub action_templates: BTreeMap<String, Vec<Action>>,

    /// Carriers offered by the planner, in tie-break order
    pub carriers: Vec<CarrierEntry>,

    /// Source warehouse selection
    #[serde(default)]
    pub source_policy: SourcePolicy,
}

impl Catalog {
    /// Load and check a catalog from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog: Catalog = toml::from_str(&content).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        catalog.validate()?;
        Ok(catalog)
    }

    /// Render the catalog as TOML
    pub fn to_toml_string(&self) -> CatalogResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the catalog can serve every operation
    pub fn validate(&self) -> CatalogResult<()> {
        if self.carriers.is_empty() {
            return Err(CatalogError::NoCarriers);
        }

        for carrier in &self.carriers {
            if !carrier.cost.is_finite() || carrier.cost < 0.0 {
                return Err(CatalogError::InvalidCarrierCost {
                    name: carrier.name.clone(),
                    cost: carrier.cost,
                });
            }
            // NaN fails the range check
            if !(0.0..=1.0).contains(&carrier.reliability) {
                return Err(CatalogError::InvalidCarrierReliability {
                    name: carrier.name.clone(),
                    reliability: carrier.reliability,
                });
            }
            if carrier.eta_hours > MAX_ETA_HOURS {
                return Err(CatalogError::CarrierEtaTooLong {
                    name: carrier.name.clone(),
                    eta_hours: carrier.eta_hours,
                    max: MAX_ETA_HOURS,
                });
            }
        }

        let mut seen = HashSet::new();
        for candidate in &self.candidates {
            if !seen.insert(candidate.id.as_str()) {
                return Err(CatalogError::DuplicateCandidate(candidate.id.clone()));
            }

            let factors = [
                ("urgency", candidate.urgency),
                ("impact", candidate.impact),
                ("effort", candidate.effort),
                ("confidence", candidate.confidence),
            ];
            if let Some((factor, _)) = factors.iter().find(|(_, v)| !v.is_finite()) {
                return Err(CatalogError::NonFiniteFactor {
                    id: candidate.id.clone(),
                    factor: *factor,
                });
            }

            match self.action_templates.get(&candidate.id) {
                Some(actions) if !actions.is_empty() => {}
                _ => return Err(CatalogError::MissingActionTemplate(candidate.id.clone())),
            }
        }

        if self.source_policy.fallback.is_empty() {
            return Err(CatalogError::EmptySourceRoute("*".to_string()));
        }
        if let Some((dest, _)) = self
            .source_policy
            .routes
            .iter()
            .find(|(_, sources)| sources.is_empty())
        {
            return Err(CatalogError::EmptySourceRoute(dest.clone()));
        }

        Ok(())
    }

    /// Actions for a candidate id, empty if none are registered
    pub fn actions_for(&self, id: &str) -> &[Action] {
        self.action_templates
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `code` names a known warehouse
    pub fn has_warehouse(&self, code: &str) -> bool {
        self.warehouses.iter().any(|w| w == code)
    }

    /// Whether `sku` is a known SKU
    pub fn has_sku(&self, sku: &str) -> bool {
        self.skus.iter().any(|s| s == sku)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let candidates = vec![
            Candidate {
                id: "rec_001".to_string(),
                title: "Optimize SKU-004 Transfer".to_string(),
                urgency: 0.8,
                impact: 0.9,
                effort: 0.3,
                confidence: 0.85,
                rationale: "High demand in CHI warehouse, excess stock in DAL. Transfer will \
                            reduce stockouts and improve customer satisfaction."
                    .to_string(),
            },
            Candidate {
                id: "rec_002".to_string(),
                title: "Reorder SKU-010".to_string(),
                urgency: 0.6,
                impact: 0.7,
                effort: 0.2,
                confidence: 0.9,
                rationale: "Low stock levels detected, high order frequency. Proactive reorder \
                            prevents future stockouts."
                    .to_string(),
            },
            Candidate {
                id: "rec_003".to_string(),
                title: "Consolidate Shipments".to_string(),
                urgency: 0.4,
                impact: 0.6,
                effort: 0.5,
                confidence: 0.75,
                rationale: "Multiple small shipments to same destination. Consolidation \
                            reduces costs and improves efficiency."
                    .to_string(),
            },
        ];

        let mut action_templates = BTreeMap::new();
        action_templates.insert(
            "rec_001".to_string(),
            vec![
                Action::new(ActionType::CreateTransfer)
                    .with_param("from", "DAL")
                    .with_param("to", "CHI")
                    .with_param("sku", "SKU-004")
                    .with_param("qty", 20),
                Action::new(ActionType::CreateShipment)
                    .with_param("carrier", "FastX EXP")
                    .with_param("priority", "high"),
            ],
        );
        action_templates.insert(
            "rec_002".to_string(),
            vec![Action::new(ActionType::CreatePurchaseOrder)
                .with_param("sku", "SKU-010")
                .with_param("qty", 100)
                .with_param("supplier", "Supplier A")],
        );
        action_templates.insert(
            "rec_003".to_string(),
            vec![Action::new(ActionType::ConsolidateShipments)
                .with_param("shipment_ids", json!(["SHP-5007", "SHP-5008"]))],
        );

        let carriers = vec![
            CarrierEntry {
                name: "FastX EXP".to_string(),
                cost: 150.0,
                eta_hours: 2,
                reliability: 0.95,
            },
            CarrierEntry {
                name: "Econo STD".to_string(),
                cost: 75.0,
                eta_hours: 24,
                reliability: 0.85,
            },
            CarrierEntry {
                name: "Premium Air".to_string(),
                cost: 200.0,
                eta_hours: 4,
                reliability: 0.98,
            },
        ];

        Self {
            warehouses: vec!["CHI".to_string(), "DAL".to_string()],
            skus: vec![
                "SKU-001".to_string(),
                "SKU-004".to_string(),
                "SKU-010".to_string(),
            ],
            candidates,
            action_templates,
            carriers,
            source_policy: SourcePolicy::default(),
        }
    }
}
