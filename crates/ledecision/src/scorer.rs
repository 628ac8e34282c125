// Recommendation scoring and ranking

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Candidate, Catalog};
use crate::models::{RankRequest, Recommendation};

/// Lower bound of every score
pub const MIN_SCORE: f64 = 0.0;

/// Upper bound of every score
pub const MAX_SCORE: f64 = 1.0;

/// The four factors a candidate is scored on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ScoreFactors {
    /// How soon this needs attention
    pub urgency: f64,

    /// Expected benefit
    pub impact: f64,

    /// Cost of carrying it out, subtracted
    pub effort: f64,

    /// Trust in the signal
    pub confidence: f64,
}

impl ScoreFactors {
    /// Create a factor set
    pub fn new(urgency: f64, impact: f64, effort: f64, confidence: f64) -> Self {
        Self {
            urgency,
            impact,
            effort,
            confidence,
        }
    }

    /// Unclamped linear combination
    pub fn raw(&self) -> f64 {
        self.urgency + self.impact - self.effort + self.confidence
    }

    /// Score clamped to [`MIN_SCORE`, `MAX_SCORE`]
    pub fn score(&self) -> f64 {
        self.raw().clamp(MIN_SCORE, MAX_SCORE)
    }
}

impl From<&Candidate> for ScoreFactors {
    fn from(candidate: &Candidate) -> Self {
        Self::new(
            candidate.urgency,
            candidate.impact,
            candidate.effort,
            candidate.confidence,
        )
    }
}

/// `clamp(urgency + impact - effort + confidence, 0, 1)`
///
/// This is a plain sum, not a weighted average, so catalogs whose factors add up past 1 clip
/// at the upper bound.
pub fn calculate_score(urgency: f64, impact: f64, effort: f64, confidence: f64) -> f64 {
    ScoreFactors::new(urgency, impact, effort, confidence).score()
}

/// Score a single candidate and attach its action template
pub fn score_candidate(catalog: &Catalog, candidate: &Candidate) -> Recommendation {
    Recommendation {
        id: candidate.id.clone(),
        title: candidate.title.clone(),
        score: ScoreFactors::from(candidate).score(),
        rationale: candidate.rationale.clone(),
        actions: catalog.actions_for(&candidate.id).to_vec(),
    }
}

/// Rank every catalog candidate, highest score first
///
/// The request is accepted but does not influence the result. Sorting is stable, so equal
/// scores keep catalog order.
pub fn rank(catalog: &Catalog, request: &RankRequest) -> Vec<Recommendation> {
    debug!(
        warehouse_id = ?request.warehouse_id,
        context_keys = request.context.len(),
        "Ranking {} candidates",
        catalog.candidates.len()
    );

    let mut ranked: Vec<Recommendation> = catalog
        .candidates
        .iter()
        .map(|candidate| score_candidate(catalog, candidate))
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ranked
}
