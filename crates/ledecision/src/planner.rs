//! JIT transfer planning
//!
//! Picks a source warehouse, prices every catalog carrier, and builds a transfer
//! recommendation around the cheapest one. Time and randomness come in from the caller so
//! plans are reproducible under test.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::PlanError;
use crate::models::{Action, ActionType, CarrierOption, PlanRequest, PlanResponse, Recommendation};

/// Smallest capacity a carrier can report
pub const MIN_CAPACITY: u32 = 50;

/// Largest capacity a carrier can report
pub const MAX_CAPACITY: u32 = 200;

/// Score given to every JIT recommendation
pub const JIT_SCORE: f64 = 0.9;

/// Prefix of JIT recommendation ids
pub const JIT_ID_PREFIX: &str = "jit_";

/// Priority used for the shipment action
pub const SHIPMENT_PRIORITY: &str = "urgent";

/// Choose the warehouse stock is shipped from
pub fn select_source<R: Rng + ?Sized>(
    catalog: &Catalog,
    dest: &str,
    rng: &mut R,
) -> Result<String, PlanError> {
    catalog
        .source_policy
        .candidates_for(dest)
        .choose(rng)
        .cloned()
        .ok_or_else(|| PlanError::NoSourceWarehouse(dest.to_string()))
}

/// Price every catalog carrier at `now`, cheapest first
///
/// Ties keep catalog order. Fails if a carrier's arrival time overflows the timestamp range.
pub fn enumerate_carriers<R: Rng + ?Sized>(
    catalog: &Catalog,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Vec<CarrierOption>, PlanError> {
    let mut carriers = Vec::with_capacity(catalog.carriers.len());
    for entry in &catalog.carriers {
        let eta = now
            .checked_add_signed(Duration::hours(i64::from(entry.eta_hours)))
            .ok_or_else(|| PlanError::EtaOutOfRange(entry.name.clone()))?;

        carriers.push(CarrierOption {
            name: entry.name.clone(),
            cost: entry.cost,
            eta,
            reliability: entry.reliability,
            capacity: rng.gen_range(MIN_CAPACITY..=MAX_CAPACITY),
        });
    }

    carriers.sort_by(|a, b| {
        a.cost
            .partial_cmp(&b.cost)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(carriers)
}

/// Fresh `jit_NNNN` id
pub fn generate_plan_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}{}", JIT_ID_PREFIX, rng.gen_range(1000..=9999))
}

/// Plan a JIT transfer for `request`
pub fn plan_jit<R: Rng + ?Sized>(
    catalog: &Catalog,
    request: &PlanRequest,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<PlanResponse, PlanError> {
    let source = select_source(catalog, &request.dest_warehouse_id, rng)?;
    let carriers = enumerate_carriers(catalog, now, rng)?;
    let chosen = carriers.first().ok_or(PlanError::NoCarriers)?;

    debug!(
        sku = %request.sku_id,
        qty = request.qty,
        source = %source,
        dest = %request.dest_warehouse_id,
        carrier = %chosen.name,
        "Planned JIT transfer"
    );

    let actions = vec![
        Action::new(ActionType::CreateTransfer)
            .with_param("from", source.as_str())
            .with_param("to", request.dest_warehouse_id.as_str())
            .with_param("sku", request.sku_id.as_str())
            .with_param("qty", request.qty),
        Action::new(ActionType::CreateShipment)
            .with_param("carrier", chosen.name.as_str())
            .with_param("priority", SHIPMENT_PRIORITY)
            .with_param("eta", format_eta(&chosen.eta)),
    ];

    let recommendation = Recommendation {
        id: generate_plan_id(rng),
        title: format!("JIT Transfer: {}", request.sku_id),
        score: JIT_SCORE,
        rationale: format!(
            "Transfer {} units of {} from {} to {}. Urgent transfer to meet demand.",
            request.qty, request.sku_id, source, request.dest_warehouse_id
        ),
        actions,
    };

    let explanation = build_explanation(request, &source, chosen);

    Ok(PlanResponse {
        recommendation,
        carriers,
        explanation,
    })
}

/// Human-readable plan summary
pub fn build_explanation(request: &PlanRequest, source: &str, chosen: &CarrierOption) -> String {
    let lines = [
        format!("JIT Transfer Plan for {}:", request.sku_id),
        String::new(),
        format!("1. Source: {} warehouse (sufficient stock available)", source),
        format!("2. Destination: {} warehouse", request.dest_warehouse_id),
        format!("3. Quantity: {} units", request.qty),
        format!(
            "4. Recommended carrier: {} (${}, ETA: {})",
            chosen.name,
            chosen.cost,
            format_eta(&chosen.eta)
        ),
        "5. Actions: Create transfer order and expedited shipment".to_string(),
        String::new(),
        "Alternative carriers available with different cost/speed trade-offs.".to_string(),
    ];
    lines.join("\n")
}

/// RFC 3339 with whatever sub-second precision the timestamp carries
fn format_eta(eta: &DateTime<Utc>) -> String {
    eta.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
