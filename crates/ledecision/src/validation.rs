//! Strict plan request checks
//!
//! The service accepts any well-formed plan request by default. These checks back the
//! opt-in strict mode, which rejects requests the catalog cannot make sense of.

use crate::catalog::Catalog;
use crate::error::ValidationError;
use crate::models::PlanRequest;

/// Check `request` against the catalog's SKU and warehouse lists
pub fn validate_plan_request(
    catalog: &Catalog,
    request: &PlanRequest,
) -> Result<(), ValidationError> {
    if request.sku_id.trim().is_empty() {
        return Err(ValidationError::EmptySku);
    }
    // Exact match; the planner echoes the id verbatim
    if !catalog.has_sku(&request.sku_id) {
        return Err(ValidationError::UnknownSku(request.sku_id.clone()));
    }

    if request.qty <= 0 {
        return Err(ValidationError::NonPositiveQuantity(request.qty));
    }

    if !catalog.has_warehouse(&request.dest_warehouse_id) {
        return Err(ValidationError::UnknownWarehouse(
            request.dest_warehouse_id.clone(),
        ));
    }

    Ok(())
}
