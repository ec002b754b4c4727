//! # Validation Module
//!
//! Input validation for the write paths.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (form checks, immediate feedback)               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - checked before any remote store traffic        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote store constraints (NOT NULL, CHECK)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock sufficiency is deliberately NOT validated here: the billing engine
//! performs no pre-check and no floor clamp. Ensuring sufficient stock before
//! creating a bill is the caller's responsibility.

use crate::error::{ValidationError, ValidationResult};
use crate::types::{BillItem, NewMedicine};

// =============================================================================
// Medicine Validators
// =============================================================================

/// Validates a medicine about to be created.
///
/// ## Rules
/// - `name` must not be empty (after trimming)
/// - `price` must not be negative
/// - `stock` must not be negative
pub fn validate_new_medicine(medicine: &NewMedicine) -> ValidationResult<()> {
    if medicine.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if medicine.price < 0.0 {
        return Err(ValidationError::NegativeAmount {
            field: "price".to_string(),
            value: medicine.price,
        });
    }

    if medicine.stock < 0 {
        return Err(ValidationError::NegativeCount {
            field: "stock".to_string(),
            value: medicine.stock,
        });
    }

    Ok(())
}

// =============================================================================
// Bill Validators
// =============================================================================

/// Validates bill-creation input.
///
/// ## Rules
/// - at least one line item (a zero-item bill is degenerate)
/// - every quantity is strictly positive
/// - `discount` must not be negative
pub fn validate_bill_input(items: &[BillItem], discount: f64) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    for item in items {
        if item.quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
                value: item.quantity,
            });
        }
    }

    if discount < 0.0 {
        return Err(ValidationError::NegativeAmount {
            field: "discount".to_string(),
            value: discount,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
