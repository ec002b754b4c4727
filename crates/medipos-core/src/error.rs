//! # Error Types
//!
//! Domain-specific error types for medipos-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  medipos-core errors (this file)                                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  medipos-client errors (separate crate)                                │
//! │  └── ClientError      - Remote store / decode failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → ClientError → caller / notification sink      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements, and are raised
/// before any remote store traffic happens.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A monetary amount is negative.
    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: String, value: f64 },

    /// A count is negative.
    #[error("{field} must not be negative (got {value})")]
    NegativeCount { field: String, value: i64 },

    /// A quantity must be strictly positive.
    #[error("{field} must be positive (got {value})")]
    MustBePositive { field: String, value: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
