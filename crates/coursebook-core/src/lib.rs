//! # Coursebook Core
//!
//! Core types, errors, and utilities for the Coursebook API.
//!
//! - [`errors`]: Application error types with HTTP response conversion
//! - [`password`]: Password hashing and verification
//! - [`validation`]: Declarative field rules and the evaluator that runs them
//!
//! # Example
//!
//! ```ignore
//! use coursebook_core::errors::AppError;
//! use coursebook_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found("Course");
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod password;
pub mod validation;

// Re-export commonly used types at crate root
pub use errors::{AppError, FaultDetail, StoreError};
pub use password::{
    MAX_PASSWORD_BYTES, hash_password, hash_password_async, verify_password, verify_password_async,
};
pub use validation::{Check, FieldRule, RuleSet, ValidationIssue};
