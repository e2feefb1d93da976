// crates/preflight-env/src/lib.rs
// ============================================================================
// Module: Preflight Env Library
// Description: Public API surface for environment-tier validation.
// Purpose: Expose the schema table, coercion helpers, and validator.
// Dependencies: crate::{coerce, schema, validator}
// ============================================================================

//! ## Overview
//! The environment tier parses a raw string-keyed map into a typed
//! configuration using a declarative schema table, then layers security
//! pattern re-checks, placeholder-smell scanning, and cross-flag dependency
//! checks on top. The input map is always an explicit argument; ambient
//! process state is never read.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod coerce;
pub mod schema;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use coerce::CoercedValue;
pub use coerce::coerce;
pub use schema::FieldKind;
pub use schema::FieldSpec;
pub use schema::SCHEMA;
pub use schema::suggestion_for;
pub use validator::AppEnv;
pub use validator::EnvConfig;
pub use validator::EnvValidationResult;
pub use validator::EnvValidator;
pub use validator::LogLevel;
