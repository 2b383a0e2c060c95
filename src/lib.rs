// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # tfplan-validator
//!
//! Checks that an infrastructure plan only performs an approved set of
//! actions on each managed resource.
//!
//! ## Overview
//!
//! A change-management pipeline records which actions a change is expected
//! to perform as a **filter**, then checks every freshly generated plan
//! against it before the plan may apply:
//!
//! 1. **Create**: one or more plans are merged into a filter
//! 2. **Check**: a new plan is compared with one or more filters
//!
//! Replace operations may be reported as create, update or either replace
//! ordering depending on provider and environment, so checks accept
//! compatible actions unless run in strict mode.
//!
//! ## Modules
//!
//! - [`plan`]: Action vocabulary, plan documents and plan loading
//! - [`filter`]: Filter documents, plan merging and filter storage
//! - [`validator`]: Checking a plan against filters
//! - [`config`]: Settings file and environment overrides
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "allowed_actions": {
//!     "local_file.foo": ["create", "delete-create"]
//!   }
//! }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod plan;
pub mod validator;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{ConfigParser, Settings};
pub use error::{Result, ValidatorError};
pub use filter::{
    Address, CURRENT_FORMAT_VERSION, FilterBuilder, FilterStore, LocalFilterStore, PlanFilter,
    load_filters,
};
pub use plan::{Action, Plan, PlanReader, ResourceChange, ResourceMode, are_compatible};
pub use validator::{PlanValidator, ValidationReport, Violation};
