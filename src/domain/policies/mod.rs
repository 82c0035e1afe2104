//! Domain Policies
//!
//! Business rules and policies that govern behavior.
//! These are pure functions that operate on domain entities.

mod applicability;
mod validators;

pub use applicability::{Predicate, RuleContext};
pub use validators::Validator;
