//! Domain Layer
//!
//! This is the core of Stackwright - deployment planning logic without I/O.
//!
//! ## Structure
//!
//! - `entities/` - Core domain entities (ProjectDefinition, Recipe, Recommendation)
//! - `value_objects/` - Immutable value types (capabilities, setting values, status)
//! - `policies/` - Business rules (applicability predicates, setting validators)
//! - `services/` - Domain services (recommender, settings resolver, save location)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system, network or processes
//! 2. **Pure Functions** - Rule evaluation and ranking are stateless
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
