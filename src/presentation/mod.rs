//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON) and exit codes
//!
//! ## Structure
//!
//! - `cli` - Argument definitions
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Result and error rendering
//!
//! ## Usage
//!
//! ```ignore
//! use stackwright::presentation::factory;
//!
//! let use_case = factory::create_list_use_case()?;
//! let records = use_case.execute()?;
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{AwsArgs, Cli, Commands};
pub use output::{exit_code, print_error, OutputFormat, Renderer};
