//! Project analysis

mod analyzer;

pub use analyzer::{parse_project_file, ProjectAnalyzer, PROJECT_EXTENSIONS};
