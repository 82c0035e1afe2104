//! External process adapters

mod git;
mod process;

pub use git::GitProbe;
pub use process::ProcessTool;
