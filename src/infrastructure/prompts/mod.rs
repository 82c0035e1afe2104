//! Prompt adapters for confirmation and resource selection

mod interactive;
mod unattended;

pub use interactive::{DialoguerConfirmer, DialoguerPicker};
pub use unattended::UnattendedPicker;
