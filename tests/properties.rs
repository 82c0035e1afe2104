//! Property tests for Stackwright.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never panics" and "stable ranking".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/ranking.rs"]
mod ranking;

#[path = "properties/save_location.rs"]
mod save_location;
