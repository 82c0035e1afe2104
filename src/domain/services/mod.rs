//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! I/O reaches them only through ports (type-hint handlers) or as plain
//! facts passed in by the caller.

mod recommender;
pub mod save_location;
mod settings_resolver;

pub use recommender::generate_recommendations;
pub use settings_resolver::{
    check_value, dependency_order, is_visible, substitute_stack_name, SettingInputs,
    SettingsResolver, STACK_NAME_PLACEHOLDER,
};
