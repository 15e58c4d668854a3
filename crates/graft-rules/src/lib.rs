//! The rewrite rules shipped with the engine.
//!
//! Each module holds one pattern and the rewrites it offers. [`registry`]
//! assembles all of them; hosts that want a subset build their own
//! [`Registry`] from the public types.

pub mod braces;
pub mod conditional;
pub mod count;
pub mod field_name;
pub mod lock_field;
pub mod oftype;
pub mod strings;

use std::sync::Arc;

use graft_engine::Registry;

pub fn registry() -> Registry {
    let mut registry = Registry::new();
    registry.register_pattern(Arc::new(count::CountToProperty));
    registry.register_builder(Arc::new(count::UseProperty));
    registry.register_pattern(Arc::new(count::CountToAny));
    registry.register_builder(Arc::new(count::UseAny));
    registry.register_pattern(Arc::new(conditional::SimplifyConditional));
    registry.register_builder(Arc::new(conditional::Simplify));
    registry.register_pattern(Arc::new(oftype::WhereCastToOfType));
    registry.register_builder(Arc::new(oftype::UseOfType));
    registry.register_pattern(Arc::new(lock_field::LockOnThis));
    registry.register_builder(Arc::new(lock_field::IntroduceLockField));
    registry.register_pattern(Arc::new(field_name::FieldCamelCase));
    registry.register_builder(Arc::new(field_name::RenameField));
    registry.register_pattern(Arc::new(braces::FormatEmptyBraces));
    registry.register_builder(Arc::new(braces::FormatBraces));
    registry.register_pattern(Arc::new(strings::MergeStringLiterals));
    registry.register_builder(Arc::new(strings::Merge));
    registry.register_builder(Arc::new(strings::MergeMultiline));
    tracing::debug!(?registry, "registered rules");
    registry
}
