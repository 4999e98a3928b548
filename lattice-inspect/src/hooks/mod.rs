//! Inspection Hooks
//!
//! Hooks are called from a component's render body with its
//! [`RenderScope`](crate::host::RenderScope). Each one retains its state in
//! the scope, reads it during render, and updates it only once the render
//! commits.
//!
//! The primitives track one fact each. [`Inspector`] combines them into the
//! two composite hooks that report through a [`Reporter`](crate::report::Reporter):
//!
//! - [`Inspector::use_debug_info`] for a component's props,
//! - [`Inspector::use_effect_debug_info`] for an effect's dependency list.

mod inspector;
mod primitives;

pub use inspector::Inspector;
pub use primitives::{
    use_dependency_changes, use_prop_changes, use_render_count, use_render_timing,
};
