//! Component Host
//!
//! The inspection hooks observe a component's render lifecycle but do not
//! own it. This module provides the lifecycle they need, reduced to three
//! primitives:
//!
//! - **Retained state**: values that survive from one render to the next
//!   without causing a render of their own.
//!
//! - **Post-commit callbacks**: code that runs after a render has committed
//!   and before the next render starts. Effects are built on these.
//!
//! - **Unmount callbacks**: code that runs once when the instance is torn
//!   down.
//!
//! # Render vs. Commit
//!
//! A render pass computes; a commit publishes. Hooks compute their facts
//! during the render pass and only mutate retained state from post-commit
//! callbacks. A render body that runs twice before one commit (see
//! [`ComponentHost::render_strict`]) therefore produces the same facts both
//! times and advances counters once.

mod instance;
mod effect;
mod scope;
mod component;

pub use instance::{InstanceId, Lifecycle};
pub use effect::Cleanup;
pub use scope::RenderScope;
pub use component::ComponentHost;
