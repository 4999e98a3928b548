//! Reporting
//!
//! Hooks turn their facts into [`DebugRecord`]s and hand them to a
//! [`Reporter`]. Formatting and destination are the reporter's concern; the
//! hooks only decide *whether* a record is emitted (see `InspectConfig`).

mod record;
mod reporter;

pub use record::{DebugInfo, DebugRecord, EffectDebugInfo};
pub use reporter::{MemoryReporter, Reporter, TracingReporter};
