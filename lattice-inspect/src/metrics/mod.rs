//! Render Metrics
//!
//! Auxiliary facts reported alongside change sets: how many times a
//! component has committed and how long it has been since the last commit.

mod counter;
mod timing;

pub use counter::RenderCounter;
pub use timing::{Clock, ManualClock, RenderTiming, SystemClock, TimestampTracker};
