//! Lattice Inspect
//!
//! Render-diagnostics hooks for Lattice components. They answer "why did
//! this component render?" by reporting, for each committed render:
//!
//! - which props or effect dependencies changed, with their previous and new
//!   values,
//! - how many times the component has rendered,
//! - how long it has been since its previous render.
//!
//! The crate can be used as a native Rust library and, for the change-set
//! trackers, as a Python extension module via PyO3 (the `python`
//! feature).
//!
//! # Architecture
//!
//! - `diff`: tracked values, change sets and the trackers that compute them
//! - `metrics`: render counter and timestamp tracker
//! - `host`: a minimal component host with the render/commit lifecycle
//! - `hooks`: primitive hooks and the composite [`Inspector`] hooks
//! - `report`: diagnostic records and the reporters that emit them
//! - `config`: [`InspectConfig`]
//!
//! # Example
//!
//! ```rust
//! use lattice_inspect::{props, ComponentHost, Inspector, InspectConfig, MemoryReporter};
//!
//! let reporter = MemoryReporter::new();
//! let inspector = Inspector::new(InspectConfig::default()).with_reporter(reporter.clone());
//! let mut host = ComponentHost::new("Greeting");
//!
//! for name in ["Ada", "Grace"] {
//!     let props = props! { "name" => name };
//!     host.render(|cx| inspector.use_debug_info(cx, "Greeting", &props, None))
//!         .unwrap();
//! }
//!
//! // Rendered, Mounted, then Rendered with `name` changed.
//! assert_eq!(reporter.len(), 3);
//! ```

pub mod config;
pub mod diff;
pub mod error;
pub mod hooks;
pub mod host;
pub mod metrics;
pub mod report;

#[cfg(feature = "python")]
mod python;

pub use config::InspectConfig;
pub use diff::{ArityPolicy, Change, ChangeSet, Deps, Props, Value};
pub use error::{InspectError, Result};
pub use hooks::Inspector;
pub use host::{ComponentHost, RenderScope};
pub use report::{DebugRecord, MemoryReporter, Reporter, TracingReporter};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition.
#[cfg(feature = "python")]
#[pymodule]
fn _inspect(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyPropsTracker>()?;
    m.add_class::<python::PyDepsTracker>()?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
