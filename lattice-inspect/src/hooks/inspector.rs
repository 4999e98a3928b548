//! Inspector
//!
//! The composite hooks. An [`Inspector`] bundles the configuration, the
//! reporter and the clock, and combines the primitive hooks into one
//! diagnostic record per committed render.
//!
//! # Hook order
//!
//! Both composite hooks claim their retained-state slots in a fixed order:
//! render counter, change tracker, timestamp tracker, then their effect
//! slots. A component that calls them unconditionally keeps its slots
//! aligned across renders.

use std::sync::Arc;

use tracing::warn;

use super::primitives::{
    use_dependency_changes, use_prop_changes, use_render_count, use_render_timing,
};
use crate::config::InspectConfig;
use crate::deps;
use crate::diff::{ChangeSet, Deps, Props};
use crate::error::{InspectError, Result};
use crate::host::{Cleanup, RenderScope};
use crate::metrics::{Clock, SystemClock};
use crate::report::{DebugInfo, DebugRecord, EffectDebugInfo, Reporter, TracingReporter};

/// Entry point for the composite inspection hooks.
///
/// Cloning is cheap; clones share the reporter and the clock.
#[derive(Clone)]
pub struct Inspector {
    config: InspectConfig,
    reporter: Arc<dyn Reporter>,
    clock: Arc<dyn Clock>,
}

impl Inspector {
    /// An inspector reporting through `tracing` with the wall clock.
    pub fn new(config: InspectConfig) -> Self {
        Self {
            config,
            reporter: Arc::new(TracingReporter),
            clock: Arc::new(SystemClock),
        }
    }

    /// An inspector configured from the `LATTICE_INSPECT` environment variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(InspectConfig::from_env()?))
    }

    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn config(&self) -> &InspectConfig {
        &self.config
    }

    /// Track a component's props and report every committed render.
    ///
    /// Reports `Rendered` on every commit, `Mounted` after the first
    /// commit's `Rendered`, and `Unmounted` at teardown. When
    /// `component_name` changes while mounted, the old name is reported
    /// unmounted before the render record and the new one mounted after it.
    ///
    /// `log_only_on_change` overrides the configured setting for this call.
    pub fn use_debug_info(
        &self,
        cx: &mut RenderScope<'_>,
        component_name: &str,
        props: &Props,
        log_only_on_change: Option<bool>,
    ) -> Result<DebugInfo> {
        let render_count = use_render_count(cx)?;
        let changes = use_prop_changes(cx, props)?;
        let timing = use_render_timing(cx, &self.clock)?;
        let info = DebugInfo::new(render_count, changes, timing);

        let instance = cx.instance().raw();

        let log_only_on_change = log_only_on_change.unwrap_or(self.config.log_only_on_change);
        if !log_only_on_change || info.has_changes() {
            let this = self.clone();
            let record = DebugRecord::Rendered {
                component: component_name.to_string(),
                instance,
                info: info.clone(),
            };
            cx.on_commit(move || this.emit(&record));
        }

        let this = self.clone();
        let component = component_name.to_string();
        let mounted_props = props.clone();
        cx.use_effect(Some(deps![component_name]), move || {
            this.emit(&DebugRecord::Mounted {
                component: component.clone(),
                instance,
                props: mounted_props,
            });
            Some(Box::new(move || {
                this.emit(&DebugRecord::Unmounted {
                    component,
                    instance,
                })
            }) as Cleanup)
        })?;

        Ok(info)
    }

    /// Run `effect` under `deps` and report which dependencies changed.
    ///
    /// The record for a commit is emitted before the effect runs. With
    /// `deps` of `None` the effect runs after every commit and the change
    /// set is always empty.
    ///
    /// A dependency list that changes length under the strict policy logs a
    /// warning and is reported with an empty change set and the error in
    /// [`EffectDebugInfo::dependency_error`]. The render itself goes on, and
    /// the effect runs since its dependencies changed.
    pub fn use_effect_debug_info<F>(
        &self,
        cx: &mut RenderScope<'_>,
        effect_name: &str,
        effect: F,
        deps: Option<Deps>,
    ) -> Result<EffectDebugInfo>
    where
        F: FnOnce() -> Option<Cleanup> + Send + 'static,
    {
        let render_count = use_render_count(cx)?;

        let tracked = deps.clone().unwrap_or_default();
        let (changes, dependency_error) =
            match use_dependency_changes(cx, &tracked, self.config.arity_policy()) {
                Ok(changes) => (changes, None),
                Err(err @ InspectError::DependencyArity { .. }) => {
                    warn!(
                        target: "lattice_inspect",
                        effect = %effect_name,
                        instance = cx.instance().raw(),
                        error = %err,
                        "[effect-debug-info] {}: dependency list changed length",
                        effect_name
                    );
                    (ChangeSet::new(), Some(err.to_string()))
                }
                Err(err) => return Err(err),
            };

        let timing = use_render_timing(cx, &self.clock)?;
        let mut info = EffectDebugInfo::new(render_count, changes, timing);
        info.dependency_error = dependency_error;

        if !self.config.log_only_on_change || info.is_notable() {
            let this = self.clone();
            let record = DebugRecord::Effect {
                effect: effect_name.to_string(),
                instance: cx.instance().raw(),
                info: info.clone(),
            };
            cx.on_commit(move || this.emit(&record));
        }

        cx.use_effect(deps, effect)?;
        Ok(info)
    }

    fn emit(&self, record: &DebugRecord) {
        if self.config.enabled {
            self.reporter.report(record);
        }
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(InspectConfig::default())
    }
}

impl std::fmt::Debug for Inspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inspector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
