//! Integration Tests for the Inspection Hooks
//!
//! These tests drive components through a `ComponentHost` and check the
//! records reported by the composite hooks, interleaved with the effects
//! they guard.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;

use lattice_inspect::diff::dep_key;
use lattice_inspect::host::Cleanup;
use lattice_inspect::metrics::ManualClock;
use lattice_inspect::report::EffectDebugInfo;
use lattice_inspect::{
    deps, props, ComponentHost, DebugRecord, Deps, InspectConfig, InspectError, Inspector,
    Reporter, Value,
};

const START: u64 = 949_410_000_000;
const RENDER_TIME: u64 = 40;

/// One entry in the shared event log.
#[derive(Debug, Clone)]
enum Event {
    Record(DebugRecord),
    Ran(&'static str),
}

/// Writes records to the same log the test effects write to, so ordering
/// between the two can be asserted.
#[derive(Clone, Default)]
struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.0.lock())
    }

    fn effect(&self, label: &'static str) -> impl FnOnce() -> Option<Cleanup> + Send + 'static {
        let log = self.clone();
        move || {
            log.0.lock().push(Event::Ran(label));
            None
        }
    }
}

impl Reporter for EventLog {
    fn report(&self, record: &DebugRecord) {
        self.0.lock().push(Event::Record(record.clone()));
    }
}

struct Fixture {
    log: EventLog,
    clock: ManualClock,
    inspector: Inspector,
}

impl Fixture {
    fn new(config: InspectConfig) -> Self {
        let log = EventLog::default();
        let clock = ManualClock::new(START);
        let inspector = Inspector::new(config)
            .with_reporter(log.clone())
            .with_clock(clock.clone());
        Self {
            log,
            clock,
            inspector,
        }
    }

    /// Simulate a user interaction between two renders.
    fn interact(&self) {
        self.clock.advance(RENDER_TIME * 2);
    }

    /// Render a component whose only hook is `use_effect_debug_info`.
    fn render_effect(
        &self,
        host: &mut ComponentHost,
        name: &'static str,
        ran: &'static str,
        deps: Deps,
    ) -> lattice_inspect::Result<EffectDebugInfo> {
        let effect = self.log.effect(ran);
        host.render(|cx| self.inspector.use_effect_debug_info(cx, name, effect, Some(deps)))
    }

    /// The next two log entries: the effect record, then the effect run.
    fn expect_record_then_run(&self, ran: &'static str) -> EffectDebugInfo {
        let events = self.log.take();
        assert_eq!(events.len(), 2, "unexpected events: {events:?}");
        let info = match &events[0] {
            Event::Record(DebugRecord::Effect { info, .. }) => info.clone(),
            other => panic!("expected an effect record, got {other:?}"),
        };
        assert!(matches!(events[1], Event::Ran(label) if label == ran));
        info
    }
}

fn changes_json(info: &EffectDebugInfo) -> serde_json::Value {
    serde_json::to_value(&info.changed_deps).unwrap()
}

// ----------------------------------------------------------------------------
// Effect variant
// ----------------------------------------------------------------------------

/// Each render reports the dependencies that changed since the last commit, and
/// the time between the two.
#[test]
fn effect_logs_changes_against_previous_render() {
    const NAME: &str = "TestComponent-effect-debug";
    const RAN: &str = "TestComponent useEffect ran";

    let fx = Fixture::new(InspectConfig::default());
    let mut host = ComponentHost::new("TestComponent");

    fx.render_effect(&mut host, NAME, RAN, deps!["0", 0]).unwrap();
    let info = fx.expect_record_then_run(RAN);
    assert!(info.changed_deps.is_empty());
    assert_eq!(info.last_render_timestamp, START);
    assert_eq!(info.time_since_last_render, 0);

    for step in 1..=4u64 {
        fx.interact();
        let string = step.to_string();
        fx.render_effect(&mut host, NAME, RAN, deps![string.as_str(), step])
            .unwrap();

        let info = fx.expect_record_then_run(RAN);
        let previous = step - 1;
        assert_eq!(
            changes_json(&info),
            json!({
                "dep-#0": {"previous": previous.to_string(), "new": step.to_string()},
                "dep-#1": {"previous": previous, "new": step},
            })
        );
        assert_eq!(info.last_render_timestamp, START + RENDER_TIME * 2 * (step - 1));
        assert_eq!(info.time_since_last_render, RENDER_TIME * 2);
        assert_eq!(info.render_count, step + 1);
    }
}

/// Primitive dependencies compare by value, and unchanged `null` and
/// `undefined` are not reported.
#[test]
fn effect_handles_primitives() {
    const NAME: &str = "TestPrimitivesComponent-effect-debug";
    const RAN: &str = "TestPrimitivesComponent useEffect ran";

    let config = InspectConfig {
        log_only_on_change: true,
        ..InspectConfig::default()
    };
    let fx = Fixture::new(config);
    let mut host = ComponentHost::new("TestPrimitivesComponent");

    let initial_symbol = Value::symbol("0");
    let updated_symbol = Value::symbol("1");

    let mut state = vec![
        Value::from("0"),
        Value::from(0),
        Value::bigint(0),
        Value::from(false),
        initial_symbol.clone(),
        Value::Null,
        Value::Undefined,
    ];

    // The initial render reports nothing, so `log_only_on_change` skips the
    // record and only the effect runs. An initial `undefined` is not a change.
    let info = fx
        .render_effect(&mut host, NAME, RAN, Deps::from(state.clone()))
        .unwrap();
    assert!(info.changed_deps.is_empty());
    assert!(matches!(fx.log.take().as_slice(), [Event::Ran(RAN)]));

    let updates: Vec<(usize, Value)> = vec![
        (0, Value::from("1")),
        (1, Value::from(1)),
        (2, Value::bigint(1)),
        (3, Value::from(true)),
        (4, updated_symbol.clone()),
    ];

    for (index, next) in updates {
        fx.interact();
        let previous = std::mem::replace(&mut state[index], next.clone());
        fx.render_effect(&mut host, NAME, RAN, Deps::from(state.clone()))
            .unwrap();

        let info = fx.expect_record_then_run(RAN);
        assert_eq!(info.changed_deps.len(), 1);
        let change = info.changed_deps.get(&dep_key(index)).unwrap();
        assert_eq!(change.previous, previous);
        assert_eq!(change.current, next);
        assert_eq!(info.time_since_last_render, RENDER_TIME * 2);
    }

    // Setting null to null and undefined to undefined changes nothing.
    for index in [5, 6] {
        let same = state[index].clone();
        state[index] = same;
        fx.render_effect(&mut host, NAME, RAN, Deps::from(state.clone()))
            .unwrap();
        assert!(fx.log.take().is_empty());
    }
}

/// A fresh closure is a change even when it does the same thing.
#[test]
fn effect_compares_functions_by_identity() {
    const NAME: &str = "TestFunctionComponent-effect-debug";
    const RAN: &str = "TestFunctionComponent useEffect ran";

    let fx = Fixture::new(InspectConfig::default());
    let mut host = ComponentHost::new("TestFunctionComponent");

    let initial = Value::function("initialFunction", || {});
    let rerendered = Value::function("rerenderedFunction", || {});
    let deps_changed = Value::function("depsChangedFunction", || {});
    let initial_memoized = Value::function("initialMemoizedFunction", || {});
    let deps_changed_memoized = Value::function("depsChangedMemoizedFunction", || {});

    fx.render_effect(&mut host, NAME, RAN, deps![initial.clone(), initial_memoized.clone()])
        .unwrap();
    assert!(fx.expect_record_then_run(RAN).changed_deps.is_empty());

    // A fresh closure each render; the memoized one is kept.
    fx.interact();
    fx.render_effect(&mut host, NAME, RAN, deps![rerendered.clone(), initial_memoized.clone()])
        .unwrap();
    let info = fx.expect_record_then_run(RAN);
    assert_eq!(info.changed_deps.keys().collect::<Vec<_>>(), vec!["dep-#0"]);
    assert_eq!(info.changed_deps.get("dep-#0").unwrap().previous, initial);

    fx.interact();
    fx.render_effect(
        &mut host,
        NAME,
        RAN,
        deps![deps_changed.clone(), deps_changed_memoized.clone()],
    )
    .unwrap();
    let info = fx.expect_record_then_run(RAN);
    assert_eq!(info.changed_deps.len(), 2);
    assert_eq!(info.changed_deps.get("dep-#0").unwrap().previous, rerendered);
    assert_eq!(
        info.changed_deps.get("dep-#1").unwrap().current,
        deps_changed_memoized
    );
    assert_eq!(info.last_render_timestamp, START + RENDER_TIME * 2);
}

/// Objects compare by identity, not by contents.
#[test]
fn effect_reports_structurally_equal_objects() {
    const NAME: &str = "TestObjectComponent-effect-debug";
    const RAN: &str = "TestObjectComponent useEffect ran";

    let fx = Fixture::new(InspectConfig::default());
    let mut host = ComponentHost::new("TestObjectComponent");

    let initial = Value::object(json!({"test": "test"}));
    let updated = Value::object(json!({"test": "test"}));

    fx.render_effect(&mut host, NAME, RAN, deps![initial.clone(), 0]).unwrap();
    fx.expect_record_then_run(RAN);

    fx.interact();
    fx.render_effect(&mut host, NAME, RAN, deps![updated.clone(), 0]).unwrap();
    let info = fx.expect_record_then_run(RAN);
    assert_eq!(
        changes_json(&info),
        json!({"dep-#0": {"previous": {"test": "test"}, "new": {"test": "test"}}})
    );

    // The object is unchanged now; only the other dependency is reported.
    fx.interact();
    fx.render_effect(&mut host, NAME, RAN, deps![updated, 1]).unwrap();
    let info = fx.expect_record_then_run(RAN);
    assert_eq!(info.changed_deps.keys().collect::<Vec<_>>(), vec!["dep-#1"]);
}

/// Date values are distinct objects, so each new date is reported.
#[test]
fn effect_reports_dates_by_identity() {
    const NAME: &str = "TestDateComponent-effect-debug";
    const RAN: &str = "TestDateComponent useEffect ran";

    let fx = Fixture::new(InspectConfig::default());
    let mut host = ComponentHost::new("TestDateComponent");

    let initial = Value::object(json!("2001-02-02T12:00:00"));
    let updated = Value::object(json!("2001-02-02T13:00:00"));

    fx.render_effect(&mut host, NAME, RAN, deps![initial.clone(), 0]).unwrap();
    fx.expect_record_then_run(RAN);

    fx.interact();
    fx.render_effect(&mut host, NAME, RAN, deps![updated.clone(), 0]).unwrap();
    let info = fx.expect_record_then_run(RAN);
    let change = info.changed_deps.get("dep-#0").unwrap();
    assert_eq!(change.previous, initial);
    assert_eq!(change.current, updated);
}

/// Unchanged dependencies still produce a record but do not re-run the effect.
#[test]
fn effect_skips_run_when_dependencies_unchanged() {
    const RAN: &str = "ran";

    let fx = Fixture::new(InspectConfig::default());
    let mut host = ComponentHost::new("Stable");

    fx.render_effect(&mut host, "stable", RAN, deps![1]).unwrap();
    fx.expect_record_then_run(RAN);

    fx.render_effect(&mut host, "stable", RAN, deps![1]).unwrap();
    let events = fx.log.take();
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], Event::Record(record) if !record.highlight()));
}

/// `NaN` is never `===` itself but is the same value for re-run purposes.
#[test]
fn nan_dependency_is_reported_but_does_not_rerun_effect() {
    const RAN: &str = "ran";

    let fx = Fixture::new(InspectConfig::default());
    let mut host = ComponentHost::new("NotANumber");

    fx.render_effect(&mut host, "nan", RAN, deps![f64::NAN]).unwrap();
    fx.expect_record_then_run(RAN);

    let info = fx.render_effect(&mut host, "nan", RAN, deps![f64::NAN]).unwrap();
    assert!(info.changed_deps.contains_key("dep-#0"));

    let events = fx.log.take();
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], Event::Record(_)));
}

/// A dependency list that changes length is reported on the record and the
/// tracker restarts from the new list.
#[test]
fn strict_arity_is_reported_without_failing_the_render() {
    const RAN: &str = "ran";

    let fx = Fixture::new(InspectConfig::default());
    let mut host = ComponentHost::new("Growing");

    fx.render_effect(&mut host, "grow", RAN, deps![1]).unwrap();
    fx.log.take();

    let info = fx.render_effect(&mut host, "grow", RAN, deps![1, 2]).unwrap();
    assert!(info.changed_deps.is_empty());
    let message = info.dependency_error.clone().unwrap();
    assert!(message.contains("expected 1, found 2"));
    let reported = fx.expect_record_then_run(RAN);
    assert_eq!(reported, info);

    let info = fx.render_effect(&mut host, "grow", RAN, deps![1, 3]).unwrap();
    assert!(info.dependency_error.is_none());
    assert_eq!(info.changed_deps.keys().collect::<Vec<_>>(), vec!["dep-#1"]);
}

/// Effects after the inspection hook still run when the dependency list changes
/// length.
#[test]
fn arity_error_keeps_the_rest_of_the_component_running() {
    let fx = Fixture::new(InspectConfig::default());
    let mut host = ComponentHost::new("Growing");

    for deps in [deps![1], deps![1, 2]] {
        let other = fx.log.effect("other effect");
        host.render(|cx| {
            fx.inspector
                .use_effect_debug_info(cx, "grow", || None, Some(deps))?;
            cx.use_effect(None, other)?;
            Ok(())
        })
        .unwrap();
    }

    let runs = fx
        .log
        .take()
        .into_iter()
        .filter(|event| matches!(event, Event::Ran("other effect")))
        .count();
    assert_eq!(runs, 2);
}

/// Under the lenient policy, a position missing on either side reads as
/// `undefined`.
#[test]
fn lenient_arity_pads_with_undefined() {
    const RAN: &str = "ran";

    let config = InspectConfig {
        strict_dependency_arity: false,
        ..InspectConfig::default()
    };
    let fx = Fixture::new(config);
    let mut host = ComponentHost::new("Growing");

    fx.render_effect(&mut host, "grow", RAN, deps![1]).unwrap();
    fx.log.take();

    let info = fx.render_effect(&mut host, "grow", RAN, deps![1, 2]).unwrap();
    let change = info.changed_deps.get("dep-#1").unwrap();
    assert!(change.previous.is_undefined());
    assert_eq!(change.current, Value::from(2));
}

// ----------------------------------------------------------------------------
// Props variant
// ----------------------------------------------------------------------------

/// The props variant reports changed and removed props.
#[test]
fn debug_info_tracks_props_across_renders() {
    let fx = Fixture::new(InspectConfig::default());
    let mut host = ComponentHost::new("Profile");

    let info = host
        .render(|cx| {
            fx.inspector
                .use_debug_info(cx, "Profile", &props! { "name" => "Ada", "age" => 36 }, None)
        })
        .unwrap();
    assert_eq!(info.render_count, 1);
    assert!(info.changed_props.is_empty());

    let events = fx.log.take();
    assert!(matches!(
        &events[..],
        [Event::Record(DebugRecord::Rendered { .. }), Event::Record(DebugRecord::Mounted { .. })]
    ));

    fx.interact();
    let info = host
        .render(|cx| {
            fx.inspector
                .use_debug_info(cx, "Profile", &props! { "name" => "Ada", "age" => 37 }, None)
        })
        .unwrap();
    assert_eq!(info.render_count, 2);
    assert_eq!(info.time_since_last_render, RENDER_TIME * 2);
    assert_eq!(
        serde_json::to_value(&info.changed_props).unwrap(),
        json!({"age": {"previous": 36, "new": 37}})
    );

    // A removed prop is reported as changed to undefined.
    let info = host
        .render(|cx| fx.inspector.use_debug_info(cx, "Profile", &props! { "age" => 37 }, None))
        .unwrap();
    let removed = info.changed_props.get("name").unwrap();
    assert_eq!(removed.previous, Value::from("Ada"));
    assert!(removed.current.is_undefined());
}

/// A first render that fails leaves nothing behind: the next render is the
/// mount.
#[test]
fn failed_first_render_leaves_no_baseline() {
    let fx = Fixture::new(InspectConfig::default());
    let mut host = ComponentHost::new("Flaky");

    let err = host
        .render(|cx| {
            fx.inspector
                .use_debug_info(cx, "Flaky", &props! { "x" => 1 }, None)?;
            Err::<(), _>(InspectError::HookOrder { index: 3 })
        })
        .unwrap_err();
    assert!(matches!(err, InspectError::HookOrder { index: 3 }));
    assert!(fx.log.take().is_empty());

    fx.interact();
    let info = host
        .render(|cx| fx.inspector.use_debug_info(cx, "Flaky", &props! { "x" => 2 }, None))
        .unwrap();
    assert_eq!(info.render_count, 1);
    assert!(info.changed_props.is_empty());
    assert_eq!(info.time_since_last_render, 0);
    assert_eq!(info.last_render_timestamp, START + RENDER_TIME * 2);

    let events = fx.log.take();
    assert!(matches!(
        &events[..],
        [Event::Record(DebugRecord::Rendered { .. }), Event::Record(DebugRecord::Mounted { props, .. })]
            if props.get("x") == Some(&Value::from(2))
    ));
}

/// Props holding the same object are unchanged; a fresh equal object is a
/// change.
#[test]
fn debug_info_props_object_identity() {
    let fx = Fixture::new(InspectConfig::default());
    let mut host = ComponentHost::new("Holder");

    let shared = Value::object(json!({"test": "test"}));
    for _ in 0..2 {
        let info = host
            .render(|cx| {
                fx.inspector
                    .use_debug_info(cx, "Holder", &props! { "test" => shared.clone() }, None)
            })
            .unwrap();
        assert!(info.changed_props.is_empty());
    }

    let info = host
        .render(|cx| {
            let fresh = Value::object(json!({"test": "test"}));
            fx.inspector
                .use_debug_info(cx, "Holder", &props! { "test" => fresh }, None)
        })
        .unwrap();
    assert!(info.changed_props.contains_key("test"));
}

/// Double-invoked renders count and report once per commit.
#[test]
fn strict_render_counts_once_per_commit() {
    let fx = Fixture::new(InspectConfig::default());
    let mut host = ComponentHost::new("Strict");

    let mut counts = Vec::new();
    for _ in 0..3 {
        let info = host
            .render_strict(|cx| fx.inspector.use_debug_info(cx, "Strict", &props! {}, None))
            .unwrap();
        counts.push(info.render_count);
    }
    assert_eq!(counts, vec![1, 2, 3]);
    assert_eq!(host.render_passes(), 6);

    let rendered = fx
        .log
        .take()
        .into_iter()
        .filter(|event| matches!(event, Event::Record(DebugRecord::Rendered { .. })))
        .count();
    assert_eq!(rendered, 3);
}

/// Unmounting reports the marker once, and later renders are refused.
#[test]
fn unmount_reports_and_rejects_renders() {
    let fx = Fixture::new(InspectConfig::default());
    let mut host = ComponentHost::new("Leaving");

    host.render(|cx| fx.inspector.use_debug_info(cx, "Leaving", &props! {}, None))
        .unwrap();
    fx.log.take();

    host.unmount();
    let events = fx.log.take();
    assert!(matches!(
        &events[..],
        [Event::Record(DebugRecord::Unmounted { component, .. })] if component == "Leaving"
    ));

    let err = host
        .render(|cx| fx.inspector.use_debug_info(cx, "Leaving", &props! {}, None))
        .unwrap_err();
    assert!(matches!(err, InspectError::Unmounted { .. }));
}

/// With `log_only_on_change`, only the mount marker and renders that changed
/// something are reported.
#[test]
fn config_from_json_drives_filtering() {
    let config = InspectConfig::from_json(r#"{"enabled": true, "log_only_on_change": true}"#).unwrap();
    let fx = Fixture::new(config);
    let mut host = ComponentHost::new("Filtered");

    for value in [1, 1, 2] {
        host.render(|cx| {
            fx.inspector
                .use_debug_info(cx, "Filtered", &props! { "value" => value }, None)
        })
        .unwrap();
    }

    let records: Vec<DebugRecord> = fx
        .log
        .take()
        .into_iter()
        .filter_map(|event| match event {
            Event::Record(record) => Some(record),
            Event::Ran(_) => None,
        })
        .collect();
    assert_eq!(records.len(), 2);
    assert!(matches!(records[0], DebugRecord::Mounted { .. }));
    assert!(records[1].highlight());
}
