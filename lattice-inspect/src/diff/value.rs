//! Tracked Values
//!
//! A [`Value`] is anything a component can pass as a prop or list as an
//! effect dependency. Change detection is shallow:
//!
//! - Primitives (`undefined`, `null`, booleans, numbers, big integers,
//!   strings) compare by value.
//! - Symbols, objects, functions and foreign handles compare by identity.
//!   Cloning a `Value` keeps its identity; constructing a new one creates a
//!   new identity, even when the contents are identical.
//!
//! Two equality relations are provided. [`Value::strict_eq`] is the one used
//! for change sets: `NaN` never equals itself and `+0` equals `-0`.
//! [`Value::same_value`] is used to decide whether an effect re-runs: `NaN`
//! equals itself and `+0` differs from `-0`.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::ser::{Serialize, Serializer};

/// Counter for generating unique symbol IDs.
static SYMBOL_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_symbol_id() -> u64 {
    SYMBOL_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A unique token. Two symbols are equal only if one is a clone of the other.
#[derive(Clone)]
pub struct Symbol {
    id: u64,
    description: Option<Arc<str>>,
}

impl Symbol {
    /// Create a new symbol, distinct from every other symbol.
    pub fn new(description: Option<&str>) -> Self {
        Self {
            id: next_symbol_id(),
            description: description.map(Arc::from),
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

/// A shared object whose identity is its allocation.
///
/// The contents are kept as JSON so they can be shown in diagnostics; they
/// play no part in comparison.
#[derive(Clone)]
pub struct ObjectRef(Arc<serde_json::Value>);

impl ObjectRef {
    pub fn new(contents: serde_json::Value) -> Self {
        Self(Arc::new(contents))
    }

    pub fn contents(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A callable value, compared by identity.
#[derive(Clone)]
pub struct FunctionRef {
    name: Arc<str>,
    call: Arc<dyn Fn() + Send + Sync>,
}

impl FunctionRef {
    pub fn new<F>(name: &str, call: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            call: Arc::new(call),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the function.
    pub fn call(&self) {
        (self.call)();
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }
}

/// An opaque handle to an object owned by another runtime.
///
/// `identity` is whatever the owner uses to tell objects apart (for Python
/// objects, their address). The handle keeps the object alive through
/// `inner`, so an identity cannot be reused while the handle exists.
#[derive(Clone)]
pub struct ForeignRef {
    identity: usize,
    label: Arc<str>,
    inner: Arc<dyn Any + Send + Sync>,
}

impl ForeignRef {
    pub fn new<T>(identity: usize, label: &str, inner: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            identity,
            label: Arc::from(label),
            inner: Arc::new(inner),
        }
    }

    pub fn identity(&self) -> usize {
        self.identity
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Borrow the wrapped object as `T`, if that is its type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

/// A value tracked by the change-set trackers.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    Str(Arc<str>),
    Symbol(Symbol),
    Object(ObjectRef),
    Function(FunctionRef),
    Foreign(ForeignRef),
}

impl Value {
    /// Create a new object value with its own identity.
    pub fn object(contents: serde_json::Value) -> Self {
        Value::Object(ObjectRef::new(contents))
    }

    /// Create a new function value with its own identity.
    pub fn function<F>(name: &str, call: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Value::Function(FunctionRef::new(name, call))
    }

    /// Create a new, unique symbol value.
    pub fn symbol(description: &str) -> Self {
        Value::Symbol(Symbol::new(Some(description)))
    }

    pub fn bigint(value: i128) -> Self {
        Value::BigInt(value)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Strict equality: the negation of JavaScript's `!==`.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a.id == b.id,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Foreign(a), Value::Foreign(b)) => a.identity == b.identity,
            _ => false,
        }
    }

    /// Identity equality, as `Object.is`.
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                (a.is_nan() && b.is_nan())
                    || (a == b && a.is_sign_negative() == b.is_sign_negative())
            }
            _ => self.strict_eq(other),
        }
    }

    /// Short name of the value's kind, for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::Foreign(_) => "foreign",
        }
    }
}

/// `==` on values is strict equality, so `NaN != NaN` just as with `f64`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_eq(other)
    }
}

fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => format_number(*n, f),
            Value::BigInt(n) => write!(f, "{}n", n),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Symbol(s) => write!(f, "{:?}", s),
            Value::Object(o) => write!(f, "{}", o.contents()),
            Value::Function(func) => write!(f, "[Function: {}]", func.name()),
            Value::Foreign(h) => f.write_str(h.label()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Largest integer an `f64` holds exactly (`Number.MAX_SAFE_INTEGER`).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Integral numbers serialize as JSON integers, the way `JSON.stringify`
/// writes them. Non-finite numbers serialize as their display string.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            Value::Object(o) => o.contents().serialize(serializer),
            Value::Str(s) => serializer.serialize_str(s),
            other => serializer.collect_str(other),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(Arc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(Arc::from(value))
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Value::Symbol(value)
    }
}

/// `None` maps to `null`, mirroring an explicitly empty prop.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
