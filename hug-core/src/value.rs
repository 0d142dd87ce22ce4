//! Dynamic value model
//!
//! Values follow JavaScript-style reference semantics: primitives copy,
//! aggregates (objects, arrays) and functions clone their reference, so
//! mutation through any handle is visible through all of them. Equality
//! mirrors the same model - primitives compare by value (integers and
//! floats share one number line), aggregates compare by identity.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::hug::Hug;
use crate::object::{ObjectData, ObjectRef};

/// Shared, interior-mutable array of values
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// A native function value: receiver, positional arguments, ancestor
/// snapshot.
///
/// The ancestor slice is populated only when the function is invoked as a
/// primitive-attribute transformer; ordinary proxied method calls pass an
/// empty slice.
pub type NativeFn = Rc<dyn Fn(&Value, &[Value], &[Hug]) -> Value>;

/// A dynamic value
#[derive(Clone)]
pub enum Value {
    /// The null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    Str(String),
    /// Array value (reference semantics)
    Array(ArrayRef),
    /// Object value (reference semantics)
    Object(ObjectRef),
    /// Function value (reference semantics)
    Function(NativeFn),
}

/// Value kind tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Present but null
    Null,
    /// Boolean value
    Bool,
    /// Integer value
    Int,
    /// Floating point value
    Float,
    /// String value
    Str,
    /// Array value
    Array,
    /// Object value
    Object,
    /// Function value
    Function,
}

impl Value {
    /// Kind tag for this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::Function(_) => ValueKind::Function,
        }
    }

    /// JavaScript-style truthiness: null, false, zero, NaN and the empty
    /// string are falsy; everything else (including empty objects and
    /// arrays) is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) | Value::Function(_) => true,
        }
    }

    /// Whether this value classifies as an object for descent purposes.
    ///
    /// Null is deliberately included, mirroring JavaScript's
    /// `typeof null === "object"`: a null attribute descends into a
    /// wrapped null rather than reading as a primitive. Arrays classify
    /// as objects under the same check.
    pub fn is_object_like(&self) -> bool {
        matches!(self, Value::Null | Value::Array(_) | Value::Object(_))
    }

    /// Borrow the object reference, if this is an object value
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Build a function value from a closure
    pub fn function<F>(f: F) -> Value
    where
        F: Fn(&Value, &[Value], &[Hug]) -> Value + 'static,
    {
        Value::Function(Rc::new(f))
    }

    /// Build an array value from items
    pub fn array(items: Vec<Value>) -> Value {
        Value::Array(Rc::new(RefCell::new(items)))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            // Integers and floats share one number line
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                *a as f64 == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            // Aggregates and functions compare by reference identity
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Array(a) => write!(f, "Array({})", a.borrow().len()),
            Value::Object(o) => write!(f, "Object({})", o.borrow().len()),
            Value::Function(_) => write!(f, "Function"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

impl From<ObjectData> for Value {
    fn from(data: ObjectData) -> Self {
        Value::Object(data.into_ref())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}
