//! The hug wrapper: factory, proxy invocation, and chain control
//!
//! A [`Hug`] wraps a target value. Every filter-accepted attribute of the
//! target becomes a proxy member, invoked by name through
//! [`invoke`](Hug::invoke); the member's behavior depends on the
//! attribute's kind at wrap time (function / object / primitive). Fixed
//! chain operations (`get`, `result`, `that`, `attr`, `shrug`, ...) exist
//! on every wrapper regardless of the target's shape.
//!
//! A chain step either continues (the step yields a wrapper) or ends (the
//! step yields a raw value); [`Chained`] carries that distinction and
//! re-exposes the chain operations so whole chains compose with `?`.

use ahash::AHashMap;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

use crate::discover::eligible_names;
use crate::error::{HugError, Result};
use crate::filter::{AttrFilter, FilterHandle};
use crate::object::{ObjectData, ObjectRef};
use crate::proxy::{member_table, ProxyKind};
use crate::value::Value;

/// Ancestor snapshot, outermost wrapper first
pub type Ancestors = SmallVec<[Hug; 4]>;

/// Wrap a target using the process-wide attribute filter.
///
/// The filter is read once, here; descents from the returned wrapper reuse
/// the same snapshot. Wrapping an existing [`Hug`] returns it unchanged.
pub fn wrap(target: impl Into<WrapTarget>) -> Hug {
    Hug::build(target.into(), FilterHandle::global().snapshot(), None)
}

/// Wrap a target using an explicit attribute filter
pub fn wrap_with(target: impl Into<WrapTarget>, filter: &AttrFilter) -> Hug {
    Hug::build(target.into(), filter.clone(), None)
}

/// Input accepted by the wrap factory
pub enum WrapTarget {
    /// A plain value to wrap
    Value(Value),
    /// An already-wrapped value, returned unchanged by the factory
    Wrapped(Hug),
}

impl From<Value> for WrapTarget {
    fn from(value: Value) -> Self {
        WrapTarget::Value(value)
    }
}

impl From<ObjectRef> for WrapTarget {
    fn from(obj: ObjectRef) -> Self {
        WrapTarget::Value(Value::Object(obj))
    }
}

impl From<ObjectData> for WrapTarget {
    fn from(data: ObjectData) -> Self {
        WrapTarget::Value(data.into())
    }
}

impl From<Hug> for WrapTarget {
    fn from(hug: Hug) -> Self {
        WrapTarget::Wrapped(hug)
    }
}

impl From<&Hug> for WrapTarget {
    fn from(hug: &Hug) -> Self {
        WrapTarget::Wrapped(hug.clone())
    }
}

struct HugInner {
    /// The wrapped value, immutable for this wrapper's lifetime
    target: Value,
    /// Filter snapshot taken at construction, reused for descents
    filter: AttrFilter,
    /// Pop-able link to the enclosing wrapper
    parent: RefCell<Option<Hug>>,
    /// Return value of the most recent proxied method call
    last_result: RefCell<Value>,
    /// name -> kind table, fixed at wrap time
    members: AHashMap<String, ProxyKind>,
}

/// A chainable wrapper around a target value.
///
/// Cheap to clone; clones share identity ([`ptr_eq`](Hug::ptr_eq)).
#[derive(Clone)]
pub struct Hug {
    inner: Rc<HugInner>,
}

impl Hug {
    fn build(target: WrapTarget, filter: AttrFilter, parent: Option<Hug>) -> Hug {
        match target {
            // don't re-wrap wrapped values
            WrapTarget::Wrapped(hug) => hug,
            WrapTarget::Value(value) => {
                let names = eligible_names(&value, &filter);
                let members = member_table(&value, &names);
                trace!(members = members.len(), "wrapped target");
                Hug {
                    inner: Rc::new(HugInner {
                        target: value,
                        filter,
                        parent: RefCell::new(parent),
                        last_result: RefCell::new(Value::Null),
                        members,
                    }),
                }
            }
        }
    }

    /// Wrap `target` with this wrapper pushed as parent
    fn descend(&self, target: Value) -> Hug {
        Hug::build(
            WrapTarget::Value(target),
            self.inner.filter.clone(),
            Some(self.clone()),
        )
    }

    /// Read `target[key]` through the prototype chain; absent reads as null
    fn lookup_attr(&self, key: &str) -> Value {
        self.inner
            .target
            .as_object()
            .and_then(|obj| obj.borrow().lookup(key))
            .unwrap_or(Value::Null)
    }

    /// Write `target[key]`; a no-op on non-object targets
    fn write_attr(&self, key: &str, value: Value) {
        if let Some(obj) = self.inner.target.as_object() {
            obj.borrow_mut().set(key, value);
        }
    }

    /// Whether two handles are the same wrapper instance
    pub fn ptr_eq(&self, other: &Hug) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// The wrapped target, ending the chain
    pub fn get(&self) -> Value {
        self.inner.target.clone()
    }

    /// Synonym for [`get`](Self::get)
    pub fn it(&self) -> Value {
        self.get()
    }

    /// Borrow the wrapped target
    pub fn target(&self) -> &Value {
        &self.inner.target
    }

    /// The last proxied-call result, ending the chain. Not cleared by
    /// reading.
    pub fn result(&self) -> Value {
        self.inner.last_result.borrow().clone()
    }

    /// Descend into the last result, or return it raw.
    ///
    /// Object-like results (objects, arrays, and null - the `typeof null`
    /// quirk) come back wrapped with this wrapper as parent;
    /// anything else ends the chain. A fresh wrapper's last result is
    /// null, so a `that()` before any call descends into a wrapped null.
    pub fn that(&self) -> Chained {
        let result = self.inner.last_result.borrow().clone();
        if result.is_object_like() {
            Chained::Hug(self.descend(result))
        } else {
            Chained::Value(result)
        }
    }

    /// Inspect the last result without breaking the chain.
    ///
    /// The callback receives the last result, the target, and an ancestor
    /// snapshot; its return value is ignored.
    pub fn that_with<F>(&self, callback: F) -> Hug
    where
        F: FnOnce(&Value, &Value, &[Hug]),
    {
        let result = self.inner.last_result.borrow().clone();
        let ancestors = self.ancestors();
        callback(&result, &self.inner.target, &ancestors);
        self.clone()
    }

    /// Read `target[key]` directly, ending the chain. A missing key reads
    /// as null.
    pub fn attr(&self, key: &str) -> Value {
        self.lookup_attr(key)
    }

    /// Set `target[key]` and continue the chain
    pub fn attr_set(&self, key: &str, value: impl Into<Value>) -> Hug {
        self.write_attr(key, value.into());
        self.clone()
    }

    /// Shallow-copy every entry onto the target and continue the chain.
    ///
    /// `entries` must not be a live borrow of this wrapper's own target.
    pub fn extend(&self, entries: &ObjectData) -> Hug {
        if let Some(obj) = self.inner.target.as_object() {
            obj.borrow_mut().extend(entries);
        }
        self.clone()
    }

    /// Pop back to the parent wrapper; at the root, return the target.
    ///
    /// One-shot: the parent link is consumed, so a second `shrug` without
    /// a descend in between ends the chain with the target.
    pub fn shrug(&self) -> Chained {
        match self.inner.parent.borrow_mut().take() {
            Some(parent) => Chained::Hug(parent),
            None => Chained::Value(self.inner.target.clone()),
        }
    }

    /// Synonym for [`shrug`](Self::shrug)
    pub fn end(&self) -> Chained {
        self.shrug()
    }

    /// Current wrap-nesting depth (number of reachable parent links)
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.inner.parent.borrow().clone();
        while let Some(hug) = current {
            depth += 1;
            current = hug.inner.parent.borrow().clone();
        }
        depth
    }

    /// Snapshot of the ancestor chain, outermost wrapper first
    pub fn ancestors(&self) -> Ancestors {
        let mut chain = Ancestors::new();
        let mut current = self.inner.parent.borrow().clone();
        while let Some(hug) = current {
            let next = hug.inner.parent.borrow().clone();
            chain.push(hug);
            current = next;
        }
        chain.reverse();
        chain
    }

    /// Whether a proxy member was synthesized for `name`
    pub fn has_member(&self, name: &str) -> bool {
        self.inner.members.contains_key(name)
    }

    /// The kind recorded for a proxy member at wrap time
    pub fn member_kind(&self, name: &str) -> Option<ProxyKind> {
        self.inner.members.get(name).copied()
    }

    /// Invoke the proxy member `name`.
    ///
    /// Dispatch follows the kind recorded at wrap time:
    ///
    /// - **Function**: call `target[name]` with the target as receiver and
    ///   `args` unchanged, cache the return value for [`result`] /
    ///   [`that`], continue the chain.
    /// - **Object**: with no (or a falsy) argument, descend into a wrapper
    ///   around `target[name]`; with an object argument, shallow-copy its
    ///   entries onto `target[name]` and continue without descending.
    /// - **Primitive**: with no (or a falsy) argument, return `target[name]`
    ///   and end the chain; with a function argument, treat it as a
    ///   transformer - call it with `(old value, target)` plus the ancestor
    ///   snapshot and store its return value; with any other argument,
    ///   store the argument. A function argument is never stored directly:
    ///   to store one, pass it wrapped so the proxy sees a non-function.
    ///
    /// [`result`]: Self::result
    /// [`that`]: Self::that
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Chained> {
        let kind = self
            .inner
            .members
            .get(name)
            .copied()
            .ok_or_else(|| HugError::NoSuchMember {
                name: name.to_string(),
            })?;

        match kind {
            ProxyKind::Function => {
                let callee = match self.lookup_attr(name) {
                    Value::Function(f) => f,
                    _ => {
                        return Err(HugError::NotCallable {
                            name: name.to_string(),
                        })
                    }
                };
                let result = callee(&self.inner.target, args, &[]);
                *self.inner.last_result.borrow_mut() = result;
                Ok(Chained::Hug(self.clone()))
            }
            ProxyKind::Object => {
                match args.first().filter(|arg| arg.is_truthy()) {
                    None => Ok(Chained::Hug(self.descend(self.lookup_attr(name)))),
                    Some(Value::Object(entries)) => {
                        if let Value::Object(dst) = self.lookup_attr(name) {
                            if !Rc::ptr_eq(&dst, entries) {
                                dst.borrow_mut().extend(&entries.borrow());
                            }
                        }
                        Ok(Chained::Hug(self.clone()))
                    }
                    // a truthy non-object argument has no entries to copy
                    Some(_) => Ok(Chained::Hug(self.clone())),
                }
            }
            ProxyKind::Primitive => {
                match args.first().filter(|arg| arg.is_truthy()) {
                    None => Ok(Chained::Value(self.lookup_attr(name))),
                    Some(Value::Function(transform)) => {
                        let old = self.lookup_attr(name);
                        let ancestors = self.ancestors();
                        let new = transform(
                            &self.inner.target,
                            &[old, self.inner.target.clone()],
                            &ancestors,
                        );
                        self.write_attr(name, new);
                        Ok(Chained::Hug(self.clone()))
                    }
                    Some(value) => {
                        self.write_attr(name, value.clone());
                        Ok(Chained::Hug(self.clone()))
                    }
                }
            }
        }
    }
}

impl fmt::Debug for Hug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hug")
            .field("target", &self.inner.target)
            .field("depth", &self.depth())
            .field("members", &self.inner.members.len())
            .finish()
    }
}

/// Result of a chain step: the chain continues with a wrapper, or ended
/// with a raw value.
#[derive(Debug, Clone)]
pub enum Chained {
    /// The chain continues
    Hug(Hug),
    /// The chain ended
    Value(Value),
}

impl Chained {
    fn as_hug(&self) -> Result<&Hug> {
        match self {
            Chained::Hug(hug) => Ok(hug),
            Chained::Value(_) => Err(HugError::ChainEnded),
        }
    }

    /// Whether the chain has ended
    pub fn is_ended(&self) -> bool {
        matches!(self, Chained::Value(_))
    }

    /// The continuing wrapper, if the chain has not ended
    pub fn hug(&self) -> Option<&Hug> {
        match self {
            Chained::Hug(hug) => Some(hug),
            Chained::Value(_) => None,
        }
    }

    /// Unwrap the continuing wrapper
    pub fn into_hug(self) -> Result<Hug> {
        match self {
            Chained::Hug(hug) => Ok(hug),
            Chained::Value(_) => Err(HugError::ChainEnded),
        }
    }

    /// Unwrap the terminal value, if the chain has ended
    pub fn into_value(self) -> Option<Value> {
        match self {
            Chained::Hug(_) => None,
            Chained::Value(value) => Some(value),
        }
    }

    /// Invoke a proxy member on the continuing wrapper
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Chained> {
        self.as_hug()?.invoke(name, args)
    }

    /// See [`Hug::shrug`]
    pub fn shrug(&self) -> Result<Chained> {
        Ok(self.as_hug()?.shrug())
    }

    /// Synonym for [`shrug`](Self::shrug)
    pub fn end(&self) -> Result<Chained> {
        self.shrug()
    }

    /// See [`Hug::that`]
    pub fn that(&self) -> Result<Chained> {
        Ok(self.as_hug()?.that())
    }

    /// See [`Hug::get`]
    pub fn get(&self) -> Result<Value> {
        Ok(self.as_hug()?.get())
    }

    /// See [`Hug::result`]
    pub fn result(&self) -> Result<Value> {
        Ok(self.as_hug()?.result())
    }

    /// See [`Hug::attr`]
    pub fn attr(&self, key: &str) -> Result<Value> {
        Ok(self.as_hug()?.attr(key))
    }

    /// See [`Hug::attr_set`]
    pub fn attr_set(&self, key: &str, value: impl Into<Value>) -> Result<Chained> {
        Ok(Chained::Hug(self.as_hug()?.attr_set(key, value)))
    }
}
