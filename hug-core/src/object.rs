//! String-keyed attribute maps with a prototype link

use ahash::AHashMap;
use std::cell::RefCell;
use std::rc::Rc;

use crate::value::Value;

/// Shared, interior-mutable object reference
pub type ObjectRef = Rc<RefCell<ObjectData>>;

/// An object: a string-keyed attribute map plus an optional prototype link.
///
/// Attribute order is unspecified. Reads through [`lookup`](Self::lookup)
/// walk the prototype chain; writes always create or update an own
/// attribute, shadowing the prototype.
#[derive(Default, Debug)]
pub struct ObjectData {
    entries: AHashMap<String, Value>,
    proto: Option<ObjectRef>,
}

impl ObjectData {
    /// Create an empty object with no prototype
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty object with the given prototype
    pub fn with_proto(proto: ObjectRef) -> Self {
        Self {
            entries: AHashMap::new(),
            proto: Some(proto),
        }
    }

    /// Build an object from key/value pairs
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
            proto: None,
        }
    }

    /// Wrap this object in a shared reference
    pub fn into_ref(self) -> ObjectRef {
        Rc::new(RefCell::new(self))
    }

    /// Read an own attribute
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    /// Read an attribute, walking the prototype chain
    pub fn lookup(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned().or_else(|| {
            self.proto
                .as_ref()
                .and_then(|proto| proto.borrow().lookup(key))
        })
    }

    /// Create or update an own attribute
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Remove an own attribute
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Whether an own attribute exists
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of own attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no own attributes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Own attribute names, in unspecified order
    pub fn own_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Iterate own attributes
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// The prototype link, if any
    pub fn proto(&self) -> Option<ObjectRef> {
        self.proto.clone()
    }

    /// Replace the prototype link
    pub fn set_proto(&mut self, proto: Option<ObjectRef>) {
        self.proto = proto;
    }

    /// Shallow-copy every own attribute of `other` onto this object.
    ///
    /// Only own attributes are copied; `other`'s prototype and this
    /// object's prototype are left untouched.
    pub fn extend(&mut self, other: &ObjectData) {
        for (key, value) in other.entries.iter() {
            self.entries.insert(key.clone(), value.clone());
        }
    }
}
