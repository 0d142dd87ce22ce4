//! Proxy member kinds
//!
//! A proxy member's behavior branches on the attribute's runtime kind.
//! That decision is an explicit tag, recorded once per name in the
//! wrapper's member table at wrap time and never re-evaluated.

use ahash::AHashMap;

use crate::value::{Value, ValueKind};

/// Behavior variant of a proxy member, fixed at wrap time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyKind {
    /// Calls the underlying function and caches its result
    Function,
    /// Descends into the attribute, or merges a mapping onto it
    Object,
    /// Reads, writes, or transforms the attribute
    Primitive,
}

impl ProxyKind {
    /// Classify an attribute value.
    ///
    /// Null classifies as `Object`, mirroring JavaScript's
    /// `typeof null === "object"`: a null attribute descends into a
    /// wrapped null. Arrays classify as objects under the same check.
    pub fn classify(value: &Value) -> Self {
        match value.kind() {
            ValueKind::Function => ProxyKind::Function,
            ValueKind::Null | ValueKind::Array | ValueKind::Object => ProxyKind::Object,
            ValueKind::Bool | ValueKind::Int | ValueKind::Float | ValueKind::Str => {
                ProxyKind::Primitive
            }
        }
    }
}

/// Build the name -> kind member table for a wrap target.
///
/// Kinds reflect each attribute's value at this instant; later kind
/// changes of the underlying attribute are not re-synthesized.
pub(crate) fn member_table(target: &Value, names: &[String]) -> AHashMap<String, ProxyKind> {
    let mut table = AHashMap::with_capacity(names.len());
    for name in names {
        let kind = match target
            .as_object()
            .and_then(|obj| obj.borrow().lookup(name))
        {
            Some(value) => ProxyKind::classify(&value),
            // a name discovered without a value reads as absent
            None => ProxyKind::Primitive,
        };
        table.insert(name.clone(), kind);
    }
    table
}
