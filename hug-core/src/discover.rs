//! Attribute discovery
//!
//! Enumerates the attribute names of a wrap target that are eligible for
//! proxy members: the target's own names plus the own names of its
//! immediate prototype. Deeper prototype chains are deliberately not
//! traversed; this is a documented limitation of the design, not an
//! oversight.

use tracing::trace;

use crate::filter::AttrFilter;
use crate::value::Value;

/// Eligible attribute names for a wrap target, in unspecified order.
///
/// Non-object targets (primitives, arrays, functions, null) have no
/// discoverable attributes and yield an empty set: the wrap degenerates to
/// the fixed chain operations only.
pub fn eligible_names(target: &Value, filter: &AttrFilter) -> Vec<String> {
    let Some(obj) = target.as_object() else {
        return Vec::new();
    };

    let data = obj.borrow();
    let mut names = data.own_names();
    if let Some(proto) = data.proto() {
        // one level up only
        for name in proto.borrow().own_names() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    let candidates = names.len();
    names.retain(|name| filter.decide(name));
    trace!(
        candidates = candidates,
        eligible = names.len(),
        "discovered attributes"
    );

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectData;

    #[test]
    fn test_own_names_filtered() {
        let mut obj = ObjectData::new();
        obj.set("visible", 1);
        obj.set("constructor", 2);
        obj.set("__hidden", 3);

        let names = eligible_names(&obj.into(), &AttrFilter::default());
        assert_eq!(names, vec!["visible".to_string()]);
    }

    #[test]
    fn test_proto_names_one_level_only() {
        let grandproto = ObjectData::from_entries([("deep", Value::Int(3))]).into_ref();
        let mut proto = ObjectData::with_proto(grandproto);
        proto.set("inherited", 2);
        let mut obj = ObjectData::with_proto(proto.into_ref());
        obj.set("own", 1);

        let mut names = eligible_names(&obj.into(), &AttrFilter::default());
        names.sort();
        // the grandprototype's names are not discovered
        assert_eq!(names, vec!["inherited".to_string(), "own".to_string()]);
    }

    #[test]
    fn test_shadowed_proto_name_deduplicated() {
        let proto = ObjectData::from_entries([("x", Value::Int(1))]).into_ref();
        let mut obj = ObjectData::with_proto(proto);
        obj.set("x", 2);

        let names = eligible_names(&obj.into(), &AttrFilter::default());
        assert_eq!(names, vec!["x".to_string()]);
    }

    #[test]
    fn test_non_object_targets_yield_nothing() {
        let filter = AttrFilter::default();
        assert!(eligible_names(&Value::Null, &filter).is_empty());
        assert!(eligible_names(&Value::Int(7), &filter).is_empty());
        assert!(eligible_names(&Value::from("s"), &filter).is_empty());
        assert!(eligible_names(&Value::array(vec![Value::Int(1)]), &filter).is_empty());
    }
}
