//! Hug Core - chainable wrappers for dynamic objects
//!
//! This crate turns a dynamic object into a chainable wrapper: every
//! filter-accepted attribute becomes a proxy member, so a sequence of
//! attribute reads/writes and method calls runs as one expression instead
//! of repeating the object's name. It includes:
//!
//! - A dynamic value model with reference semantics (objects, arrays,
//!   native functions, primitives)
//! - Attribute discovery over own names plus one prototype level
//! - Allow/deny regex filtering with an overridable predicate
//! - Per-attribute proxy members, kind-fixed at wrap time
//! - Chain bookkeeping: cached call results and parent links for
//!   unwrapping
//!
//! # Example
//!
//! ```
//! use hug_core::{wrap, ObjectData, Value};
//!
//! let mut obj = ObjectData::new();
//! obj.set("a", 1);
//! obj.set("b", ObjectData::from_entries([("c", Value::Int(2))]));
//! obj.set(
//!     "d",
//!     Value::function(|_, args, _| match args.first() {
//!         Some(Value::Int(x)) => Value::Int(x * 2),
//!         _ => Value::Null,
//!     }),
//! );
//! let obj = obj.into_ref();
//!
//! let result = wrap(obj.clone())
//!     .invoke("a", &[5.into()]).unwrap()   // set a = 5
//!     .invoke("b", &[]).unwrap()           // descend into b
//!     .invoke("c", &[9.into()]).unwrap()   // set b.c = 9
//!     .shrug().unwrap()                    // back to the outer wrapper
//!     .invoke("d", &[3.into()]).unwrap()   // call d(3), caching 6
//!     .result().unwrap();
//! assert_eq!(result, Value::Int(6));
//! assert_eq!(obj.borrow().get("a"), Some(Value::Int(5)));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod discover;
pub mod error;
pub mod filter;
pub mod hug;
pub mod object;
pub mod proxy;
pub mod value;

// Re-export commonly used types
pub use error::{HugError, Result};
pub use filter::{AttrFilter, DecideFn, FilterHandle};
pub use hug::{wrap, wrap_with, Ancestors, Chained, Hug, WrapTarget};
pub use object::{ObjectData, ObjectRef};
pub use proxy::ProxyKind;
pub use value::{ArrayRef, NativeFn, Value, ValueKind};
