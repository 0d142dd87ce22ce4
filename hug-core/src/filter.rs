//! Attribute-name filtering
//!
//! Every wrap construction decides, per attribute name, whether a proxy
//! member is synthesized. The decision comes from an [`AttrFilter`]: an
//! allow list and a deny list of regular expressions, or an overriding
//! predicate. The allow list is evaluated first and can rescue a name the
//! deny list would exclude.
//!
//! Filters are plain values passed to [`wrap_with`](crate::wrap_with); the
//! process-wide default used by [`wrap`](crate::wrap) lives behind
//! [`FilterHandle::global`].

use regex::Regex;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use tracing::debug;

use crate::error::Result;

/// Overriding decision predicate
pub type DecideFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Default deny patterns: numeric-indexed names, dunder names, and
/// `constructor`.
const DEFAULT_DENY: [&str; 3] = [r"^\d+", r"^__\w+", r"^constructor"];

/// Decides which attribute names get proxy members
#[derive(Clone)]
pub struct AttrFilter {
    allow: Vec<Regex>,
    deny: Vec<Regex>,
    decide: Option<DecideFn>,
}

impl Default for AttrFilter {
    fn default() -> Self {
        Self {
            allow: Vec::new(),
            deny: DEFAULT_DENY
                .iter()
                .map(|p| Regex::new(p).unwrap())
                .collect(),
            decide: None,
        }
    }
}

impl AttrFilter {
    /// Filter with the default deny list and an empty allow list
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter that accepts every name
    pub fn accept_all() -> Self {
        Self {
            allow: Vec::new(),
            deny: Vec::new(),
            decide: None,
        }
    }

    /// Compile a pattern and push it onto the allow list
    pub fn allow(&mut self, pattern: &str) -> Result<&mut Self> {
        self.allow.push(Regex::new(pattern)?);
        Ok(self)
    }

    /// Compile a pattern and push it onto the deny list
    pub fn deny(&mut self, pattern: &str) -> Result<&mut Self> {
        self.deny.push(Regex::new(pattern)?);
        Ok(self)
    }

    /// Push a pre-compiled pattern onto the allow list
    pub fn allow_regex(&mut self, pattern: Regex) -> &mut Self {
        self.allow.push(pattern);
        self
    }

    /// Push a pre-compiled pattern onto the deny list
    pub fn deny_regex(&mut self, pattern: Regex) -> &mut Self {
        self.deny.push(pattern);
        self
    }

    /// Drop every allow pattern
    pub fn clear_allow(&mut self) -> &mut Self {
        self.allow.clear();
        self
    }

    /// Drop every deny pattern
    pub fn clear_deny(&mut self) -> &mut Self {
        self.deny.clear();
        self
    }

    /// Replace the decision rule entirely. The pattern lists are kept but
    /// no longer consulted until [`reset_decide`](Self::reset_decide).
    pub fn set_decide<F>(&mut self, decide: F) -> &mut Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.decide = Some(Arc::new(decide));
        self
    }

    /// Restore the default allow-then-deny decision rule
    pub fn reset_decide(&mut self) -> &mut Self {
        self.decide = None;
        self
    }

    /// Decide whether `name` gets a proxy member.
    ///
    /// Default rule: the name matches some allow pattern, or matches no
    /// deny pattern.
    pub fn decide(&self, name: &str) -> bool {
        if let Some(decide) = &self.decide {
            return decide(name);
        }
        self.allow.iter().any(|re| re.is_match(name))
            || self.deny.iter().all(|re| !re.is_match(name))
    }
}

// Regex lists render as pattern strings; the override closure has no
// useful rendering beyond its presence.
impl fmt::Debug for AttrFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttrFilter")
            .field(
                "allow",
                &self.allow.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
            )
            .field(
                "deny",
                &self.deny.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
            )
            .field("decide_overridden", &self.decide.is_some())
            .finish()
    }
}

/// Process-wide filter configuration with explicit get/set semantics.
///
/// Reads take a snapshot; writes are last-write-wins. Wrap construction
/// reads exactly one snapshot, so a chain built from one `wrap` call is
/// never affected by later configuration changes.
pub struct FilterHandle {
    inner: RwLock<AttrFilter>,
}

impl FilterHandle {
    /// Create a handle around the given filter
    pub fn new(filter: AttrFilter) -> Self {
        Self {
            inner: RwLock::new(filter),
        }
    }

    /// The process-wide handle consulted by [`wrap`](crate::wrap)
    pub fn global() -> &'static Self {
        static INSTANCE: OnceLock<FilterHandle> = OnceLock::new();
        INSTANCE.get_or_init(|| FilterHandle::new(AttrFilter::default()))
    }

    /// Clone the current filter
    pub fn snapshot(&self) -> AttrFilter {
        self.inner.read().unwrap().clone()
    }

    /// Replace the current filter
    pub fn replace(&self, filter: AttrFilter) {
        debug!("replacing attribute filter configuration");
        *self.inner.write().unwrap() = filter;
    }

    /// Compile a pattern and push it onto the allow list
    pub fn allow(&self, pattern: &str) -> Result<()> {
        self.inner.write().unwrap().allow(pattern)?;
        Ok(())
    }

    /// Compile a pattern and push it onto the deny list
    pub fn deny(&self, pattern: &str) -> Result<()> {
        self.inner.write().unwrap().deny(pattern)?;
        Ok(())
    }

    /// Replace the decision rule
    pub fn set_decide<F>(&self, decide: F)
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.inner.write().unwrap().set_decide(decide);
    }

    /// Restore the default filter (default deny list, empty allow list,
    /// default decision rule)
    pub fn reset(&self) {
        debug!("resetting attribute filter configuration");
        *self.inner.write().unwrap() = AttrFilter::default();
    }

    /// Decide a name against the current filter
    pub fn decide(&self, name: &str) -> bool {
        self.inner.read().unwrap().decide(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_deny_list() {
        let filter = AttrFilter::default();
        assert!(!filter.decide("0"));
        assert!(!filter.decide("42abc"));
        assert!(!filter.decide("__proto"));
        assert!(!filter.decide("__internal_state"));
        assert!(!filter.decide("constructor"));

        assert!(filter.decide("name"));
        assert!(filter.decide("value_2"));
        assert!(filter.decide("_single_underscore"));
    }

    #[test]
    fn test_allow_rescues_deny() {
        let mut filter = AttrFilter::default();
        filter.deny("^secret").unwrap();
        assert!(!filter.decide("secret_value"));

        filter.allow("^secret").unwrap();
        assert!(filter.decide("secret_value"));
        // unrelated names are unaffected
        assert!(filter.decide("public_value"));
        assert!(!filter.decide("constructor"));
    }

    #[test]
    fn test_decide_override() {
        let mut filter = AttrFilter::default();
        filter.set_decide(|name| name.len() <= 3);
        assert!(filter.decide("abc"));
        assert!(!filter.decide("abcd"));
        // the override wins even over the deny list
        assert!(filter.decide("007"));

        filter.reset_decide();
        assert!(!filter.decide("007"));
        assert!(filter.decide("abcd"));
    }

    #[test]
    fn test_invalid_pattern() {
        let mut filter = AttrFilter::default();
        assert!(filter.allow("(unclosed").is_err());
    }

    #[test]
    fn test_accept_all() {
        let filter = AttrFilter::accept_all();
        assert!(filter.decide("constructor"));
        assert!(filter.decide("0"));
        assert!(filter.decide("__anything"));
    }

    #[test]
    fn test_handle_snapshot_and_replace() {
        let handle = FilterHandle::new(AttrFilter::default());
        assert!(!handle.decide("constructor"));

        handle.replace(AttrFilter::accept_all());
        assert!(handle.decide("constructor"));

        // snapshots are independent of later writes
        let snapshot = handle.snapshot();
        handle.reset();
        assert!(snapshot.decide("constructor"));
        assert!(!handle.decide("constructor"));
    }

    #[test]
    fn test_handle_pattern_edits() {
        let handle = FilterHandle::new(AttrFilter::default());
        handle.deny("^secret").unwrap();
        assert!(!handle.decide("secret_key"));

        handle.allow("^secret").unwrap();
        assert!(handle.decide("secret_key"));

        assert!(handle.allow("(bad").is_err());
    }

    #[test]
    fn test_global_defaults() {
        // read-only: other tests may run in parallel against the global
        let snapshot = FilterHandle::global().snapshot();
        assert!(!snapshot.decide("constructor"));
        assert!(snapshot.decide("name"));
    }
}
