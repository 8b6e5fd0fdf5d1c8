//! Key/value property sources merged into encoded events
//!
//! This module provides:
//! - `EncoderContext`: properties of the encoder's execution environment
//! - `mdc`: per-thread diagnostic context captured into each `LogEvent`
//! - `MdcGuard`: RAII guard for scoped diagnostic properties

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Properties attached to the environment an encoder runs in.
///
/// Clones share the same property map, so a context can be handed to several
/// encoders and updated in one place. Values here lose to diagnostic-context
/// values of the same key when an event is encoded.
///
/// # Example
///
/// ```
/// use logstash_encoder::core::EncoderContext;
///
/// let ctx = EncoderContext::new("billing");
/// ctx.put_property("env", "staging");
/// ctx.put_property("region", "eu-west-1");
///
/// assert_eq!(ctx.copy_of_property_map().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EncoderContext {
    name: String,
    properties: Arc<RwLock<BTreeMap<String, String>>>,
}

impl EncoderContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a property, overwriting any existing value
    pub fn put_property(&self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.write().insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<String> {
        self.properties.read().get(key).cloned()
    }

    pub fn remove_property(&self, key: &str) -> Option<String> {
        self.properties.write().remove(key)
    }

    /// Snapshot of all properties
    pub fn copy_of_property_map(&self) -> BTreeMap<String, String> {
        self.properties.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.read().is_empty()
    }
}

/// Per-thread diagnostic context.
///
/// Properties put here are copied into every [`LogEvent`](super::LogEvent)
/// created on the same thread.
pub mod mdc {
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    thread_local! {
        static CONTEXT: RefCell<BTreeMap<String, String>> = const { RefCell::new(BTreeMap::new()) };
    }

    pub fn put(key: impl Into<String>, value: impl Into<String>) {
        CONTEXT.with(|ctx| {
            ctx.borrow_mut().insert(key.into(), value.into());
        });
    }

    pub fn get(key: &str) -> Option<String> {
        CONTEXT.with(|ctx| ctx.borrow().get(key).cloned())
    }

    pub fn remove(key: &str) -> Option<String> {
        CONTEXT.with(|ctx| ctx.borrow_mut().remove(key))
    }

    pub fn clear() {
        CONTEXT.with(|ctx| ctx.borrow_mut().clear());
    }

    pub fn copy_of_context_map() -> BTreeMap<String, String> {
        CONTEXT.with(|ctx| ctx.borrow().clone())
    }

    /// Put a property for the lifetime of the returned guard.
    ///
    /// # Example
    ///
    /// ```
    /// use logstash_encoder::core::mdc;
    ///
    /// {
    ///     let _guard = mdc::put_scoped("request_id", "abc-123");
    ///     assert_eq!(mdc::get("request_id").as_deref(), Some("abc-123"));
    /// }
    /// assert_eq!(mdc::get("request_id"), None);
    /// ```
    #[must_use = "the property is removed when the guard is dropped"]
    pub fn put_scoped(key: impl Into<String>, value: impl Into<String>) -> MdcGuard {
        let key = key.into();
        let previous = CONTEXT.with(|ctx| ctx.borrow_mut().insert(key.clone(), value.into()));
        MdcGuard { key, previous }
    }

    /// Restores the previous value of a scoped property when dropped
    pub struct MdcGuard {
        key: String,
        previous: Option<String>,
    }

    impl Drop for MdcGuard {
        fn drop(&mut self) {
            CONTEXT.with(|ctx| {
                let mut ctx = ctx.borrow_mut();
                match self.previous.take() {
                    Some(value) => ctx.insert(std::mem::take(&mut self.key), value),
                    None => ctx.remove(&self.key),
                };
            });
        }
    }
}

pub use mdc::MdcGuard;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_context_basic() {
        let ctx = EncoderContext::new("app");
        ctx.put_property("service", "api-gateway");
        ctx.put_property("version", "1.2.3");

        assert_eq!(ctx.name(), "app");
        assert_eq!(ctx.property("service").as_deref(), Some("api-gateway"));
        assert_eq!(ctx.copy_of_property_map().len(), 2);
    }

    #[test]
    fn test_encoder_context_shared_between_clones() {
        let ctx = EncoderContext::new("app");
        let clone = ctx.clone();
        clone.put_property("env", "prod");

        assert_eq!(ctx.property("env").as_deref(), Some("prod"));
        assert_eq!(ctx.remove_property("env").as_deref(), Some("prod"));
        assert!(clone.is_empty());
    }

    #[test]
    fn test_mdc_is_thread_local() {
        mdc::put("user", "alice");

        let other = std::thread::spawn(|| mdc::get("user")).join().unwrap();
        assert_eq!(other, None);
        assert_eq!(mdc::get("user").as_deref(), Some("alice"));

        mdc::clear();
        assert!(mdc::copy_of_context_map().is_empty());
    }

    #[test]
    fn test_mdc_scoped_restores_previous() {
        mdc::put("tenant", "outer");
        {
            let _guard = mdc::put_scoped("tenant", "inner");
            assert_eq!(mdc::get("tenant").as_deref(), Some("inner"));
        }
        assert_eq!(mdc::get("tenant").as_deref(), Some("outer"));
        assert_eq!(mdc::remove("tenant").as_deref(), Some("outer"));
    }
}
