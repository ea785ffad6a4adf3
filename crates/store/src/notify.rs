//! Post-commit change notification.
//!
//! A process-wide "data changed" signal for observers in the same execution
//! context (a dashboard view refreshing after a commit). Fire-and-forget
//! and synchronous. It is injected into the store rather than hardwired, so
//! independent store instances do not cross-signal and tests can observe
//! emissions in isolation. Not a cross-process mechanism: propagation
//! between substrates is the substrate's own business.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

type ChangeListener = Box<dyn Fn() + Send + Sync>;

/// Subscribe/emit bus for post-commit notifications.
///
/// Clones share the same listener list.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    listeners: Arc<Mutex<Vec<ChangeListener>>>,
}

impl ChangeNotifier {
    /// Create a notifier with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener invoked after every successful commit.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) {
        self.listeners.lock().push(Box::new(listener));
    }

    /// Invoke every listener, in subscription order.
    pub fn emit(&self) {
        for listener in self.listeners.lock().iter() {
            listener();
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.lock().is_empty()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.len())
            .finish()
    }
}
