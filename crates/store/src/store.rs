//! The concurrency-controlled store.

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::notify::ChangeNotifier;
use pantry_core::{migrate, Envelope, InventoryItem, ItemPatch, Violations};
use pantry_storage::StorageBackend;
use uuid::Uuid;

/// CRUD access to the single persisted envelope, safe across independent
/// writers without a lock.
///
/// Every mutation goes through [`with_concurrency_control`]: read the
/// envelope, let the operation compute a successor, re-read to detect an
/// interleaved commit, and only persist when none occurred. This is a
/// compare-and-swap on the envelope's `revision` field. It prevents silent
/// lost updates; it does not serialize reads taken outside the primitive,
/// so a [`get_all`] snapshot may be stale relative to a concurrently
/// committing writer and must not be combined with manual writes.
///
/// [`with_concurrency_control`]: InventoryStore::with_concurrency_control
/// [`get_all`]: InventoryStore::get_all
///
/// # Example
///
/// ```
/// use pantry_storage::MemoryBackend;
/// use pantry_store::{InventoryStore, InventoryItem, ItemPatch};
///
/// let store = InventoryStore::new(MemoryBackend::new());
/// let milk = InventoryItem::new("Milk", 1.0, "Fridge");
/// let id = milk.id;
///
/// store.add(milk)?;
/// store.update(id, &ItemPatch::quantity(0.0))?;
/// store.remove(id)?;
/// assert_eq!(store.current_revision(), 3);
/// # Ok::<(), pantry_store::StoreError>(())
/// ```
#[derive(Debug)]
pub struct InventoryStore<B: StorageBackend> {
    backend: B,
    config: StoreConfig,
    notifier: ChangeNotifier,
}

impl<B: StorageBackend> InventoryStore<B> {
    /// Create a store with the default configuration.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, StoreConfig::default())
    }

    /// Create a store with explicit configuration.
    pub fn with_config(backend: B, config: StoreConfig) -> Self {
        InventoryStore {
            backend,
            config,
            notifier: ChangeNotifier::new(),
        }
    }

    /// The store's configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The store's change-notification bus.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Register a listener invoked after every successful commit.
    pub fn on_change(&self, listener: impl Fn() + Send + Sync + 'static) {
        self.notifier.subscribe(listener);
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Load the persisted envelope.
    ///
    /// Runs whatever is stored through [`migrate`], so the result is always
    /// a valid envelope. Substrate read faults are logged and treated as
    /// "no data"; this never fails.
    pub fn read_envelope(&self) -> Envelope {
        match self.backend.get(&self.config.storage_key) {
            Ok(raw) => migrate(raw.as_deref()),
            Err(err) => {
                tracing::warn!(error = %err, "storage read failed, treating as no data");
                Envelope::empty()
            }
        }
    }

    /// All items, in insertion order. A snapshot read; never bumps the
    /// revision.
    pub fn get_all(&self) -> Vec<InventoryItem> {
        self.read_envelope().items
    }

    /// Items at or below their low-stock threshold.
    ///
    /// Items without a per-item threshold fall back to the configured
    /// global default.
    pub fn low_stock(&self) -> Vec<InventoryItem> {
        let default = self.config.default_low_stock_threshold;
        self.get_all()
            .into_iter()
            .filter(|item| item.quantity <= item.low_stock_threshold.unwrap_or(default))
            .collect()
    }

    /// Current revision counter (diagnostics).
    pub fn current_revision(&self) -> u64 {
        self.read_envelope().revision
    }

    /// Schema version of the persisted envelope (diagnostics).
    pub fn schema_version(&self) -> u32 {
        self.read_envelope().schema_version
    }

    // ========================================================================
    // The concurrency primitive
    // ========================================================================

    /// Run a mutating operation under optimistic concurrency control, with
    /// the configured retry budget.
    ///
    /// See [`with_concurrency_control_retries`] for the protocol.
    ///
    /// [`with_concurrency_control_retries`]: InventoryStore::with_concurrency_control_retries
    pub fn with_concurrency_control<T, F>(&self, operation: F) -> Result<T>
    where
        F: FnMut(&Envelope) -> Result<(Option<Envelope>, T)>,
    {
        self.with_concurrency_control_retries(operation, self.config.max_retries)
    }

    /// Run a mutating operation under optimistic concurrency control.
    ///
    /// Protocol, per attempt:
    /// 1. Read the current envelope and record its revision as `expected`.
    /// 2. Invoke `operation` with the freshly-read envelope to compute a
    ///    successor and a result. `None` for the successor means "nothing
    ///    to write": the result is returned without a commit, a revision
    ///    bump, or a notification.
    /// 3. Re-read the envelope. A changed revision means another writer
    ///    committed in between; retry from step 1 against the now-current
    ///    state, unless the retry budget is exhausted.
    /// 4. Otherwise set the successor's revision to `expected + 1`,
    ///    validate it, persist it, emit the change notification, and
    ///    return the result.
    ///
    /// The operation may therefore run multiple times and must derive its
    /// target state (indices, matches, merges) from the envelope argument
    /// on every invocation, never from a snapshot captured before the
    /// loop.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Conflict`] after `max_retries` attempts — the only
    ///   error this primitive raises itself, and retryable by the caller.
    /// - [`StoreError::Validation`] from the operation or the pre-persist
    ///   check, propagated unchanged.
    /// - [`StoreError::Storage`] if the substrate write fails.
    pub fn with_concurrency_control_retries<T, F>(
        &self,
        mut operation: F,
        max_retries: u32,
    ) -> Result<T>
    where
        F: FnMut(&Envelope) -> Result<(Option<Envelope>, T)>,
    {
        let mut attempts = 0u32;
        loop {
            let current = self.read_envelope();
            let expected = current.revision;

            let (next, result) = operation(&current)?;
            let mut next = match next {
                Some(next) => next,
                None => return Ok(result),
            };

            let fresh = self.read_envelope();
            if fresh.revision != expected {
                attempts += 1;
                if attempts >= max_retries {
                    tracing::debug!(attempts, "optimistic concurrency retries exhausted");
                    return Err(StoreError::Conflict { attempts });
                }
                tracing::debug!(
                    expected,
                    actual = fresh.revision,
                    attempt = attempts,
                    "concurrent commit detected, retrying"
                );
                continue;
            }

            next.revision = expected + 1;
            next.check()?;
            self.persist(&next)?;
            self.notifier.emit();
            return Ok(result);
        }
    }

    fn persist(&self, envelope: &Envelope) -> Result<()> {
        let raw = serde_json::to_string(envelope)
            .map_err(|err| StoreError::Serialization(err.to_string()))?;
        self.backend.set(&self.config.storage_key, &raw)?;
        Ok(())
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    /// Append a validated item, preserving insertion order.
    pub fn add(&self, item: InventoryItem) -> Result<()> {
        item.check()?;
        self.with_concurrency_control(|current| {
            let mut next = current.clone();
            next.items.push(item.clone());
            Ok((Some(next), ()))
        })
    }

    /// Replace the item list wholesale.
    ///
    /// Every item is validated up front; violations are reported together,
    /// prefixed with the item's position.
    pub fn set_all(&self, items: Vec<InventoryItem>) -> Result<()> {
        let mut violations = Violations::new();
        for (idx, item) in items.iter().enumerate() {
            if let Err(err) = item.check() {
                violations.extend_prefixed(&format!("items[{}]", idx), err);
            }
        }
        violations.finish()?;

        self.with_concurrency_control(|current| {
            let mut next = current.clone();
            next.items = items.clone();
            Ok((Some(next), ()))
        })
    }

    /// Merge a partial update over the first item with a matching id.
    ///
    /// The merged item gets a fresh `date_updated`, is re-validated, and
    /// replaces the original in place. Returns `false`, without a commit,
    /// when no item matches. Only ever touches the first match; duplicate
    /// ids are tolerated and the remainder are left alone (contrast
    /// [`remove`](InventoryStore::remove)).
    pub fn update(&self, id: Uuid, patch: &ItemPatch) -> Result<bool> {
        self.with_concurrency_control(|current| {
            // The target position is re-derived from the freshly-read
            // envelope on every attempt.
            let idx = match current.items.iter().position(|item| item.id == id) {
                Some(idx) => idx,
                None => return Ok((None, false)),
            };
            let mut next = current.clone();
            let item = &mut next.items[idx];
            patch.apply(item);
            item.touch();
            item.check()?;
            Ok((Some(next), true))
        })
    }

    /// Remove every item with a matching id.
    ///
    /// Returns `true` iff at least one item was removed; `false` means no
    /// commit happened. All matches go, not just the first (contrast
    /// [`update`](InventoryStore::update)).
    pub fn remove(&self, id: Uuid) -> Result<bool> {
        self.with_concurrency_control(|current| {
            if !current.items.iter().any(|item| item.id == id) {
                return Ok((None, false));
            }
            let mut next = current.clone();
            next.items.retain(|item| item.id != id);
            Ok((Some(next), true))
        })
    }
}
