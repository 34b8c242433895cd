use std::any::TypeId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use convoy_api::candidate::BoundFn;
use convoy_api::dispatch::Dispatch;
use convoy_api::error::ConvertError;
use convoy_api::key::{PairKey, TypeKey};
use convoy_api::provider::CandidateProvider;

use crate::resolve::{self, DEFAULT_CONVENTION};

/// Cache slot: the adapter plus the output type it was bound for.
struct BoundSlot {
    output: TypeKey,
    adapter: BoundFn,
}

/// Compiled strategy, keyed on the input type alone.
///
/// Per input type the first call resolves the pair, builds a [`BoundFn`]
/// once and publishes it; every later call for that input is one map read
/// plus a direct call. Because the key omits the output type, requesting a
/// different output for an already-bound input is reported as
/// [`ConvertError::OutputMismatch`] rather than `NotRegistered`; the
/// pair-keyed [`TableRegistry`](crate::table::TableRegistry) is the variant
/// without this caveat.
pub struct BoundRegistry {
    provider: Box<dyn CandidateProvider>,
    convention: String,
    slots: RwLock<HashMap<TypeId, BoundSlot>>,
    discovery_runs: AtomicU64,
}

impl BoundRegistry {
    pub fn new(provider: impl CandidateProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            convention: DEFAULT_CONVENTION.to_string(),
            slots: RwLock::new(HashMap::new()),
            discovery_runs: AtomicU64::new(0),
        }
    }

    pub fn with_convention(mut self, convention: impl Into<String>) -> Self {
        self.convention = convention.into();
        self
    }

    /// Number of discovery passes performed so far (one per input-type
    /// miss, not one per process).
    pub fn discovery_runs(&self) -> u64 {
        self.discovery_runs.load(Ordering::Relaxed)
    }

    /// Drop every bound adapter so the next calls re-resolve.
    pub fn reset(&self) {
        let mut guard = match self.slots.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("bound cache write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.clear();
        self.discovery_runs.store(0, Ordering::Relaxed);
    }

    /// Cached adapter for `input`, or the mismatch error if the slot was
    /// bound for a different output.
    fn cached(&self, input: TypeKey, requested: TypeKey) -> Option<Result<BoundFn, ConvertError>> {
        let guard = match self.slots.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("bound cache read lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.get(&input.id()).map(|slot| {
            if slot.output == requested {
                tracing::trace!(input = %input, "bound adapter hit");
                Ok(Arc::clone(&slot.adapter))
            } else {
                Err(ConvertError::output_mismatch(input, slot.output, requested))
            }
        })
    }

    /// Resolve, bind and publish the adapter for one input type.
    fn bind_slot<Output: 'static, Input: 'static>(
        &self,
        input: TypeKey,
        output: TypeKey,
    ) -> Result<BoundFn, ConvertError> {
        self.discovery_runs.fetch_add(1, Ordering::Relaxed);
        let candidates = resolve::discover(self.provider.as_ref(), &self.convention);
        if candidates.is_empty() {
            return Err(ConvertError::NoCandidates);
        }
        let pair = PairKey::new(input, output);
        let candidate = resolve::resolve_pair(&candidates, &pair)?;
        let adapter = candidate.bind::<Input, Output>()?;

        let mut guard = match self.slots.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("bound cache write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        match guard.entry(input.id()) {
            // Lost the populate race; the published slot stays, this call
            // completes with its own adapter.
            Entry::Occupied(_) => {}
            Entry::Vacant(vacant) => {
                vacant.insert(BoundSlot {
                    output,
                    adapter: Arc::clone(&adapter),
                });
            }
        }
        Ok(adapter)
    }
}

impl Dispatch for BoundRegistry {
    fn convert<Output: 'static, Input: 'static>(
        &self,
        value: Input,
    ) -> Result<Output, ConvertError> {
        let input = TypeKey::of::<Input>();
        let output = TypeKey::of::<Output>();

        let adapter = match self.cached(input, output) {
            Some(Ok(adapter)) => adapter,
            Some(Err(err)) => return Err(err),
            None => self.bind_slot::<Output, Input>(input, output)?,
        };

        let produced = adapter(Box::new(value));
        match produced.downcast::<Output>() {
            Ok(out) => Ok(*out),
            // The adapter hands a foreign input back unchanged; with the
            // slot output verified above this leg is never taken, but the
            // call stays total.
            Err(_) => Err(ConvertError::not_registered::<Input, Output>()),
        }
    }
}
