use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use convoy_api::dispatch::Dispatch;
use convoy_api::error::ConvertError;
use convoy_api::key::PairKey;
use convoy_api::provider::CandidateProvider;

use crate::resolve::{self, CandidateIndex, DEFAULT_CONVENTION};

/// Discovery-once strategy, keyed by the full type pair.
///
/// The first call builds a [`CandidateIndex`] over the whole provider and
/// publishes it; every later call is a read lock plus a map lookup. A failed
/// build (empty set, duplicate pair) is not cached, so a later call after
/// the provider situation changes gets a fresh pass.
pub struct TableRegistry {
    provider: Box<dyn CandidateProvider>,
    convention: String,
    index: RwLock<Option<Arc<CandidateIndex>>>,
    discovery_runs: AtomicU64,
}

impl TableRegistry {
    pub fn new(provider: impl CandidateProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            convention: DEFAULT_CONVENTION.to_string(),
            index: RwLock::new(None),
            discovery_runs: AtomicU64::new(0),
        }
    }

    pub fn with_convention(mut self, convention: impl Into<String>) -> Self {
        self.convention = convention.into();
        self
    }

    /// Number of discovery passes performed so far.
    pub fn discovery_runs(&self) -> u64 {
        self.discovery_runs.load(Ordering::Relaxed)
    }

    /// Drop the published index so the next call rediscovers.
    pub fn reset(&self) {
        let mut guard = match self.index.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("candidate index write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        *guard = None;
        self.discovery_runs.store(0, Ordering::Relaxed);
    }

    fn index(&self) -> Result<Arc<CandidateIndex>, ConvertError> {
        // Fast path: the index is already published.
        {
            let guard = match self.index.read() {
                Ok(guard) => guard,
                Err(poisoned) => {
                    tracing::warn!("candidate index read lock was poisoned, recovering");
                    poisoned.into_inner()
                }
            };
            if let Some(index) = guard.as_ref() {
                tracing::trace!("candidate index hit");
                return Ok(Arc::clone(index));
            }
        }

        // Slow path: discover outside the lock, publish if still vacant.
        self.discovery_runs.fetch_add(1, Ordering::Relaxed);
        let candidates = resolve::discover(self.provider.as_ref(), &self.convention);
        let built = Arc::new(CandidateIndex::build(candidates)?);

        let mut guard = match self.index.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("candidate index write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        match guard.as_ref() {
            // Lost the populate race; keep the first writer's index.
            Some(published) => Ok(Arc::clone(published)),
            None => {
                *guard = Some(Arc::clone(&built));
                Ok(built)
            }
        }
    }
}

impl Dispatch for TableRegistry {
    fn convert<Output: 'static, Input: 'static>(
        &self,
        value: Input,
    ) -> Result<Output, ConvertError> {
        let index = self.index()?;
        let pair = PairKey::of::<Input, Output>();
        match index.get(&pair) {
            Some(candidate) => candidate.call(value),
            None => Err(ConvertError::not_registered::<Input, Output>()),
        }
    }
}
