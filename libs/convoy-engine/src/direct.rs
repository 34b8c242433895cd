use std::sync::atomic::{AtomicU64, Ordering};

use convoy_api::dispatch::Dispatch;
use convoy_api::error::ConvertError;
use convoy_api::key::PairKey;
use convoy_api::provider::CandidateProvider;

use crate::resolve::{self, DEFAULT_CONVENTION};

/// Per-call resolution, no cache.
///
/// Every `convert` enumerates the provider, filters by convention and scans
/// for the pair. The slowest strategy and the baseline the cached ones are
/// checked against.
pub struct DirectRegistry {
    provider: Box<dyn CandidateProvider>,
    convention: String,
    discovery_runs: AtomicU64,
}

impl DirectRegistry {
    pub fn new(provider: impl CandidateProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            convention: DEFAULT_CONVENTION.to_string(),
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

    /// Test lifecycle hook; this strategy holds no cache, so only the
    /// counter is cleared.
    pub fn reset(&self) {
        self.discovery_runs.store(0, Ordering::Relaxed);
    }
}

impl Dispatch for DirectRegistry {
    fn convert<Output: 'static, Input: 'static>(
        &self,
        value: Input,
    ) -> Result<Output, ConvertError> {
        self.discovery_runs.fetch_add(1, Ordering::Relaxed);
        let candidates = resolve::discover(self.provider.as_ref(), &self.convention);
        if candidates.is_empty() {
            return Err(ConvertError::NoCandidates);
        }
        let pair = PairKey::of::<Input, Output>();
        let candidate = resolve::resolve_pair(&candidates, &pair)?;
        candidate.call(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, Student, StudentDto, TeacherDto};

    use convoy_api::provider::StaticProvider;

    #[test]
    fn test_convert_resolves_registered_pairs() {
        let registry = DirectRegistry::new(fixtures::people());
        let dto: StudentDto = registry.convert(fixtures::student()).unwrap();
        assert_eq!(dto.name, "Ann");
        let dto: TeacherDto = registry.convert(fixtures::teacher()).unwrap();
        assert_eq!(dto.name, "Bo");
    }

    #[test]
    fn test_every_call_pays_a_discovery_pass() {
        let registry = DirectRegistry::new(fixtures::people());
        let _: StudentDto = registry.convert(fixtures::student()).unwrap();
        let _: StudentDto = registry.convert(fixtures::student()).unwrap();
        assert_eq!(registry.discovery_runs(), 2);

        registry.reset();
        assert_eq!(registry.discovery_runs(), 0);
    }

    #[test]
    fn test_unregistered_pair_is_not_registered() {
        let registry = DirectRegistry::new(fixtures::people());
        let err = registry
            .convert::<TeacherDto, Student>(fixtures::student())
            .unwrap_err();
        assert_eq!(err, ConvertError::not_registered::<Student, TeacherDto>());
    }

    #[test]
    fn test_empty_provider_is_no_candidates() {
        let registry = DirectRegistry::new(StaticProvider::new());
        let err = registry
            .convert::<StudentDto, Student>(fixtures::student())
            .unwrap_err();
        assert_eq!(err, ConvertError::NoCandidates);
    }

    #[test]
    fn test_mismatching_convention_is_no_candidates() {
        let registry = DirectRegistry::new(fixtures::people()).with_convention("into_record");
        let err = registry
            .convert::<StudentDto, Student>(fixtures::student())
            .unwrap_err();
        assert_eq!(err, ConvertError::NoCandidates);
    }

    #[test]
    fn test_duplicate_of_the_requested_pair_is_ambiguous() {
        let registry = DirectRegistry::new(fixtures::duplicated());
        let err = registry
            .convert::<StudentDto, Student>(fixtures::student())
            .unwrap_err();
        assert!(matches!(err, ConvertError::Ambiguous { .. }));

        // The duplicate does not affect other pairs.
        let dto: TeacherDto = registry.convert(fixtures::teacher()).unwrap();
        assert_eq!(dto.name, "Bo");
    }
}
