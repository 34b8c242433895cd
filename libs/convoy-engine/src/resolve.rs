use std::collections::HashMap;

use convoy_api::candidate::Candidate;
use convoy_api::error::ConvertError;
use convoy_api::key::PairKey;
use convoy_api::provider::CandidateProvider;

/// Conventional name a candidate must carry to qualify for dispatch.
pub const DEFAULT_CONVENTION: &str = "to_dto";

/// One discovery pass: enumerate the provider and keep the candidates whose
/// name matches the convention, in enumeration order.
///
/// Unary shape and static invokability are guaranteed by construction (a
/// [`Candidate`] wraps a plain `fn(I) -> O`), so the name is the only filter
/// applied at discovery time.
pub fn discover(provider: &dyn CandidateProvider, convention: &str) -> Vec<Candidate> {
    let all = provider.candidates();
    let total = all.len();
    let matched: Vec<Candidate> = all
        .into_iter()
        .filter(|candidate| candidate.name() == convention)
        .collect();
    tracing::debug!(total, matched = matched.len(), convention, "discovery pass");
    matched
}

/// Resolve one pair against an enumerated candidate list.
///
/// Returns the unique match. A second candidate for the same pair is
/// reported as [`ConvertError::Ambiguous`] rather than silently skipped.
pub fn resolve_pair(candidates: &[Candidate], pair: &PairKey) -> Result<Candidate, ConvertError> {
    let mut found: Option<&Candidate> = None;
    for candidate in candidates {
        if candidate.pair() == *pair {
            match found {
                None => found = Some(candidate),
                Some(first) => return Err(ConvertError::ambiguous(first, candidate)),
            }
        }
    }
    match found {
        Some(candidate) => Ok(candidate.clone()),
        None => Err(ConvertError::NotRegistered {
            input: pair.input(),
            output: pair.output(),
        }),
    }
}

/// Frozen result of one discovery pass, keyed by type pair.
#[derive(Debug)]
pub struct CandidateIndex {
    by_pair: HashMap<PairKey, Candidate>,
}

impl CandidateIndex {
    /// Build from an enumerated candidate set.
    ///
    /// An empty set is [`ConvertError::NoCandidates`]; any duplicate pair is
    /// [`ConvertError::Ambiguous`] naming both functions.
    pub fn build(candidates: Vec<Candidate>) -> Result<Self, ConvertError> {
        if candidates.is_empty() {
            return Err(ConvertError::NoCandidates);
        }
        let mut by_pair = HashMap::with_capacity(candidates.len());
        for candidate in candidates {
            let pair = candidate.pair();
            if let Some(existing) = by_pair.get(&pair) {
                return Err(ConvertError::ambiguous(existing, &candidate));
            }
            by_pair.insert(pair, candidate);
        }
        Ok(Self { by_pair })
    }

    pub fn get(&self, pair: &PairKey) -> Option<&Candidate> {
        self.by_pair.get(pair)
    }

    pub fn len(&self) -> usize {
        self.by_pair.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pair.is_empty()
    }
}
