use crate::candidate::Candidate;

/// Source of candidate conversion functions.
///
/// `candidates` returns the full current set as a snapshot; registries treat
/// one enumeration as one discovery pass and never call back for increments.
pub trait CandidateProvider: Send + Sync {
    fn candidates(&self) -> Vec<Candidate>;
}

/// Explicit registration table, the stock provider.
///
/// Built once at startup; enumeration order is registration order, which is
/// also the tie-break order wherever first-match semantics apply.
#[derive(Debug, Default, Clone)]
pub struct StaticProvider {
    entries: Vec<Candidate>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, candidate: Candidate) -> Self {
        self.entries.push(candidate);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CandidateProvider for StaticProvider {
    fn candidates(&self) -> Vec<Candidate> {
        self.entries.clone()
    }
}
