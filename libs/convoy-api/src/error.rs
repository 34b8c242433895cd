use crate::candidate::Candidate;
use crate::key::TypeKey;

/// Failure taxonomy shared by every dispatch strategy and by generated
/// dispatch code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// Discovery produced an empty candidate set.
    #[error("no conversion candidates were discovered")]
    NoCandidates,

    /// No candidate matches the requested (input, output) pair. Names both
    /// types so a caller can tell a wrong direction from a missing
    /// registration.
    #[error("no conversion from `{input}` to `{output}` was registered")]
    NotRegistered { input: TypeKey, output: TypeKey },

    /// Two candidates target the same pair.
    #[error("conversion from `{input}` to `{output}` is ambiguous: `{first}` and `{second}` both match")]
    Ambiguous {
        input: TypeKey,
        output: TypeKey,
        first: String,
        second: String,
    },

    /// An input-keyed cache already holds a conversion for this input with a
    /// different output type.
    #[error("conversion for input `{input}` yields `{bound}`, not the requested `{requested}`")]
    OutputMismatch {
        input: TypeKey,
        bound: TypeKey,
        requested: TypeKey,
    },
}

impl ConvertError {
    pub fn not_registered<I: 'static, O: 'static>() -> Self {
        Self::NotRegistered {
            input: TypeKey::of::<I>(),
            output: TypeKey::of::<O>(),
        }
    }

    pub fn ambiguous(first: &Candidate, second: &Candidate) -> Self {
        Self::Ambiguous {
            input: first.input(),
            output: first.output(),
            first: first.label(),
            second: second.label(),
        }
    }

    pub fn output_mismatch(input: TypeKey, bound: TypeKey, requested: TypeKey) -> Self {
        Self::OutputMismatch {
            input,
            bound,
            requested,
        }
    }
}
