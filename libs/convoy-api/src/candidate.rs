use std::any::Any;
use std::sync::Arc;

use crate::error::ConvertError;
use crate::key::{PairKey, TypeKey};

/// Erased invocation adapter produced by [`Candidate::bind`].
///
/// Stateless after construction and safe to invoke concurrently.
pub type BoundFn = Arc<dyn Fn(Box<dyn Any>) -> Box<dyn Any> + Send + Sync>;

/// One registered conversion function, type-erased for storage.
///
/// A candidate is a unary mapping from one concrete input type to one
/// concrete output type. The function itself is held behind `dyn Any` so
/// candidates for different pairs can live in one collection; both type keys
/// are captured at construction and are immutable afterwards.
#[derive(Clone)]
pub struct Candidate {
    symbol: String,
    scope: String,
    input: TypeKey,
    output: TypeKey,
    handle: Arc<dyn Any + Send + Sync>,
}

impl std::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate")
            .field("symbol", &self.symbol)
            .field("scope", &self.scope)
            .field("input", &self.input)
            .field("output", &self.output)
            .finish()
    }
}

impl Candidate {
    /// Wrap a conversion function. `symbol` is the spelled function path,
    /// `scope` the module it was registered from; prefer the
    /// [`candidate!`](crate::candidate!) macro, which captures both.
    pub fn new<I: 'static, O: 'static>(
        symbol: impl Into<String>,
        scope: impl Into<String>,
        f: fn(I) -> O,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            scope: scope.into(),
            input: TypeKey::of::<I>(),
            output: TypeKey::of::<O>(),
            handle: Arc::new(f),
        }
    }

    /// Bare function name, without any path qualifier. This is what the
    /// conventional-name filter compares against.
    pub fn name(&self) -> &str {
        self.symbol.rsplit("::").next().unwrap_or(&self.symbol)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Registration scope plus spelled path, for error messages.
    pub fn label(&self) -> String {
        format!("{}::{}", self.scope, self.symbol)
    }

    pub fn input(&self) -> TypeKey {
        self.input
    }

    pub fn output(&self) -> TypeKey {
        self.output
    }

    pub fn pair(&self) -> PairKey {
        PairKey::new(self.input, self.output)
    }

    /// Checked invocation through the erased handle. The downcast runs on
    /// every call; [`bind`](Self::bind) is the amortized alternative.
    pub fn call<I: 'static, O: 'static>(&self, value: I) -> Result<O, ConvertError> {
        let f = self
            .handle
            .downcast_ref::<fn(I) -> O>()
            .ok_or_else(|| self.signature_error::<I, O>())?;
        Ok(f(value))
    }

    /// Build the reusable adapter once. The signature check happens here;
    /// the returned adapter only moves a boxed value through the concrete
    /// function.
    pub fn bind<I: 'static, O: 'static>(&self) -> Result<BoundFn, ConvertError> {
        let f = *self
            .handle
            .downcast_ref::<fn(I) -> O>()
            .ok_or_else(|| self.signature_error::<I, O>())?;
        Ok(Arc::new(move |boxed: Box<dyn Any>| {
            match boxed.downcast::<I>() {
                Ok(value) => Box::new(f(*value)) as Box<dyn Any>,
                // A foreign input is handed back unchanged; the caller's
                // output downcast turns it into an error.
                Err(other) => other,
            }
        }))
    }

    fn signature_error<I: 'static, O: 'static>(&self) -> ConvertError {
        if self.input == TypeKey::of::<I>() {
            ConvertError::output_mismatch(self.input, self.output, TypeKey::of::<O>())
        } else {
            ConvertError::not_registered::<I, O>()
        }
    }
}

/// Register a conversion function as a [`Candidate`], capturing its spelled
/// path and the calling module as the registration scope.
///
/// ```
/// use convoy_api::candidate;
///
/// struct Reading(u32);
/// struct ReadingDto(u32);
///
/// impl Reading {
///     fn to_dto(self) -> ReadingDto {
///         ReadingDto(self.0)
///     }
/// }
///
/// let c = candidate!(Reading::to_dto);
/// assert_eq!(c.name(), "to_dto");
/// ```
#[macro_export]
macro_rules! candidate {
    ($f:path) => {
        $crate::candidate::Candidate::new(
            // stringify! spaces out path separators.
            stringify!($f).replace(' ', ""),
            module_path!(),
            $f,
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Reading {
        celsius: i32,
    }

    #[derive(Debug, PartialEq)]
    struct ReadingDto {
        celsius: i32,
    }

    #[derive(Debug)]
    struct OtherDto;

    impl Reading {
        fn to_dto(self) -> ReadingDto {
            ReadingDto {
                celsius: self.celsius,
            }
        }
    }

    #[test]
    fn test_candidate_captures_pair_and_names() {
        let c = candidate!(Reading::to_dto);
        assert_eq!(c.name(), "to_dto");
        assert_eq!(c.symbol(), "Reading::to_dto");
        assert_eq!(c.input(), TypeKey::of::<Reading>());
        assert_eq!(c.output(), TypeKey::of::<ReadingDto>());
        assert!(c.label().contains("candidate::tests"));
    }

    #[test]
    fn test_call_invokes_the_wrapped_function() {
        let c = candidate!(Reading::to_dto);
        let dto: ReadingDto = c.call(Reading { celsius: 21 }).unwrap();
        assert_eq!(dto, ReadingDto { celsius: 21 });
    }

    #[test]
    fn test_call_with_wrong_output_is_a_mismatch() {
        let c = candidate!(Reading::to_dto);
        let err = c.call::<Reading, OtherDto>(Reading { celsius: 0 }).unwrap_err();
        match err {
            ConvertError::OutputMismatch { bound, requested, .. } => {
                assert_eq!(bound, TypeKey::of::<ReadingDto>());
                assert_eq!(requested, TypeKey::of::<OtherDto>());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_call_with_wrong_input_is_not_registered() {
        let c = candidate!(Reading::to_dto);
        let err = c.call::<OtherDto, ReadingDto>(OtherDto).unwrap_err();
        assert!(matches!(err, ConvertError::NotRegistered { .. }));
    }

    #[test]
    fn test_bound_adapter_converts_boxed_values() {
        let c = candidate!(Reading::to_dto);
        let adapter = c.bind::<Reading, ReadingDto>().unwrap();
        let out = adapter(Box::new(Reading { celsius: -3 }));
        let dto = out.downcast::<ReadingDto>().unwrap();
        assert_eq!(*dto, ReadingDto { celsius: -3 });
    }

    #[test]
    fn test_bound_adapter_passes_foreign_input_back() {
        let c = candidate!(Reading::to_dto);
        let adapter = c.bind::<Reading, ReadingDto>().unwrap();
        let out = adapter(Box::new(OtherDto));
        assert!(out.downcast::<ReadingDto>().is_err());
    }

    #[test]
    fn test_bind_with_wrong_signature_fails_upfront() {
        let c = candidate!(Reading::to_dto);
        assert!(c.bind::<Reading, OtherDto>().is_err());
    }
}
