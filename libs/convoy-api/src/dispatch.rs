use crate::error::ConvertError;

/// Entry-point contract shared by every dispatch strategy.
///
/// `Output` comes first so call sites read as "convert to": for example
/// `registry.convert::<StudentDto, _>(student)`. Implementations must be
/// observably equivalent for correct inputs; they differ only in how much
/// resolution work repeated calls amortize.
pub trait Dispatch {
    fn convert<Output: 'static, Input: 'static>(
        &self,
        value: Input,
    ) -> Result<Output, ConvertError>;
}
