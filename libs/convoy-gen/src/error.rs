#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("parse error in {unit}: {source}")]
    Parse {
        unit: String,
        #[source]
        source: syn::Error,
    },
}

impl GenError {
    pub fn parse(unit: impl Into<String>, source: syn::Error) -> Self {
        Self::Parse {
            unit: unit.into(),
            source,
        }
    }
}
