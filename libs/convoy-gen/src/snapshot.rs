use crate::error::GenError;

/// One parsed source unit plus the name it is reported under.
pub struct SourceUnit {
    name: String,
    ast: syn::File,
}

/// Immutable program representation both generator phases run against.
///
/// Parsing is the only fallible step of the whole pipeline; scanning and
/// emission downstream are pure functions of the snapshot.
#[derive(Default)]
pub struct ProgramSnapshot {
    units: Vec<SourceUnit>,
}

// syn::File carries no Debug; print the unit names only.
impl std::fmt::Debug for ProgramSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgramSnapshot")
            .field(
                "units",
                &self.units.iter().map(|unit| unit.name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ProgramSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one unit into the snapshot. `name` shows up in diagnostics
    /// only, it carries no path semantics.
    pub fn add_source(mut self, name: impl Into<String>, source: &str) -> Result<Self, GenError> {
        let name = name.into();
        let ast = syn::parse_file(source).map_err(|e| GenError::parse(name.as_str(), e))?;
        self.units.push(SourceUnit { name, ast });
        Ok(self)
    }

    pub fn units(&self) -> impl Iterator<Item = (&str, &syn::File)> {
        self.units.iter().map(|unit| (unit.name.as_str(), &unit.ast))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
