use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Type identity: `TypeId` for comparison, the type name for diagnostics.
///
/// Equality and hashing use the `TypeId` only; the name is display-only and
/// never consulted for lookups.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full type path as the compiler spells it.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Ordered (input, output) lookup key. Two pairs are equal iff both
/// components are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey {
    input: TypeKey,
    output: TypeKey,
}

impl PairKey {
    pub fn new(input: TypeKey, output: TypeKey) -> Self {
        Self { input, output }
    }

    pub fn of<I: 'static, O: 'static>() -> Self {
        Self::new(TypeKey::of::<I>(), TypeKey::of::<O>())
    }

    pub fn input(&self) -> TypeKey {
        self.input
    }

    pub fn output(&self) -> TypeKey {
        self.output
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.input, self.output)
    }
}
