use std::collections::{HashMap, HashSet};

use serde::Serialize;
use syn::visit::{self, Visit};

use crate::options::GenOptions;
use crate::snapshot::ProgramSnapshot;

/// One confirmed candidate function, recorded by path and pair types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactCandidate {
    /// Callable path as the emitted code must spell it, without prefix
    /// (e.g. `Student::to_dto`).
    pub path: String,
    /// Unit the declaration was found in.
    pub unit: String,
    pub input: String,
    pub output: String,
}

/// One call site requesting a concrete pair of the entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactUse {
    pub unit: String,
    pub input: String,
    pub output: String,
}

/// Scan output: candidate and call-site facts, mergeable across shards.
///
/// Candidates are kept in discovery order; that order is the first-wins
/// tie break for duplicate pairs and the emission order downstream.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ScanFacts {
    pub candidates: Vec<FactCandidate>,
    pub uses: Vec<FactUse>,
    /// Call sites of the entry point whose type arguments could not be
    /// resolved. Any opaque use disables pruning.
    pub opaque_uses: usize,
}

impl ScanFacts {
    /// First candidate per (input, output) pair, in discovery order.
    pub fn unique_candidates(&self) -> Vec<&FactCandidate> {
        let mut seen = HashSet::new();
        self.candidates
            .iter()
            .filter(|c| seen.insert((c.input.as_str(), c.output.as_str())))
            .collect()
    }

    /// Later candidates for an already-claimed pair (first-wins losers).
    pub fn duplicates(&self) -> Vec<&FactCandidate> {
        let mut seen = HashSet::new();
        self.candidates
            .iter()
            .filter(|c| !seen.insert((c.input.as_str(), c.output.as_str())))
            .collect()
    }

    /// Candidates worth a branch: unique, and requested by a call site when
    /// pruning is on. Opaque uses disable pruning so a used candidate is
    /// never dropped.
    pub fn live(&self, prune_unused: bool) -> Vec<&FactCandidate> {
        let unique = self.unique_candidates();
        if !prune_unused || self.opaque_uses > 0 {
            return unique;
        }
        let requested: HashSet<(&str, &str)> = self
            .uses
            .iter()
            .map(|u| (u.input.as_str(), u.output.as_str()))
            .collect();
        unique
            .into_iter()
            .filter(|c| requested.contains(&(c.input.as_str(), c.output.as_str())))
            .collect()
    }

    /// Set union with the facts of another scan shard. Associative and
    /// commutative up to candidate order, which only moves the documented
    /// first-wins tie break.
    pub fn merge(mut self, other: ScanFacts) -> ScanFacts {
        self.candidates.extend(other.candidates);
        self.uses.extend(other.uses);
        self.opaque_uses += other.opaque_uses;
        self
    }
}

/// Scan the snapshot for candidates and call sites.
///
/// Phase 1 of the generator: a pure function of the snapshot. The syntactic
/// walk is the fast pre-filter; candidates are confirmed by resolving their
/// pair types against the snapshot's own type declarations, which excludes
/// lookalikes the shape checks alone cannot (undeclared or ambiguous type
/// names).
pub fn scan(snapshot: &ProgramSnapshot, options: &GenOptions) -> ScanFacts {
    // --- 1. Declared types across every unit ---
    let mut declared = DeclaredTypes::default();
    for (_, ast) in snapshot.units() {
        declared.visit_file(ast);
    }

    // --- 2. Candidate and call-site collection ---
    let mut candidates = Vec::new();
    let mut uses = Vec::new();
    for (unit, ast) in snapshot.units() {
        let mut scanner = UnitScanner {
            entry: &options.entry,
            convention: &options.convention,
            unit,
            current_impl: None,
            candidates: &mut candidates,
            uses: &mut uses,
        };
        scanner.visit_file(ast);
    }

    // --- 3. Confirmation against declared types ---
    let mut facts = ScanFacts::default();
    for candidate in candidates {
        match (
            declared.resolve(&candidate.input),
            declared.resolve(&candidate.output),
        ) {
            (Some(input), Some(output)) => {
                tracing::debug!(path = %candidate.path, input = %input, output = %output, "confirmed candidate");
                facts.candidates.push(FactCandidate {
                    path: candidate.path,
                    unit: candidate.unit,
                    input,
                    output,
                });
            }
            _ => {
                tracing::debug!(path = %candidate.path, unit = %candidate.unit, "candidate pair types do not resolve in the snapshot, excluded");
            }
        }
    }
    for record in uses {
        let input = record.input.as_deref().and_then(|name| declared.resolve(name));
        let output = record.output.as_deref().and_then(|name| declared.resolve(name));
        match (input, output) {
            (Some(input), Some(output)) => {
                facts.uses.push(FactUse {
                    unit: record.unit,
                    input,
                    output,
                });
            }
            _ => {
                tracing::debug!(unit = %record.unit, "call site type arguments do not resolve, pruning disabled");
                facts.opaque_uses += 1;
            }
        }
    }
    facts
}

// ---------------------------------------------------------------------------
// Declared-type census — resolution target for pair types
// ---------------------------------------------------------------------------

#[derive(Default)]
struct DeclaredTypes {
    counts: HashMap<String, usize>,
}

impl DeclaredTypes {
    /// Canonical name if the ident resolves to exactly one declaration.
    fn resolve(&self, spelled: &str) -> Option<String> {
        (self.counts.get(spelled) == Some(&1)).then(|| spelled.to_string())
    }
}

impl<'ast> Visit<'ast> for DeclaredTypes {
    fn visit_item_struct(&mut self, node: &'ast syn::ItemStruct) {
        *self.counts.entry(node.ident.to_string()).or_insert(0) += 1;
        visit::visit_item_struct(self, node);
    }

    fn visit_item_enum(&mut self, node: &'ast syn::ItemEnum) {
        *self.counts.entry(node.ident.to_string()).or_insert(0) += 1;
        visit::visit_item_enum(self, node);
    }
}

// ---------------------------------------------------------------------------
// Per-unit walk — shape-checked candidates and entry-point call sites
// ---------------------------------------------------------------------------

struct RawCandidate {
    unit: String,
    path: String,
    input: String,
    output: String,
}

struct RawUse {
    unit: String,
    output: Option<String>,
    input: Option<String>,
}

impl RawUse {
    fn opaque(unit: &str) -> Self {
        Self {
            unit: unit.to_string(),
            output: None,
            input: None,
        }
    }
}

struct UnitScanner<'a> {
    entry: &'a str,
    convention: &'a str,
    unit: &'a str,
    current_impl: Option<String>,
    candidates: &'a mut Vec<RawCandidate>,
    uses: &'a mut Vec<RawUse>,
}

impl UnitScanner<'_> {
    fn record_path_arguments(&mut self, arguments: &syn::PathArguments) {
        match arguments {
            syn::PathArguments::AngleBracketed(args) => self.record_turbofish(args),
            _ => self.uses.push(RawUse::opaque(self.unit)),
        }
    }

    fn record_turbofish(&mut self, args: &syn::AngleBracketedGenericArguments) {
        let types: Vec<&syn::Type> = args
            .args
            .iter()
            .filter_map(|arg| match arg {
                syn::GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect();
        // Entry-point order: first Output, then Input.
        if types.len() != 2 {
            self.uses.push(RawUse::opaque(self.unit));
            return;
        }
        self.uses.push(RawUse {
            unit: self.unit.to_string(),
            output: simple_type_name(types[0]),
            input: simple_type_name(types[1]),
        });
    }
}

impl<'ast> Visit<'ast> for UnitScanner<'_> {
    fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
        if let Some((path, input, output)) =
            candidate_from_signature(&node.sig, self.convention, None)
        {
            self.candidates.push(RawCandidate {
                unit: self.unit.to_string(),
                path,
                input,
                output,
            });
        }
        visit::visit_item_fn(self, node);
    }

    fn visit_item_impl(&mut self, node: &'ast syn::ItemImpl) {
        let previous = self.current_impl.take();
        if node.trait_.is_none() {
            self.current_impl = simple_type_name(&node.self_ty);
        }
        visit::visit_item_impl(self, node);
        self.current_impl = previous;
    }

    fn visit_impl_item_fn(&mut self, node: &'ast syn::ImplItemFn) {
        if let Some(impl_ty) = self.current_impl.clone() {
            if let Some((path, input, output)) =
                candidate_from_signature(&node.sig, self.convention, Some(impl_ty.as_str()))
            {
                self.candidates.push(RawCandidate {
                    unit: self.unit.to_string(),
                    path,
                    input,
                    output,
                });
            }
        }
        visit::visit_impl_item_fn(self, node);
    }

    fn visit_expr_call(&mut self, node: &'ast syn::ExprCall) {
        if let syn::Expr::Path(func) = node.func.as_ref() {
            if let Some(segment) = func.path.segments.last() {
                if segment.ident == self.entry {
                    self.record_path_arguments(&segment.arguments);
                }
            }
        }
        visit::visit_expr_call(self, node);
    }

    fn visit_expr_method_call(&mut self, node: &'ast syn::ExprMethodCall) {
        if node.method == self.entry {
            match &node.turbofish {
                Some(turbofish) => self.record_turbofish(turbofish),
                // No explicit type arguments, the pair cannot be resolved.
                None => self.uses.push(RawUse::opaque(self.unit)),
            }
        }
        visit::visit_expr_method_call(self, node);
    }
}

/// Candidate shape: conventional name, not generic or async, one by-value
/// path-typed argument (or by-value `self` on an inherent impl), concrete
/// path return type.
fn candidate_from_signature(
    sig: &syn::Signature,
    convention: &str,
    impl_ty: Option<&str>,
) -> Option<(String, String, String)> {
    if sig.ident != convention {
        return None;
    }
    if !sig.generics.params.is_empty() || sig.asyncness.is_some() {
        return None;
    }
    if sig.inputs.len() != 1 {
        return None;
    }

    let input = match sig.inputs.first()? {
        syn::FnArg::Receiver(receiver) => {
            if receiver.reference.is_some() {
                return None;
            }
            impl_ty?.to_string()
        }
        syn::FnArg::Typed(arg) => simple_type_name(&arg.ty)?,
    };

    let output = match &sig.output {
        syn::ReturnType::Type(_, ty) => simple_type_name(ty)?,
        syn::ReturnType::Default => return None,
    };

    let path = match impl_ty {
        Some(ty) => format!("{ty}::{}", sig.ident),
        None => sig.ident.to_string(),
    };
    Some((path, input, output))
}

/// Bare name of a concrete path type without generic arguments. References,
/// generics and `_` all come back as `None`.
fn simple_type_name(ty: &syn::Type) -> Option<String> {
    if let syn::Type::Path(type_path) = ty {
        if type_path.qself.is_some() {
            return None;
        }
        let segment = type_path.path.segments.last()?;
        if !segment.arguments.is_none() {
            return None;
        }
        Some(segment.ident.to_string())
    } else {
        None
    }
}
