use crate::options::GenOptions;
use crate::scan::{FactCandidate, ScanFacts};

/// Render the dispatch artifact for the live pairs of a scan.
///
/// Phase 2 of the generator: a pure function of facts and options, so the
/// same scan always produces byte-identical output. Branch order follows
/// candidate discovery order.
pub fn emit(facts: &ScanFacts, options: &GenOptions) -> String {
    let live = facts.live(options.prune_unused);
    let error_ty = last_segment(&options.error_path);
    let value = if live.is_empty() { "_value" } else { "value" };

    let mut out = String::new();
    out.push_str("// @generated by dispatch-gen. Regenerate instead of editing.\n\n");
    // A terminal-only artifact never touches Any or TypeId.
    if !live.is_empty() {
        out.push_str("use std::any::{Any, TypeId};\n\n");
    }
    out.push_str(&format!("use {};\n\n", options.error_path));
    out.push_str(&format!(
        "pub fn {}<Output: 'static, Input: 'static>({value}: Input) -> Result<Output, {error_ty}> {{\n",
        options.entry
    ));
    for candidate in live {
        push_branch(&mut out, candidate, options, error_ty);
    }
    out.push_str(&format!(
        "    Err({error_ty}::not_registered::<Input, Output>())\n"
    ));
    out.push_str("}\n");
    out
}

/// One pair branch. Both downcasts are satisfied whenever the TypeId guard
/// passes; the error arms keep every path diverging so `value` is only
/// moved once.
fn push_branch(out: &mut String, candidate: &FactCandidate, options: &GenOptions, error_ty: &str) {
    let input = qualify(&candidate.input, options);
    let output = qualify(&candidate.output, options);
    let call = qualify(&candidate.path, options);
    out.push_str(&format!(
        "    if TypeId::of::<Input>() == TypeId::of::<{input}>()\n"
    ));
    out.push_str(&format!(
        "        && TypeId::of::<Output>() == TypeId::of::<{output}>()\n"
    ));
    out.push_str("    {\n");
    out.push_str("        let boxed: Box<dyn Any> = Box::new(value);\n");
    out.push_str(&format!(
        "        return match boxed.downcast::<{input}>() {{\n"
    ));
    out.push_str("            Ok(input) => {\n");
    out.push_str(&format!(
        "                let output: Box<dyn Any> = Box::new({call}(*input));\n"
    ));
    out.push_str("                match output.downcast::<Output>() {\n");
    out.push_str("                    Ok(output) => Ok(*output),\n");
    out.push_str(&format!(
        "                    Err(_) => Err({error_ty}::not_registered::<Input, Output>()),\n"
    ));
    out.push_str("                }\n");
    out.push_str("            }\n");
    out.push_str(&format!(
        "            Err(_) => Err({error_ty}::not_registered::<Input, Output>()),\n"
    ));
    out.push_str("        };\n");
    out.push_str("    }\n");
}

fn qualify(name: &str, options: &GenOptions) -> String {
    format!("{}{name}", options.type_prefix)
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
