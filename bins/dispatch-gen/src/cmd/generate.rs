use std::io::Write;

use convoy_gen::emit::emit;
use convoy_gen::scan::scan;
use convoy_gen::snapshot::ProgramSnapshot;

use super::config::Effective;
use super::error::DispatchGenError;

// ═══════════════════════════════════════════════════════════════
//  Generator pipeline: snapshot -> scan -> emit
// ═══════════════════════════════════════════════════════════════

pub fn run(args: &Effective) -> Result<(), DispatchGenError> {
    // Parse every source unit up front
    let mut snapshot = ProgramSnapshot::new();
    for path in &args.sources {
        let source = std::fs::read_to_string(path)
            .map_err(|e| DispatchGenError::Config(format!("cannot read source {path}: {e}")))?;
        snapshot = snapshot.add_source(path.clone(), &source)?;
        tracing::debug!(unit = %path, "parsed source unit");
    }

    let facts = scan(&snapshot, &args.options);
    tracing::info!(
        candidates = facts.candidates.len(),
        uses = facts.uses.len(),
        opaque = facts.opaque_uses,
        "scan complete"
    );
    for dup in facts.duplicates() {
        tracing::warn!(path = %dup.path, unit = %dup.unit, "candidate loses its pair to an earlier declaration, skipped");
    }

    if args.dump_facts {
        println!("{}", serde_json::to_string_pretty(&facts)?);
        return Ok(());
    }

    let artifact = emit(&facts, &args.options);
    if args.out == "-" {
        std::io::stdout().lock().write_all(artifact.as_bytes())?;
    } else {
        std::fs::write(&args.out, &artifact)?;
        tracing::info!(out = %args.out, bytes = artifact.len(), "artifact written");
    }
    Ok(())
}
